pub mod adapter;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod inflate;

pub use adapter::*;
pub use codec::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use inflate::*;
