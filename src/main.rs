use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use chunkflate::{compress_file, decompress_file, CompressError, Engine};

#[derive(Parser)]
#[command(name = "chunkflate", version, about = "Chunked zlib compression of a single file")]
struct Cli {
    /// Print run statistics as JSON on success
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress INPUT into a zlib stream at OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Inflate the zlib stream at INPUT into OUTPUT
    Decompress { input: PathBuf, output: PathBuf },
}

fn main() -> ExitCode {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("chunkflate: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CompressError> {
    match &cli.command {
        Command::Compress { input, output } => {
            let stats = compress_file(&Engine::default(), input, output)?;
            if cli.json {
                match stats.to_json() {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("chunkflate: could not render stats: {err}"),
                }
            }
        }
        Command::Decompress { input, output } => {
            let (compressed, decompressed) = decompress_file(input, output)?;
            if cli.json {
                let report = serde_json::json!({
                    "bytes_read": compressed,
                    "bytes_written": decompressed,
                });
                println!("{report}");
            }
        }
    }
    Ok(())
}
