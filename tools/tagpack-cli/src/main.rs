mod error;
mod json;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tagpack::{DecodeOptions, Decoder, EncodeOptions, Encoder, DEFAULT_MAX_DEPTH};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tagpack", version, about = "Encode and inspect tagpack buffers")]
struct Cli {
    /// Maximum array/map nesting accepted by the codec
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON document
    Encode {
        /// JSON input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Decode one value and print it
    Inspect {
        /// Encoded input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Treat the input as hex text
        #[arg(long)]
        hex: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, data: &[u8], stdout: &mut dyn Write) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, data)?,
        None => stdout.write_all(data)?,
    }
    Ok(())
}

fn run(cli: Cli, stdout: &mut dyn Write) -> Result<(), CliError> {
    match cli.command {
        Command::Encode { input, output, hex } => {
            let raw = read_input(input.as_deref())?;
            let document: serde_json::Value = serde_json::from_slice(&raw)?;
            let value = json::to_value(&document);

            let encoder = Encoder::with_options(EncodeOptions::default().with_max_depth(cli.max_depth));
            let encoded = encoder.encode(&value)?;
            debug!(input_len = raw.len(), output_len = encoded.len(), "encoded JSON document");

            if hex {
                let mut text = hex::encode(&encoded);
                text.push('\n');
                write_output(output.as_deref(), text.as_bytes(), stdout)
            } else {
                write_output(output.as_deref(), &encoded, stdout)
            }
        }
        Command::Inspect { input, hex } => {
            let raw = read_input(input.as_deref())?;
            let data = if hex {
                let text: String = String::from_utf8_lossy(&raw)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                hex::decode(text)?
            } else {
                raw
            };

            let decoder = Decoder::with_options(DecodeOptions::default().with_max_depth(cli.max_depth));
            let (value, consumed) = decoder.decode_at(&data, 0)?;

            writeln!(stdout, "{}", value)?;
            writeln!(stdout, "consumed {} of {} bytes", consumed, data.len())?;
            if consumed < data.len() {
                writeln!(stdout, "trailing: {}", hex::encode(&data[consumed..]))?;
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
