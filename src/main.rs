//! # ledger-forecast
//!
//! Reads one forecast request document, writes one response document to
//! stdout and exits non-zero when the response is a failure. Logs go to
//! stderr and honour `RUST_LOG` (default `warn`).

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ledger_forecast::pipeline::{run_document, ForecastKind, Response};
use ledger_forecast::synth::{demo_request, DEFAULT_SEED};
use ledger_forecast::ForecastError;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ledger-forecast", version)]
#[command(about = "Forecast bank transactions and exception resolution rates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Request document to read instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a request filled with synthetic history
    Demo {
        /// Forecast kind (bank_transactions, exception_resolution)
        #[arg(short, long, default_value = "bank_transactions")]
        kind: ForecastKind,

        /// Last day of the generated history (YYYY-MM-DD)
        #[arg(short, long)]
        end: NaiveDate,

        /// Random seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Run the generated request and print its response instead
        #[arg(long)]
        run: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn read_document(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write `response` as the single stdout document and map it to an exit code.
fn respond(response: &Response, pretty: bool) -> ExitCode {
    let encoded = if pretty {
        response.to_json_pretty()
    } else {
        response.to_json()
    };
    match encoded {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(error = %e, "cannot encode response");
            println!(r#"{{"success":false,"error":"cannot encode response"}}"#);
            return ExitCode::FAILURE;
        }
    }
    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        None => {
            let response = match read_document(cli.input.as_ref()) {
                Ok(document) => run_document(&document),
                Err(e) => Response::from(Err(ForecastError::MalformedInput(format!(
                    "cannot read request: {}",
                    e
                )))),
            };
            respond(&response, cli.pretty)
        }
        Some(Command::Demo {
            kind,
            end,
            seed,
            run,
        }) => {
            let request = match demo_request(kind, end, seed) {
                Ok(request) => request,
                Err(e) => return respond(&Response::from(Err(e)), cli.pretty),
            };
            if run {
                let response = Response::from(ledger_forecast::pipeline::run(&request));
                return respond(&response, cli.pretty);
            }
            let encoded = if cli.pretty {
                serde_json::to_string_pretty(&request)
            } else {
                serde_json::to_string(&request)
            };
            match encoded {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => respond(
                    &Response::failure(&ForecastError::MalformedInput(e.to_string())),
                    cli.pretty,
                ),
            }
        }
    }
}
