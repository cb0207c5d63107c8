use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use manseryeok::saju::{self, DEFAULT_TIMEZONE};

/// 사주 four-pillar calculator. Prints one JSON document to stdout.
#[derive(Parser)]
#[command(name = "saju")]
struct Cli {
    /// Birth date, YYYY-MM-DD
    date: String,
    /// Birth time, HH:MM[:SS]
    time: String,
    /// IANA timezone the birth time is given in
    #[arg(default_value = DEFAULT_TIMEZONE)]
    timezone: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            // Usage errors are the only hard failures; everything past
            // argument parsing reports through the JSON payload instead.
            println!(
                "{}",
                json!({
                    "error": err.to_string(),
                    "timezone_default": DEFAULT_TIMEZONE,
                })
            );
            return ExitCode::FAILURE;
        }
    };

    let payload = match saju::calculate(&cli.date, &cli.time, &cli.timezone) {
        Ok(result) => serde_json::to_value(&result).expect("result is serializable"),
        Err(err) => json!({ "error": err.to_string() }),
    };
    println!("{payload}");
    ExitCode::SUCCESS
}
