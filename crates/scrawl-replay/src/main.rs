//! Replay a recorded pointer session and print the resulting report.

use clap::Parser;
use scrawl_replay::{ReplayResult, Session, replay};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scrawl-replay", about = "Replay a pointer session through a stroke surface")]
struct Args {
    /// Session JSON file.
    session: PathBuf,
    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
    /// Omit draw commands from the report.
    #[arg(long)]
    no_draw_commands: bool,
}

fn run(args: &Args) -> ReplayResult<String> {
    let session = Session::load(&args.session)?;
    let mut report = replay(&session)?;
    if args.no_draw_commands {
        report.draw_commands.clear();
    }
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    Ok(json)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Loading session {}", args.session.display());

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
