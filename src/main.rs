use clap::Parser;
use organizer::cli::{Args, run_cli};
use organizer::logging::init_tracing;
use organizer::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.log_level, args.log_json) {
        OutputFormatter::warning(&format!("Logging disabled: {}", e));
    }

    match run_cli(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
