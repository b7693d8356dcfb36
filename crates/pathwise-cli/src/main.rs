use clap::Parser;
use pathwise_cli::{CliArgs, PathwiseCli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = PathwiseCli::from_args("pathwise", &args).and_then(|cli| cli.run(args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
