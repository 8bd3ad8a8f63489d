use std::env::args_os;
use std::process::ExitCode;

use graytk::{run_operation, CLIParser};

mod logger;

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let operation = cli_parser.parse(args_os());
    match run_operation(&operation) {
        Ok(Some(report)) => {
            println!("{}", report.trim_end_matches('\n'));
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?} failed: {:?}", operation, e);
            eprintln!("Operation failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
