use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use r_access::cli::Cli;
use r_access::session::Session;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = Session::from(&cli);

    match session.run(&cli.command) {
        Ok(out) => {
            println!("{}", out.result);
            for warning in out.warnings {
                eprintln!("Warning message:\n{warning}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
