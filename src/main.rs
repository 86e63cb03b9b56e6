// src/main.rs

use std::error::Error as _;

use waitrun::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("waitrun error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }

    // Exit immediately on success instead of letting the runtime wind down,
    // so background servers never hold the process open. The host
    // environment tears down any children that are still running.
    std::process::exit(0);
}

async fn run_main() -> waitrun::errors::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
