pub mod cli;
pub mod commands;
pub mod logging;
pub mod utils;

use clap::Parser;
use cli::Snipdeck;
use commands::handle_command;
use std::process;

/// Run the snipdeck CLI application
pub fn run_main() {
    let args = Snipdeck::parse();
    logging::init_logging(args.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(handle_command(args.commands)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
