use tracing_subscriber::EnvFilter;

mod cli;
use cli::execute_command;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    // Initialize the logging subsystem; levels come from RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse and execute the CLI command; any configuration, authentication,
    // or fetch failure terminates the run with exit status 1.
    if let Err(e) = execute_command().await {
        eprintln!("ERROR: {}", e);
        ::std::process::exit(1);
    }
}
