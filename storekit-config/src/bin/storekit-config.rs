use clap::Parser;
use storekit_config::cli::{ConfigCli, ConfigCliRunner};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = ConfigCli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = ConfigCliRunner::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Stdout carries command output, so logs go to stderr
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
