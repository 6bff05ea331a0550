//! `bazaar` command line entry point

use bazaar_console::{run, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let output = run(&cli)?;
    print!("{output}");
    Ok(())
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides
/// the default `info` filter.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
