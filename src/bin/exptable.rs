/// exptable command-line tool
///
/// Loads one expense file and writes the requested reports to stdout.
/// Warnings about unknown columns go to stderr through the logger; set
/// `RUST_LOG=debug` for more.

use anyhow::Context;
use clap::Parser;
use exptable::{process, Cli, ReportConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = ReportConfig::from(Cli::parse());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    process(&config, &mut out)
        .with_context(|| format!("could not process {}", config.file.display()))
}
