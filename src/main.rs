use anyhow::Result;
use clap::Parser;
use miwear::{cli::Cli, runner};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = runner::RunConfig::from(&args);
    let report = runner::run(&config)?;

    tracing::debug!(
        "run finished: appid={:?} screen={:?} written={:?}",
        report.appid_records,
        report.screen_records,
        report.written
    );

    Ok(())
}
