use anyhow::Result;
use clap::Parser;
use par_vfont::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Route log::info!() etc. to the debug log file before anything runs.
    par_vfont::debug::init_log_bridge(cli.log_level.map(cli::LogLevelArg::to_level_filter));

    log::info!("Starting par-vfont");
    let result = cli::run(cli);
    if let Err(ref e) = result {
        log::error!("par-vfont failed: {e:#}");
    }
    result
}
