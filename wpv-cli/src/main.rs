//! WPV CLI - Command line tool for browsing wells and their aggregated
//! production and injection history.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wpv-cli",
    version,
    about = "Well production and injection viewer toolkit"
)]
struct Cli {
    #[command(flatten)]
    data: wpv_cmd::DataArgs,

    #[command(subcommand)]
    command: wpv_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[WPV] cli: data config {:?}", cli.data);
    wpv_cmd::run(&cli.data, cli.command)
}
