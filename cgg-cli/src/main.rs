//! cgg-cli - Command line tool for building commit-graph crochet patterns.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cgg-cli",
    version,
    about = "Commit Graphghan Generator: contribution counts to C2C crochet patterns"
)]
struct Cli {
    #[command(subcommand)]
    command: cgg_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cgg_cmd::run(cli.command).await
}
