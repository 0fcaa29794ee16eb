use anyhow::Result;
use clap::Parser;
use summa::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
