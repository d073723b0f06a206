use act_sweep::{generator, Cli};
use anyhow::Context;
use clap::Parser;
use log::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.init_log() {
        eprintln!("Failed to initialize log. Cause: {:?}", e);
    }

    if let Err(e) = run(&cli) {
        error!("{:?}", e);
        eprintln!("Failed to generate ACT configurations. Cause: {:?}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = cli
        .create_options()
        .context("Failed to resolve options")?;
    let report = generator::generate(&options)?;
    if options.print_last {
        report
            .echo_last(&mut std::io::stdout().lock())
            .context("Failed to print the last config")?;
    }
    Ok(())
}
