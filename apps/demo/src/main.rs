#![allow(clippy::print_stdout)]

use anyhow::bail;
use clap::Parser;
use smem_demo::{Cli, load_config, run};
use smem_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file_config = load_config(cli.config.as_deref())?;
    let config = cli.apply(file_config);

    let _logger = Logger::builder().name(env!("CARGO_BIN_NAME")).settings(&config.log)?.init()?;

    let report = run(&config)?;
    println!("Retrieved user: {:?}", report.recovered);

    if let Some(restored) = &report.restored {
        println!("Restored user from snapshot: {restored:?}");
        match &report.stranger {
            Some(err) => println!("Load with a random key failed as expected: {err}"),
            None => bail!("A vault with a random key opened the snapshot"),
        }
    }

    Ok(())
}
