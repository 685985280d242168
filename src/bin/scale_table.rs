//! scale-table: prints the RG-evolved ratio table and its interpretation.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use quark_ratios::scales::{run_scale_report, ScaleTable, SCALE_DATA};

#[derive(Parser)]
#[command(name = "scale-table")]
#[command(about = "Report light quark mass ratios across RG-evolved energy scales")]
#[command(version)]
struct Cli {
    /// Print the table as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut stdout = io::stdout().lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &ScaleTable::new(&SCALE_DATA))?;
        writeln!(stdout)?;
    } else {
        let max_dev =
            run_scale_report(&mut stdout, &SCALE_DATA).context("Failed to write report")?;
        log::info!("{} scales reported, max deviation {max_dev}", SCALE_DATA.len());
    }

    stdout.flush()?;
    Ok(())
}
