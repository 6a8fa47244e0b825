use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use bms_dup_check::duplicates::find_duplicates;
use bms_dup_check::loader::SongDatabase;
use bms_dup_check::models::DbFormat;
use bms_dup_check::progress::{create_spinner, set_quiet};
use bms_dup_check::report;

#[derive(Parser)]
#[command(name = "bms-dup-check")]
#[command(about = "Find duplicate BMS entries in an LR2 or beatoraja song database")]
struct Args {
    /// Path to songdata.db (beatoraja) or song.db (LR2)
    file: PathBuf,

    /// Emit results as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Hide spinners (pipe-friendly output)
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_quiet(args.quiet || args.json);

    // The format is resolved from the file name alone; unknown names are
    // rejected before the file is read.
    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let format = DbFormat::from_file_name(file_name)?;

    let start = Instant::now();

    let spinner = create_spinner(&format!("Reading {}", args.file.display()));
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;
    spinner.finish_with_message(format!("Read {} bytes", bytes.len()));

    let spinner = create_spinner("Opening database");
    let db = SongDatabase::from_bytes(&bytes, format)
        .with_context(|| format!("failed to load '{}'", args.file.display()))?;
    spinner.finish_with_message(format!("Opened {} database", format));

    let spinner = create_spinner("Scanning for duplicates");
    let songs = find_duplicates(&db)?;
    db.close()?;
    spinner.finish_with_message(format!(
        "Scan complete ({:.2}s)",
        start.elapsed().as_secs_f64()
    ));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        report::render_json(&mut out, &songs)?;
    } else if songs.is_empty() {
        println!("No duplicates found. Your database is clean.");
    } else {
        println!();
        report::render_text(&mut out, &songs)?;
        println!("{} duplicate group(s) found", songs.len());
    }

    Ok(())
}
