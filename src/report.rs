//! Rendering of duplicate records to text or JSON.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::links::{lr2ir_url, mocha_url};
use crate::models::DuplicateSong;

/// One output row: the record plus its resolved lookup links.
#[derive(Serialize)]
struct ReportEntry<'a> {
    #[serde(flatten)]
    song: &'a DuplicateSong,
    lr2ir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mocha: Option<String>,
}

impl<'a> ReportEntry<'a> {
    fn new(song: &'a DuplicateSong) -> Self {
        ReportEntry {
            lr2ir: lr2ir_url(song),
            mocha: mocha_url(song),
            song,
        }
    }
}

/// Write one block per duplicate group.
pub fn render_text<W: Write>(out: &mut W, songs: &[DuplicateSong]) -> Result<()> {
    for song in songs {
        let entry = ReportEntry::new(song);
        if song.subtitle().is_empty() {
            writeln!(out, "{}", song.title())?;
        } else {
            writeln!(out, "{} {}", song.title(), song.subtitle())?;
        }
        for path in song.paths() {
            writeln!(out, "  {}", path)?;
        }
        writeln!(out, "  LR2IR: {}", entry.lr2ir)?;
        match entry.mocha {
            Some(url) => writeln!(out, "  Mocha: {}", url)?,
            None => writeln!(out, "  Mocha: -")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write all records as a JSON array, for scripting.
pub fn render_json<W: Write>(out: &mut W, songs: &[DuplicateSong]) -> Result<()> {
    let entries: Vec<ReportEntry> = songs.iter().map(ReportEntry::new).collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}
