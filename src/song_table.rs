use std::{io, path::Path};

use fs_err::File;
use log::info;
use serde::Serialize;

use crate::schema::{MusicalKey, SongName, SongRecord};

#[derive(Serialize)]
struct Row<'a> {
    name: &'a SongName,
    key: &'a MusicalKey,
    chords: String,
}

impl<'a> From<&'a SongRecord> for Row<'a> {
    fn from(record: &'a SongRecord) -> Self {
        Self {
            name: record.name(),
            key: record.key(),
            chords: record.chords_field(),
        }
    }
}

/// Writes a `name,key,chords` table, one row per record.
/// The header is written even when there are no records.
pub fn write_records<W: io::Write>(writer: W, records: &[SongRecord]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(["name", "key", "chords"])?;
    for record in records {
        writer.serialize(Row::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Saves the table to `path`, replacing whatever was there.
pub fn save(path: &Path, records: &[SongRecord]) -> anyhow::Result<()> {
    write_records(File::create(path)?, records)?;
    info!("Saved {} songs to {:?}.", records.len(), path);
    Ok(())
}
