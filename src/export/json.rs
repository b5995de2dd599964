//! JSON import/export of subjects.
//! A backup is a pretty-printed array of subjects including their review state.

use crate::database::SubjectRepository;
use crate::error::Result;
use crate::models::Subject;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the subjects to a JSON file at the specified path.
pub fn export_subjects_to_path(subjects: &[Subject], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, subjects)?;
    writer.flush()?;
    info!(count = subjects.len(), path = %path.display(), "subjects exported");
    Ok(())
}

/// Reads subjects from a JSON backup.
/// Fails if the file doesn't exist or contains invalid JSON.
pub fn import_subjects(path: impl AsRef<Path>) -> Result<Vec<Subject>> {
    let file = File::open(path.as_ref())?;
    let subjects: Vec<Subject> = serde_json::from_reader(BufReader::new(file))?;
    Ok(subjects)
}

/// Re-creates imported subjects in `repo`, keeping review state and creation time.
/// Ids are assigned by the store. A backup with any invalid review state is
/// rejected as a whole and leaves `repo` untouched.
pub fn restore_subjects<R: SubjectRepository>(
    repo: &R,
    subjects: &[Subject],
) -> Result<Vec<Subject>> {
    let restored = repo.restore_subjects(subjects)?;
    info!(count = restored.len(), "subjects restored from backup");
    Ok(restored)
}
