//! Sheet discovery in a data folder.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use roster_model::EntityKind;

use crate::error::{IngestError, Result};

/// Sheet files found for each entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetFiles {
    pub clients: Option<PathBuf>,
    pub workers: Option<PathBuf>,
    pub tasks: Option<PathBuf>,
}

impl SheetFiles {
    pub fn get(&self, kind: EntityKind) -> Option<&Path> {
        match kind {
            EntityKind::Clients => self.clients.as_deref(),
            EntityKind::Workers => self.workers.as_deref(),
            EntityKind::Tasks => self.tasks.as_deref(),
        }
    }

    fn slot(&mut self, kind: EntityKind) -> &mut Option<PathBuf> {
        match kind {
            EntityKind::Clients => &mut self.clients,
            EntityKind::Workers => &mut self.workers,
            EntityKind::Tasks => &mut self.tasks,
        }
    }

    /// Kinds with no sheet file.
    pub fn missing(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }
}

/// Lists all CSV files in a directory, sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Entity kind a file name belongs to: `clients*.csv`, `Workers_v2.csv`, ...
pub fn classify_sheet(path: &Path) -> Option<EntityKind> {
    let stem = path.file_stem()?.to_str()?.to_lowercase();
    EntityKind::ALL
        .into_iter()
        .find(|kind| stem.starts_with(&kind.to_string()))
}

/// Find the clients, workers and tasks sheets in a folder.
///
/// When several files match one kind, the first by name wins.
pub fn discover_sheets(dir: &Path) -> Result<SheetFiles> {
    let mut sheets = SheetFiles::default();
    for path in list_csv_files(dir)? {
        let Some(kind) = classify_sheet(&path) else {
            debug!(path = %path.display(), "ignoring unrecognized CSV");
            continue;
        };
        let slot = sheets.slot(kind);
        match slot {
            Some(existing) => warn!(
                entity = %kind,
                kept = %existing.display(),
                ignored = %path.display(),
                "multiple sheets match"
            ),
            None => *slot = Some(path),
        }
    }
    Ok(sheets)
}
