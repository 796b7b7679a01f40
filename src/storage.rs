use crate::absence::AbsenceEntries;
use crate::wishes::Wish;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Contraintes saisies entre deux générations : absences et souhaits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintBook {
    #[serde(default)]
    pub absences: AbsenceEntries,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wishes: Vec<Wish>,
}

pub trait Storage {
    /// Charge le carnet de contraintes depuis un support.
    fn load(&self) -> anyhow::Result<ConstraintBook>;
    /// Sauvegarde de manière atomique.
    fn save(&self, book: &ConstraintBook) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    /// Carnet vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<ConstraintBook> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(ConstraintBook::default())
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<ConstraintBook> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let book: ConstraintBook = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(book)
    }

    fn save(&self, book: &ConstraintBook) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(book)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
