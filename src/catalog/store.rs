use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::catalog::catalog::{Catalog, CatalogError, CatalogProvider};
use crate::catalog::item::AssessmentItem;

/// A catalog kept on disk as a JSON array of items.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, or write `seed` to it first when it does not exist yet.
    pub fn load_or_init(&self, seed: &Catalog) -> Result<Catalog, CatalogError> {
        if self.path.exists() {
            return self.load();
        }
        tracing::info!(path = %self.path.display(), items = seed.len(), "initialising catalog file from seed");
        self.write(seed)?;
        Ok(seed.clone())
    }

    /// Replace the file contents with `catalog`.
    ///
    /// Writes to a sibling temp file and renames it into place, so readers
    /// never observe a half-written catalog.
    pub fn write(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let hash = catalog.version.as_str().get(7..19).unwrap_or("snapshot");
        let temp_suffix = format!("tmp.{hash}");
        let temp_path = self.path.with_extension(temp_suffix);

        // Stale temp file from a crashed write of this same snapshot
        if temp_path.exists() {
            fs::remove_file(&temp_path)?;
        }

        let f = fs::File::create(&temp_path)?;
        let mut writer = BufWriter::new(&f);
        serde_json::to_writer_pretty(&mut writer, catalog.items())?;
        writer.flush()?;
        drop(writer);
        f.sync_all()?;

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl CatalogProvider for JsonCatalogFile {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let f = fs::File::open(&self.path)?;
        let items: Vec<AssessmentItem> = serde_json::from_reader(BufReader::new(f))?;
        Catalog::new(items)
    }
}
