use crate::domain::errors::AnalysisError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes CSV and JSON artifacts under a single output directory.
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: &Path) -> Result<Self, AnalysisError> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Serialize rows to `<output_dir>/<file_name>`, replacing any existing file.
    pub fn write_csv<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf, AnalysisError> {
        let path = self.path_for(file_name);
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(&path)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(path)
    }

    pub fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf, AnalysisError> {
        let path = self.path_for(file_name);
        let json = serde_json::to_string_pretty(value)?;
        let mut file = fs::File::create(&path)?;
        file.write_all(json.as_bytes())?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}
