use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ConvertError, ConvertResult};

/// Output directory the Allure files are written into
#[derive(Debug, Clone)]
pub struct ResultsDir {
    root: PathBuf,
}

impl ResultsDir {
    /// Create the directory (and parents) if missing
    pub fn create(root: impl Into<PathBuf>) -> ConvertResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| ConvertError::io(&root, e))?;
        tracing::debug!(dir = %root.display(), "Results directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Write raw text verbatim
    pub fn write_text(&self, file_name: &str, contents: &str) -> ConvertResult<PathBuf> {
        let path = self.path(file_name);
        fs::write(&path, contents).map_err(|e| ConvertError::io(&path, e))?;
        Ok(path)
    }

    /// Write a value as 2-space indented JSON
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> ConvertResult<PathBuf> {
        let contents = to_pretty_json(file_name, value)?;
        self.write_text(file_name, &contents)
    }

    /// Number of entries currently in the directory
    pub fn file_count(&self) -> ConvertResult<usize> {
        let entries = fs::read_dir(&self.root).map_err(|e| ConvertError::io(&self.root, e))?;
        let mut count = 0;
        for entry in entries {
            entry.map_err(|e| ConvertError::io(&self.root, e))?;
            count += 1;
        }
        Ok(count)
    }
}

pub fn to_pretty_json<T: Serialize + ?Sized>(name: &str, value: &T) -> ConvertResult<String> {
    serde_json::to_string_pretty(value).map_err(|source| ConvertError::Encode {
        name: name.to_string(),
        source,
    })
}
