use std::fs;
use std::path::{Path, PathBuf};

use crate::{FinancialTable, SourceError};

use super::TabularSource;

/// A [`FinancialTable`] serialized as JSON (`{"periods": [...], "rows": [...]}`).
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
    name: String,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
        }
    }
}

impl TabularSource for JsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_table(&self) -> Result<FinancialTable, SourceError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.name.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| SourceError::Json {
            path: self.name.clone(),
            source,
        })
    }
}
