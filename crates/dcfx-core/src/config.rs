use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    LabelMapping, PeriodAlignment, ProjectionAssumptions, SourceError, SourceOptions,
    ValidationError,
};

/// Everything one valuation run is parameterised by.
///
/// Loaded from JSON; every section is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfConfig {
    pub assumptions: ProjectionAssumptions,
    pub mapping: LabelMapping,
    pub source: SourceOptions,
    pub alignment: PeriodAlignment,
}

impl DcfConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: name.clone(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| SourceError::Json { path: name, source })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.assumptions.validate()?;
        self.mapping.validate()
    }

    /// Copy with the label mapping spelled out for every line item.
    pub fn effective(&self) -> Self {
        Self {
            mapping: self.mapping.effective(),
            ..self.clone()
        }
    }
}
