//! Rule configuration loading.
//!
//! A rule file is a JSON document of the shape
//! `{"fhirPathRules": [<rule>, ...]}`; see [`RuleConfig`](crate::RuleConfig)
//! for the record fields. The configuration is explicit input — it is
//! loaded here and handed to the engine's constructor, never read from a
//! static location at module load.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DeidResult;
use crate::rules::{RuleConfig, RuleSet};

/// A deserialized rule configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeidConfig {
    pub fhir_path_rules: Vec<RuleConfig>,
}

impl DeidConfig {
    /// Reads a configuration from any reader.
    pub fn from_reader(reader: impl io::Read) -> DeidResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a configuration file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> DeidResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Compiles the loaded records into an immutable [`RuleSet`].
    pub fn compile(self) -> DeidResult<RuleSet> {
        RuleSet::compile(self.fhir_path_rules)
    }
}
