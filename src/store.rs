use crate::error::{LinkerError, Result};
use crate::pages::PageRecord;
use crate::rules::LinkRule;
use crate::tracker::LinkPerformanceRecord;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Everything a host needs to persist between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub pages: Vec<PageRecord>,

    #[serde(default)]
    pub rules: Vec<LinkRule>,

    #[serde(default)]
    pub performance: Vec<LinkPerformanceRecord>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|source| LinkerError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_json(&contents)
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| LinkerError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        ::log::info!(
            "Saved {} pages, {} rules, {} performance records to {}",
            self.pages.len(),
            self.rules.len(),
            self.performance.len(),
            path.display()
        );
        Ok(())
    }
}
