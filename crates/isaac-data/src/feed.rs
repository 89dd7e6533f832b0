use crate::records::{RawImpulse, RawMacroState, Revisioned};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Response body of the macro-state endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MacroStateFeed {
    pub macro_states: Vec<RawMacroState>,
}

/// Response body of the impulse endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImpulseFeed {
    pub impulses: Vec<RawImpulse>,
}

/// Drop superseded revisions and order newest-first
fn current_revisions<T: Revisioned>(records: Vec<T>) -> Vec<T> {
    let total = records.len();
    let mut current: Vec<T> = records.into_iter().filter(|r| r.is_current()).collect();

    if current.len() < total {
        tracing::debug!("Skipped {} superseded revisions", total - current.len());
    }

    current.sort_by(|a, b| b.block_number().cmp(&a.block_number()));
    current
}

impl MacroStateFeed {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Current snapshots, newest-first, one per block.
    ///
    /// When two current rows share a block the first one in feed order wins.
    pub fn history(self) -> Vec<RawMacroState> {
        let mut seen = HashSet::new();
        let mut states = current_revisions(self.macro_states);
        let before = states.len();

        states.retain(|s| seen.insert(s.block_number));

        if states.len() < before {
            tracing::warn!("Dropped {} duplicate macro states", before - states.len());
        }
        states
    }
}

impl ImpulseFeed {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Current impulses, newest-first
    pub fn current(self) -> Vec<RawImpulse> {
        current_revisions(self.impulses)
    }
}
