//! Scripted pilot input.
//!
//! A script is a JSON array of `{ "tick": N, "command": "..." }` entries.
//! Commands are applied just before the given tick is simulated, in file
//! order.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sub_hunter_core::ControlCommand;

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScriptEntry {
    /// Tick before which the command is applied.
    pub tick: u64,
    /// The command.
    pub command: ControlCommand,
}

/// Commands grouped by tick.
#[derive(Debug, Default, Clone)]
pub struct Script {
    by_tick: BTreeMap<u64, Vec<ControlCommand>>,
}

impl Script {
    /// Builds a script from entries, keeping file order within a tick.
    pub fn from_entries(entries: impl IntoIterator<Item = ScriptEntry>) -> Self {
        let mut by_tick: BTreeMap<u64, Vec<ControlCommand>> = BTreeMap::new();
        for entry in entries {
            by_tick.entry(entry.tick).or_default().push(entry.command);
        }
        Self { by_tick }
    }

    /// Parses a script from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ScriptEntry> =
            serde_json::from_str(json).context("script is not a list of tick/command entries")?;
        Ok(Self::from_entries(entries))
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to parse script {}", path.display()))
    }

    /// Commands to apply before `tick`.
    pub fn commands_at(&self, tick: u64) -> &[ControlCommand] {
        self.by_tick
            .get(&tick)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of scripted commands.
    pub fn len(&self) -> usize {
        self.by_tick.values().map(Vec::len).sum()
    }
}
