use anyhow::{Context, Result};

use crate::core::controller::CardRead;

/// Append-only record of successful reads, in the order they happened.
/// Grows without bound for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Transcript {
    reads: Vec<CardRead>,
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, read: CardRead) {
        self.text.push_str(&read.display_text());
        self.reads.push(read);
    }

    /// Rendered output area contents
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reads(&self) -> &[CardRead] {
        &self.reads
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    /// Serialize every read as a JSON array
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.reads).context("Failed to serialize reads")
    }
}
