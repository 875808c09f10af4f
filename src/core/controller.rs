use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::reader::{CardHandle, ReaderConnector, ReaderName};
use crate::core::utils::{format_hex, format_hex_spaced};

/// Why a read request did not produce an ATR
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("Please select an external reader first.")]
    NoReaderSelected,

    /// Carries the collaborator's message unchanged
    #[error("Error while reading the card: {0}")]
    ReadFailure(String),
}

/// A successful card read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRead {
    pub timestamp: DateTime<Utc>,
    pub reader: ReaderName,
    pub atr: Vec<u8>,
}

impl CardRead {
    /// Text block appended to the output area
    pub fn display_text(&self) -> String {
        format!(
            "Card information read...\nATR: {}\n",
            format_hex_spaced(&self.atr)
        )
    }
}

struct Selection {
    reader: ReaderName,
    handle: Box<dyn CardHandle>,
}

/// Owns the selected reader's handle and runs reads against it
pub struct CardReaderController {
    connector: Box<dyn ReaderConnector>,
    selection: Option<Selection>,
}

impl CardReaderController {
    pub fn new(connector: Box<dyn ReaderConnector>) -> Self {
        Self {
            connector,
            selection: None,
        }
    }

    /// Bind a fresh, unconnected handle to `name`. Any previous handle is dropped.
    pub fn select_reader(&mut self, name: ReaderName) {
        if let Some(previous) = &self.selection {
            log::debug!("Replacing handle for {}", previous.reader);
        }

        log::info!("Selected reader: {}", name);
        let handle = self.connector.open(&name);
        self.selection = Some(Selection {
            reader: name,
            handle,
        });
    }

    pub fn selected_reader(&self) -> Option<&ReaderName> {
        self.selection.as_ref().map(|s| &s.reader)
    }

    /// Connect to the selected reader and fetch the card ATR. One attempt, no retry.
    pub fn read_card(&mut self) -> Result<CardRead, ReadError> {
        let Some(selection) = self.selection.as_mut() else {
            log::warn!("Read requested before any reader was selected");
            return Err(ReadError::NoReaderSelected);
        };

        let atr = selection
            .handle
            .connect()
            .and_then(|()| selection.handle.atr())
            .map_err(|e| {
                log::error!("Card read on {} failed: {:#}", selection.reader, e);
                ReadError::ReadFailure(format!("{e:#}"))
            })?;

        log::info!("ATR from {}: {}", selection.reader, format_hex(&atr));
        Ok(CardRead {
            timestamp: Utc::now(),
            reader: selection.reader.clone(),
            atr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_contains_spaced_atr() {
        let read = CardRead {
            timestamp: Utc::now(),
            reader: ReaderName::new("ACS ACR122U"),
            atr: vec![0x3B, 0x8F, 0x80, 0x01],
        };
        assert_eq!(
            read.display_text(),
            "Card information read...\nATR: 3B 8F 80 01\n"
        );
    }

    #[test]
    fn read_failure_message_embeds_collaborator_text() {
        let err = ReadError::ReadFailure("no card present".to_string());
        assert_eq!(err.to_string(), "Error while reading the card: no card present");
        assert_eq!(
            ReadError::NoReaderSelected.to_string(),
            "Please select an external reader first."
        );
    }
}
