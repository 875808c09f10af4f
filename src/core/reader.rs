use anyhow::{bail, Context as AnyhowContext, Result};
use pcsc::{Card, Context, Disposition, Protocols, Scope, ShareMode};
use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::fmt;

/// Name of a reader as reported by the PCSC subsystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReaderName(String);

impl ReaderName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReaderName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Enumerates the readers currently known to the platform
pub trait ReaderDirectory {
    fn list_readers(&self) -> Result<Vec<ReaderName>>;
}

/// Builds unconnected handles bound to a named reader
pub trait ReaderConnector {
    fn open(&self, name: &ReaderName) -> Box<dyn CardHandle>;
}

/// A link to one reader. Created unconnected; `connect` must succeed
/// before `atr` can return anything.
pub trait CardHandle {
    fn connect(&mut self) -> Result<()>;
    fn atr(&mut self) -> Result<Vec<u8>>;
}

/// PCSC-backed reader directory and connector
#[derive(Clone)]
pub struct PcscReader {
    context: Context,
    share_mode: ShareMode,
}

impl PcscReader {
    /// Establish a user-scoped PCSC context
    pub fn new(share_mode: ShareMode) -> Result<Self> {
        let context =
            Context::establish(Scope::User).context("Failed to establish PCSC context")?;

        Ok(Self {
            context,
            share_mode,
        })
    }
}

impl ReaderDirectory for PcscReader {
    fn list_readers(&self) -> Result<Vec<ReaderName>> {
        let len = self
            .context
            .list_readers_len()
            .context("Failed to size reader list")?;
        let mut readers_buf = vec![0; len];
        let readers = self
            .context
            .list_readers(&mut readers_buf)
            .context("Failed to list readers")?;

        let names: Vec<ReaderName> = readers
            .map(|name| ReaderName::new(name.to_string_lossy()))
            .collect();

        log::info!("Found {} reader(s)", names.len());
        Ok(names)
    }
}

impl ReaderConnector for PcscReader {
    fn open(&self, name: &ReaderName) -> Box<dyn CardHandle> {
        Box::new(PcscCardHandle {
            context: self.context.clone(),
            share_mode: self.share_mode,
            name: name.clone(),
            card: None,
        })
    }
}

/// Handle on a single PCSC reader
pub struct PcscCardHandle {
    context: Context,
    share_mode: ShareMode,
    name: ReaderName,
    card: Option<Card>,
}

impl PcscCardHandle {
    fn disconnect(&mut self) {
        if let Some(card) = self.card.take() {
            if let Err((_, e)) = card.disconnect(Disposition::LeaveCard) {
                log::warn!("Failed to disconnect cleanly from {}: {}", self.name, e);
            }
        }
    }
}

impl CardHandle for PcscCardHandle {
    fn connect(&mut self) -> Result<()> {
        self.disconnect();

        log::info!("Connecting to reader: {}", self.name);
        let reader_cstr = CString::new(self.name.as_str()).context("Invalid reader name")?;
        let card = self
            .context
            .connect(&reader_cstr, self.share_mode, Protocols::ANY)
            .with_context(|| format!("Failed to connect to reader: {}", self.name))?;

        self.card = Some(card);
        log::info!("Successfully connected to reader: {}", self.name);
        Ok(())
    }

    fn atr(&mut self) -> Result<Vec<u8>> {
        let Some(card) = self.card.as_ref() else {
            bail!("Not connected to reader: {}", self.name);
        };

        let status = card
            .status2_owned()
            .with_context(|| format!("Failed to read card status on {}", self.name))?;
        Ok(status.atr().to_vec())
    }
}

impl Drop for PcscCardHandle {
    fn drop(&mut self) {
        self.disconnect();
    }
}
