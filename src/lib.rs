//! SmartCard Reader - pick a PCSC reader and display the card ATR
//!
//! The GUI lives in `gui`; `core` holds the reader abstractions, the
//! controller that runs reads, and the transcript of successful reads.

pub mod config;
pub mod core;
pub mod gui;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::core::{
    controller::{CardRead, CardReaderController, ReadError},
    reader::{CardHandle, PcscReader, ReaderConnector, ReaderDirectory, ReaderName},
    transcript::Transcript,
    utils::{format_hex, format_hex_spaced},
};

// Common error type
pub type Result<T> = anyhow::Result<T>;
