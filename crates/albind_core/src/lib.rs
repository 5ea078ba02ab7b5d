//! albind Core - Runtime OpenAL Binding
//!
//! This crate binds an OpenAL implementation at runtime, so the audio
//! backend stays optional:
//! - Symbol table with a typed accessor per entry point
//! - Lifecycle controller that loads, opens, binds and tears down
//! - Diagnostics over the bound implementation and its devices
//! - Persistent driver/device selection
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Caller                               │
//! │   initialize(driver, device) ──▶ AudioBinding ◀── shutdown() │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ LibraryLoader
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      BindingTable                            │
//! │   Management (alc*) ──▶ device/context ──▶ Api (al*)         │
//! │                                │                             │
//! │                    ALC_EXT_EFX ─┴─▶ Filter block (optional)  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!                 Diagnostics (read-only, Ready only)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use albind_core::{AudioBinding, BindingConfig};
//!
//! let config = BindingConfig::load();
//! let mut binding = AudioBinding::new();
//! if binding.initialize(&config.driver, &config.device) {
//!     binding.diagnostics().log_summary();
//! }
//! ```

mod config;
mod diagnostics;
mod error;
pub mod ffi;
mod lifecycle;
mod symbols;
mod table;

#[cfg(test)]
mod testing;

pub use config::BindingConfig;
pub use diagnostics::{BindingReport, DeviceList, Diagnostics, ImplementationInfo};
pub use error::{BindingError, BindingResult, ConfigError};
pub use lifecycle::{AudioBinding, BindingState};
pub use symbols::{FilterSymbol, Symbol, SymbolGroup};
pub use table::{BindingTable, Capability};

// Re-export platform types for convenience
pub use albind_platform::{default_driver, LibraryLoader, PlatformError, SharedLibrary};
