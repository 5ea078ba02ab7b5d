//! albind Platform - OS Shared Library Access
//!
//! This crate provides the platform half of the runtime binding:
//! - Loading a shared library by path or bare name
//! - Looking up exported symbols by name
//! - Unloading the library when its handle is dropped
//! - Per-platform default OpenAL driver names
//!
//! # Platform Support
//!
//! | Platform | Loader          | Default driver                                   |
//! |----------|-----------------|--------------------------------------------------|
//! | Linux    | dlopen          | `libopenal.so.1`                                 |
//! | Windows  | LoadLibraryW    | `soft_oal.dll`                                   |
//! | macOS    | dlopen          | `/System/Library/Frameworks/OpenAL.framework/OpenAL` |
//!
//! # Architecture
//!
//! The core crate only talks to the `LibraryLoader` and `SharedLibrary`
//! traits, so the whole binding lifecycle can be driven against a fake
//! library in tests.

mod error;
mod loader;
mod traits;

pub use error::PlatformError;
pub use loader::{DynamicLibrary, SystemLoader};
pub use traits::{LibraryLoader, RawSymbol, SharedLibrary};

/// Default OpenAL driver for the current OS
pub fn default_driver() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "soft_oal.dll"
    }
    #[cfg(target_os = "macos")]
    {
        "/System/Library/Frameworks/OpenAL.framework/OpenAL"
    }
    #[cfg(target_os = "openbsd")]
    {
        "libopenal.so"
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "openbsd")))]
    {
        "libopenal.so.1"
    }
}

/// Check if the platform's OpenAL is expected to expose the EFX extension
///
/// Apple's bundled OpenAL has no EFX. Everything else usually ships OpenAL
/// Soft, which does. The binding still probes at runtime either way.
pub fn expects_efx() -> bool {
    #[cfg(target_os = "macos")]
    {
        false
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}
