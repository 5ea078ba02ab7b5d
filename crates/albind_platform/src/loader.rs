//! System Library Loader
//!
//! `libloading`-backed implementation of the loader traits. On Unix this is
//! `dlopen`/`dlsym`/`dlclose`, on Windows `LoadLibraryW`/`GetProcAddress`/
//! `FreeLibrary`.

use std::ffi::c_void;
use std::ptr::NonNull;

use libloading::Library;
use tracing::{debug, trace};

use crate::error::PlatformError;
use crate::traits::{LibraryLoader, RawSymbol, SharedLibrary};

/// A library opened through the OS loader
pub struct DynamicLibrary {
    path: String,
    library: Library,
}

impl DynamicLibrary {
    /// Open the library at `path`
    pub fn open(path: &str) -> Result<Self, PlatformError> {
        if path.is_empty() {
            return Err(PlatformError::InvalidPath("empty library path".into()));
        }
        if path.contains('\0') {
            return Err(PlatformError::InvalidPath(format!(
                "library path contains a NUL byte: {:?}",
                path
            )));
        }

        // SAFETY: loading a library runs its initializers. The caller chose
        // this library as the audio driver and accepts that.
        let library = unsafe { Library::new(path) }.map_err(|e| PlatformError::LibraryLoadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Loaded shared library {}", path);

        Ok(Self {
            path: path.to_string(),
            library,
        })
    }
}

impl SharedLibrary for DynamicLibrary {
    fn path(&self) -> &str {
        &self.path
    }

    fn symbol(&self, name: &str) -> Option<RawSymbol> {
        // SAFETY: the symbol is read as an untyped address only. Callers
        // cast it to the matching signature before calling through it.
        let address = unsafe {
            self.library
                .get::<*mut c_void>(name.as_bytes())
                .ok()
                .map(|sym| *sym)
        };

        let resolved = address.and_then(NonNull::new);
        if resolved.is_none() {
            trace!("Symbol {} not found in {}", name, self.path);
        }
        resolved
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        debug!("Unloading shared library {}", self.path);
    }
}

/// Loader that goes through the OS dynamic linker
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoader;

impl LibraryLoader for SystemLoader {
    fn load(&self, path: &str) -> Result<Box<dyn SharedLibrary>, PlatformError> {
        Ok(Box::new(DynamicLibrary::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library_fails() {
        let result = SystemLoader.load("albind-definitely-missing-library.so");
        match result {
            Err(PlatformError::LibraryLoadFailed { path, .. }) => {
                assert_eq!(path, "albind-definitely-missing-library.so");
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("missing library should not load"),
        }
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(
            DynamicLibrary::open(""),
            Err(PlatformError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_nul_in_path_rejected() {
        assert!(matches!(
            DynamicLibrary::open("libopenal\0.so"),
            Err(PlatformError::InvalidPath(_))
        ));
    }

    #[test]
    #[ignore = "requires OpenAL"]
    fn test_load_default_driver() {
        let lib = SystemLoader
            .load(crate::default_driver())
            .expect("default OpenAL driver should load");
        assert!(lib.symbol("alcOpenDevice").is_some());
        assert!(lib.symbol("albindNoSuchSymbol").is_none());
    }
}
