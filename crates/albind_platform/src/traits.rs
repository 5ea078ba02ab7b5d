//! Loader Traits
//!
//! The seam between the binding layer and the OS shared-library primitives.
//! The system implementation lives in `loader.rs`; tests substitute their own.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::error::PlatformError;

/// Address of a symbol exported by a loaded library
pub type RawSymbol = NonNull<c_void>;

/// A loaded shared library
///
/// Dropping the value unloads the library. Any symbol address obtained from
/// it must not be used afterwards.
pub trait SharedLibrary {
    /// Path or name the library was loaded from
    fn path(&self) -> &str;

    /// Look up an exported symbol by name
    ///
    /// Returns `None` when the symbol is absent. Never fails otherwise.
    fn symbol(&self, name: &str) -> Option<RawSymbol>;
}

/// Opens shared libraries by path or by bare name
pub trait LibraryLoader {
    /// Load the library at `path`
    ///
    /// A bare file name is searched for the way the OS loader searches
    /// (`LD_LIBRARY_PATH`, `PATH`, framework paths).
    fn load(&self, path: &str) -> Result<Box<dyn SharedLibrary>, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullLibrary;

    impl SharedLibrary for NullLibrary {
        fn path(&self) -> &str {
            "null"
        }

        fn symbol(&self, _name: &str) -> Option<RawSymbol> {
            None
        }
    }

    struct NullLoader;

    impl LibraryLoader for NullLoader {
        fn load(&self, _path: &str) -> Result<Box<dyn SharedLibrary>, PlatformError> {
            Ok(Box::new(NullLibrary))
        }
    }

    #[test]
    fn test_loader_is_object_safe() {
        let loader: Box<dyn LibraryLoader> = Box::new(NullLoader);
        let lib = loader.load("anything").unwrap();
        assert_eq!(lib.path(), "null");
        assert!(lib.symbol("alcOpenDevice").is_none());
    }
}
