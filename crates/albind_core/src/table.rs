//! Binding Table
//!
//! Holds every resolved entry point. Management and API entries share one
//! enum-indexed slot array; the EFX filter entries live in a separate
//! optional block that is either present (each entry possibly still absent)
//! or absent as a whole.
//!
//! Nothing here calls through a pointer. The lifecycle controller decides
//! when it is safe to do so.

use albind_platform::{RawSymbol, SharedLibrary};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{BindingError, BindingResult};
use crate::symbols::{FilterSymbol, Symbol, SymbolGroup};

/// Optional feature groups gated behind an extension probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// EFX filter objects (`alGenFilters` and friends)
    FilterManagement,
}

impl Capability {
    /// Every capability, for reporting
    pub const ALL: [Capability; 1] = [Capability::FilterManagement];

    /// Extension string probed to enable this capability
    pub const fn extension(self) -> &'static str {
        match self {
            Capability::FilterManagement => crate::ffi::extensions::ALC_EXT_EFX,
        }
    }
}

type FilterSlots = [Option<RawSymbol>; FilterSymbol::COUNT];

/// Resolved entry points for one binding
pub struct BindingTable {
    core: [Option<RawSymbol>; Symbol::COUNT],
    filters: Option<FilterSlots>,
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            core: [None; Symbol::COUNT],
            filters: None,
        }
    }

    /// Look up `name` in `library`; absent symbols are `None`, not an error
    pub fn resolve(library: &dyn SharedLibrary, name: &str) -> Option<RawSymbol> {
        library.symbol(name)
    }

    /// Resolve `symbol` into its slot, failing if the library lacks it
    pub fn bind_required(
        &mut self,
        library: &dyn SharedLibrary,
        symbol: Symbol,
    ) -> BindingResult<()> {
        match Self::resolve(library, symbol.name()) {
            Some(address) => {
                trace!("Bound {} at {:p}", symbol, address);
                self.core[symbol.index()] = Some(address);
                Ok(())
            }
            None => {
                warn!("Required symbol {} missing from {}", symbol, library.path());
                Err(BindingError::RequiredSymbolMissing(symbol.name()))
            }
        }
    }

    /// Resolve every symbol of a required group, stopping at the first gap
    pub fn bind_group(
        &mut self,
        library: &dyn SharedLibrary,
        group: SymbolGroup,
    ) -> BindingResult<()> {
        for symbol in Symbol::in_group(group) {
            self.bind_required(library, symbol)?;
        }
        debug!("Bound {:?} symbols from {}", group, library.path());
        Ok(())
    }

    /// Resolve the filter block, tolerating individual gaps
    ///
    /// Marks the block present even if every entry came back `None`: the
    /// extension was advertised, only the entry points are missing.
    pub fn bind_filters<F>(&mut self, mut resolver: F)
    where
        F: FnMut(&str) -> Option<RawSymbol>,
    {
        let mut slots: FilterSlots = [None; FilterSymbol::COUNT];
        for symbol in FilterSymbol::ALL {
            slots[symbol.index()] = resolver(symbol.name());
            if slots[symbol.index()].is_none() {
                debug!("Optional symbol {} not available", symbol);
            }
        }
        self.filters = Some(slots);
    }

    /// Mark the filter block absent
    pub fn clear_filters(&mut self) {
        self.filters = None;
    }

    /// Null every entry, including the filter block
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn core_slot(&self, symbol: Symbol) -> Option<RawSymbol> {
        self.core[symbol.index()]
    }

    pub(crate) fn filter_slot(&self, symbol: FilterSymbol) -> Option<RawSymbol> {
        self.filters.as_ref().and_then(|slots| slots[symbol.index()])
    }

    /// Whether `symbol` currently has an address
    pub fn is_bound(&self, symbol: Symbol) -> bool {
        self.core_slot(symbol).is_some()
    }

    /// Whether the optional `symbol` currently has an address
    pub fn is_filter_bound(&self, symbol: FilterSymbol) -> bool {
        self.filter_slot(symbol).is_some()
    }

    /// Unbound symbols of `group`
    pub fn missing(&self, group: SymbolGroup) -> Vec<Symbol> {
        Symbol::in_group(group).filter(|s| !self.is_bound(*s)).collect()
    }

    /// Every required slot holds an address
    pub fn is_complete(&self) -> bool {
        self.core.iter().all(Option::is_some)
    }

    /// No slot holds an address and the filter block is absent
    pub fn is_empty(&self) -> bool {
        self.core.iter().all(Option::is_none) && self.filters.is_none()
    }

    /// Whether the capability's extension was detected
    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::FilterManagement => self.filters.is_some(),
        }
    }

    /// Number of bound entries, required and optional
    pub fn bound_count(&self) -> usize {
        let core = self.core.iter().filter(|s| s.is_some()).count();
        let filters = self
            .filters
            .as_ref()
            .map(|slots| slots.iter().filter(|s| s.is_some()).count())
            .unwrap_or(0);
        core + filters
    }
}

impl std::fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingTable")
            .field("bound", &self.bound_count())
            .field("required", &Symbol::COUNT)
            .field("filters", &self.filters.is_some())
            .finish()
    }
}
