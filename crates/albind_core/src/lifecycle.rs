//! Binding Lifecycle
//!
//! `AudioBinding` owns the loaded library, the open device and the current
//! context, and drives them through a fixed sequence:
//!
//! ```text
//! Unloaded ─▶ Loading ─▶ ManagementBound ─▶ DeviceOpen ─▶ ContextCreated
//!                                                              │
//!     Ready ◀── ApiBound ◀───────────── ContextCurrent ◀───────┘
//!
//! any failure ─▶ TearingDown ─▶ Unloaded
//! ```
//!
//! Teardown releases in reverse: context (after clearing it as current),
//! device, table, library. A failed `initialize` always lands in `Unloaded`
//! with nothing held, so callers never see a half-built binding.
//!
//! # Threading
//!
//! The binding holds raw device/context pointers and is neither `Send` nor
//! `Sync`. Drive it from one thread.

use std::ffi::CString;
use std::ptr::{self, NonNull};

use albind_platform::{LibraryLoader, PlatformError, SharedLibrary, SystemLoader};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use crate::diagnostics::Diagnostics;
use crate::error::{BindingError, BindingResult};
use crate::ffi::{self, ALCcontext, ALCdevice, ALCenum, ALC_FALSE, ALC_NO_ERROR};
use crate::symbols::{Symbol, SymbolGroup};
use crate::table::{BindingTable, Capability};

/// Where the binding is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingState {
    Unloaded,
    Loading,
    ManagementBound,
    DeviceOpen,
    ContextCreated,
    ContextCurrent,
    ApiBound,
    Ready,
    /// Transient: releasing whatever was acquired
    TearingDown,
}

/// Runtime binding to an OpenAL implementation
pub struct AudioBinding {
    loader: Box<dyn LibraryLoader>,
    library: Option<Box<dyn SharedLibrary>>,
    device: Option<NonNull<ALCdevice>>,
    context: Option<NonNull<ALCcontext>>,
    table: BindingTable,
    state: BindingState,
    last_error: Option<BindingError>,
}

impl Default for AudioBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBinding {
    /// Create an unloaded binding that uses the OS dynamic linker
    pub fn new() -> Self {
        Self::with_loader(Box::new(SystemLoader))
    }

    /// Create an unloaded binding that loads through `loader`
    pub fn with_loader(loader: Box<dyn LibraryLoader>) -> Self {
        Self {
            loader,
            library: None,
            device: None,
            context: None,
            table: BindingTable::new(),
            state: BindingState::Unloaded,
            last_error: None,
        }
    }

    /// Load `library_path`, open `device_name` (empty for the default
    /// device) and bind every entry point
    ///
    /// Returns `false` on any failure, leaving the binding unloaded. The
    /// reason is available from `last_error()`.
    pub fn initialize(&mut self, library_path: &str, device_name: &str) -> bool {
        match self.try_initialize(library_path, device_name) {
            Ok(()) => true,
            Err(e) => {
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Like `initialize`, returning the failure reason instead of recording it
    pub fn try_initialize(&mut self, library_path: &str, device_name: &str) -> BindingResult<()> {
        if self.state != BindingState::Unloaded {
            warn!("Binding already in state {:?}, shutting down first", self.state);
            self.shutdown();
        }
        self.last_error = None;

        info!("LoadLibrary({})", library_path);

        match self.run_sequence(library_path, device_name) {
            Ok(()) => {
                self.diagnostics().log_summary();
                Ok(())
            }
            Err(e) => {
                error!("Audio binding failed: {}", e);
                self.shutdown();
                Err(e)
            }
        }
    }

    fn run_sequence(&mut self, library_path: &str, device_name: &str) -> BindingResult<()> {
        self.transition(BindingState::Loading);
        let library = self.loader.load(library_path).map_err(|e| {
            warn!("Loading {} failed! Disabling audio binding.", library_path);
            e
        })?;
        self.library = Some(library);

        self.bind_group(SymbolGroup::Management)?;
        self.transition(BindingState::ManagementBound);

        self.open_device(device_name)?;
        self.transition(BindingState::DeviceOpen);

        self.create_context()?;
        self.transition(BindingState::ContextCreated);

        self.make_context_current()?;
        self.transition(BindingState::ContextCurrent);

        self.bind_group(SymbolGroup::Api)?;
        self.transition(BindingState::ApiBound);

        self.detect_extensions();
        self.transition(BindingState::Ready);
        Ok(())
    }

    fn bind_group(&mut self, group: SymbolGroup) -> BindingResult<()> {
        let library = self
            .library
            .as_deref()
            .ok_or(BindingError::LibraryLoadFailed(PlatformError::NotLoaded))?;
        self.table.bind_group(library, group)
    }

    fn open_device(&mut self, device_name: &str) -> BindingResult<()> {
        let open = required(self.table.alc_open_device(), Symbol::AlcOpenDevice)?;

        let request = if device_name.is_empty() {
            None
        } else {
            Some(CString::new(device_name).map_err(|_| {
                BindingError::DeviceOpenFailed(format!(
                    "device name contains a NUL byte: {:?}",
                    device_name
                ))
            })?)
        };

        info!(
            "...opening audio device: {}",
            if device_name.is_empty() { "(default)" } else { device_name }
        );

        // SAFETY: `open` was resolved from `alcOpenDevice`; the name is either
        // null (default device) or a valid NUL-terminated string.
        let device = unsafe { open(request.as_ref().map_or(ptr::null(), |n| n.as_ptr())) };

        match NonNull::new(device) {
            Some(device) => {
                self.device = Some(device);
                debug!("...opening audio device: ok");
                Ok(())
            }
            None => {
                let code = self.alc_error(ptr::null_mut());
                debug!("...opening audio device: failed ({})", ffi::alc_error_name(code));
                Err(BindingError::DeviceOpenFailed(if device_name.is_empty() {
                    "default device".to_string()
                } else {
                    device_name.to_string()
                }))
            }
        }
    }

    fn create_context(&mut self) -> BindingResult<()> {
        let create = required(self.table.alc_create_context(), Symbol::AlcCreateContext)?;
        let device = self.device_ptr();

        info!("...creating audio context");

        // SAFETY: `device` is the live device opened above; a null attribute
        // list requests defaults.
        let context = unsafe { create(device, ptr::null()) };

        match NonNull::new(context) {
            Some(context) => {
                self.context = Some(context);
                debug!("...creating audio context: ok");
                Ok(())
            }
            None => {
                let code = self.alc_error(device);
                debug!("...creating audio context: failed");
                Err(BindingError::ContextCreateFailed(
                    ffi::alc_error_name(code).to_string(),
                ))
            }
        }
    }

    fn make_context_current(&mut self) -> BindingResult<()> {
        let make_current = required(
            self.table.alc_make_context_current(),
            Symbol::AlcMakeContextCurrent,
        )?;

        info!("...making context current");

        // SAFETY: the context was created on the live device above.
        let ok = unsafe { make_current(self.context_ptr()) };
        if ok == ALC_FALSE {
            debug!("...making context current: failed");
            return Err(BindingError::ContextMakeCurrentFailed);
        }

        debug!("...making context current: ok");
        Ok(())
    }

    /// Probe `ALC_EXT_EFX` and bind the filter block if present
    ///
    /// Runs after the context is current: `alGetProcAddress` answers for the
    /// current context.
    fn detect_extensions(&mut self) {
        let capability = Capability::FilterManagement;
        if !self.alc_extension_present(self.device_ptr(), capability.extension()) {
            self.table.clear_filters();
            if albind_platform::expects_efx() {
                warn!("{} not available, filters disabled", capability.extension());
            } else {
                debug!("{} not available on this platform", capability.extension());
            }
            return;
        }

        match self.table.al_get_proc_address() {
            Some(get_proc_address) => {
                self.table.bind_filters(|name| {
                    let name = CString::new(name).ok()?;
                    // SAFETY: `alGetProcAddress` takes a NUL-terminated name
                    // and returns null for unknown functions.
                    NonNull::new(unsafe { get_proc_address(name.as_ptr()) })
                });
                info!("{} detected, filters enabled", capability.extension());
            }
            None => self.table.clear_filters(),
        }
    }

    /// Release everything this binding holds
    ///
    /// Safe from any state, including `Unloaded`, and safe to repeat.
    pub fn shutdown(&mut self) {
        if self.state == BindingState::Unloaded
            && self.library.is_none()
            && self.device.is_none()
            && self.context.is_none()
        {
            return;
        }

        self.transition(BindingState::TearingDown);

        if let Some(context) = self.context.take() {
            // SAFETY: the context and device came from this library, which is
            // still loaded; the table is reset only after they are released.
            unsafe {
                if let Some(make_current) = self.table.alc_make_context_current() {
                    make_current(ptr::null_mut());
                }
                if let Some(destroy) = self.table.alc_destroy_context() {
                    destroy(context.as_ptr());
                }
            }
            debug!("Audio context destroyed");
        }

        if let Some(device) = self.device.take() {
            if let Some(close) = self.table.alc_close_device() {
                // SAFETY: see above.
                if unsafe { close(device.as_ptr()) } == ALC_FALSE {
                    warn!("Audio device did not close cleanly");
                }
            }
            debug!("Audio device closed");
        }

        self.table.reset_all();

        if let Some(library) = self.library.take() {
            info!("Unloading {}", library.path());
        }

        self.transition(BindingState::Unloaded);
    }

    fn transition(&mut self, next: BindingState) {
        trace!("Binding state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn alc_error(&self, device: *mut ALCdevice) -> ALCenum {
        match self.table.alc_get_error() {
            // SAFETY: `alcGetError` accepts null or a live device.
            Some(get_error) => unsafe { get_error(device) },
            None => ALC_NO_ERROR,
        }
    }

    /// Ask ALC whether `name` is supported, on `device` or globally (null)
    pub(crate) fn alc_extension_present(&self, device: *mut ALCdevice, name: &str) -> bool {
        let (Some(is_present), Ok(name)) = (self.table.alc_is_extension_present(), CString::new(name))
        else {
            return false;
        };
        // SAFETY: `device` is null or live; `name` is NUL-terminated.
        unsafe { is_present(device, name.as_ptr()) != ALC_FALSE }
    }

    pub(crate) fn device_ptr(&self) -> *mut ALCdevice {
        self.device.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn context_ptr(&self) -> *mut ALCcontext {
        self.context.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Every required entry point is bound and the context is current
    pub fn is_ready(&self) -> bool {
        self.state == BindingState::Ready
    }

    /// The resolved entry points; all `None` unless the binding is ready
    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.is_ready() && self.table.has_capability(capability)
    }

    /// Reason the last `initialize` call failed, cleared by the next attempt
    pub fn last_error(&self) -> Option<&BindingError> {
        self.last_error.as_ref()
    }

    /// Path of the loaded library, if any
    pub fn library_path(&self) -> Option<&str> {
        self.library.as_deref().map(|l| l.path())
    }

    pub fn has_library(&self) -> bool {
        self.library.is_some()
    }

    pub fn has_device(&self) -> bool {
        self.device.is_some()
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Read-only diagnostics over this binding
    pub fn diagnostics(&self) -> Diagnostics<'_> {
        Diagnostics::new(self)
    }
}

impl Drop for AudioBinding {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AudioBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioBinding")
            .field("state", &self.state)
            .field("library", &self.library_path())
            .field("device", &self.device)
            .field("context", &self.context)
            .field("table", &self.table)
            .finish()
    }
}

fn required<T>(slot: Option<T>, symbol: Symbol) -> BindingResult<T> {
    slot.ok_or(BindingError::RequiredSymbolMissing(symbol.name()))
}
