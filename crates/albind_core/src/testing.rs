//! Fake OpenAL library for tests
//!
//! Exposes every symbol of the binding table. The handful of entry points the
//! lifecycle actually calls are real `extern "C"` functions that read their
//! behaviour from thread-local options and count what they acquire and
//! release; every other symbol points at a no-op stub that is never called.
//!
//! State is thread-local, so each `#[test]` (its own thread) gets a clean
//! fake as soon as it installs options.

use std::cell::RefCell;
use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::ptr::{self, NonNull};

use albind_platform::{LibraryLoader, PlatformError, RawSymbol, SharedLibrary};

use crate::ffi::*;
use crate::symbols::{FilterSymbol, Symbol};

/// Behaviour of the fake library
#[derive(Debug, Clone)]
pub struct FakeOptions {
    /// Refuse to load at all
    pub fail_load: bool,
    /// Symbols the library does not export (also hidden from `alGetProcAddress`)
    pub missing: Vec<&'static str>,
    pub fail_open_device: bool,
    pub fail_create_context: bool,
    pub fail_make_current: bool,
    /// Advertise `ALC_EXT_EFX`
    pub efx: bool,
    /// Advertise `ALC_ENUMERATE_ALL_EXT`
    pub enumerate_all: bool,
    /// Buffer returned for `ALC_ALL_DEVICES_SPECIFIER`; `None` returns null
    pub device_list: Option<&'static [u8]>,
    /// Name returned for `ALC_DEVICE_SPECIFIER` on the open device
    pub device_name: Option<&'static [u8]>,
}

impl Default for FakeOptions {
    fn default() -> Self {
        Self {
            fail_load: false,
            missing: Vec::new(),
            fail_open_device: false,
            fail_create_context: false,
            fail_make_current: false,
            efx: true,
            enumerate_all: true,
            device_list: Some(&b"Fake Speakers\0Fake Headphones\0\0"[..]),
            device_name: Some(&b"Fake Speakers\0"[..]),
        }
    }
}

/// What the fake has handed out and taken back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeCounters {
    pub loads: usize,
    pub unloads: usize,
    pub devices_opened: usize,
    pub devices_closed: usize,
    pub contexts_created: usize,
    pub contexts_destroyed: usize,
    /// Destroy was called on the context while it was still current
    pub destroyed_while_current: usize,
    /// Name passed to the last `alcOpenDevice`; `None` for the default device
    pub last_device_request: Option<String>,
    /// Whether a context is current right now
    pub context_current: bool,
}

impl FakeCounters {
    /// Everything acquired has been released
    pub fn balanced(&self) -> bool {
        self.loads == self.unloads
            && self.devices_opened == self.devices_closed
            && self.contexts_created == self.contexts_destroyed
            && !self.context_current
    }
}

#[derive(Default)]
struct FakeState {
    options: Option<FakeOptions>,
    counters: FakeCounters,
}

thread_local! {
    static STATE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

/// Install `options` and zero the counters
pub fn install(options: FakeOptions) {
    STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.options = Some(options);
        state.counters = FakeCounters::default();
    });
}

/// Change options without touching the counters
pub fn update<F: FnOnce(&mut FakeOptions)>(f: F) {
    STATE.with(|s| {
        let mut state = s.borrow_mut();
        f(state.options.get_or_insert_with(FakeOptions::default));
    });
}

/// Snapshot of the counters
pub fn counters() -> FakeCounters {
    STATE.with(|s| s.borrow().counters.clone())
}

fn options() -> FakeOptions {
    STATE.with(|s| s.borrow().options.clone().unwrap_or_default())
}

fn is_missing(options: &FakeOptions, name: &str) -> bool {
    options.missing.iter().any(|m| *m == name)
}

fn with_counters<F: FnOnce(&mut FakeCounters)>(f: F) {
    STATE.with(|s| f(&mut s.borrow_mut().counters));
}

static DEVICE_TOKEN: u8 = 0;
static CONTEXT_TOKEN: u8 = 0;

fn device_token() -> *mut ALCdevice {
    &DEVICE_TOKEN as *const u8 as *mut ALCdevice
}

fn context_token() -> *mut ALCcontext {
    &CONTEXT_TOKEN as *const u8 as *mut ALCcontext
}

unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        None
    } else {
        CStr::from_ptr(ptr).to_str().ok()
    }
}

extern "C" fn stub() {}

unsafe extern "C" fn fake_alc_open_device(name: *const ALCchar) -> *mut ALCdevice {
    let request = c_str(name).map(str::to_string);
    with_counters(|c| c.last_device_request = request);
    if options().fail_open_device {
        return ptr::null_mut();
    }
    with_counters(|c| c.devices_opened += 1);
    device_token()
}

unsafe extern "C" fn fake_alc_close_device(_device: *mut ALCdevice) -> ALCboolean {
    with_counters(|c| c.devices_closed += 1);
    ALC_TRUE
}

unsafe extern "C" fn fake_alc_create_context(
    _device: *mut ALCdevice,
    _attrs: *const ALCint,
) -> *mut ALCcontext {
    if options().fail_create_context {
        return ptr::null_mut();
    }
    with_counters(|c| c.contexts_created += 1);
    context_token()
}

unsafe extern "C" fn fake_alc_make_context_current(context: *mut ALCcontext) -> ALCboolean {
    if context.is_null() {
        with_counters(|c| c.context_current = false);
        return ALC_TRUE;
    }
    if options().fail_make_current {
        return ALC_FALSE;
    }
    with_counters(|c| c.context_current = true);
    ALC_TRUE
}

unsafe extern "C" fn fake_alc_destroy_context(_context: *mut ALCcontext) {
    with_counters(|c| {
        if c.context_current {
            c.destroyed_while_current += 1;
        }
        c.contexts_destroyed += 1;
    });
}

unsafe extern "C" fn fake_alc_get_error(_device: *mut ALCdevice) -> ALCenum {
    let opts = options();
    if opts.fail_open_device {
        ALC_INVALID_VALUE
    } else if opts.fail_create_context {
        ALC_INVALID_DEVICE
    } else {
        ALC_NO_ERROR
    }
}

unsafe extern "C" fn fake_alc_is_extension_present(
    _device: *mut ALCdevice,
    name: *const ALCchar,
) -> ALCboolean {
    let opts = options();
    let present = match c_str(name) {
        Some(extensions::ALC_EXT_EFX) => opts.efx,
        Some(extensions::ALC_ENUMERATE_ALL_EXT) => opts.enumerate_all,
        _ => false,
    };
    if present {
        ALC_TRUE
    } else {
        ALC_FALSE
    }
}

unsafe extern "C" fn fake_alc_get_string(device: *mut ALCdevice, param: ALCenum) -> *const ALCchar {
    let opts = options();
    let bytes = match param {
        ALC_ALL_DEVICES_SPECIFIER if device.is_null() => opts.device_list,
        ALC_DEVICE_SPECIFIER if !device.is_null() => opts.device_name,
        _ => None,
    };
    bytes.map_or(ptr::null(), |b| b.as_ptr() as *const ALCchar)
}

unsafe extern "C" fn fake_al_get_string(param: ALenum) -> *const ALchar {
    let bytes: &'static [u8] = match param {
        AL_VENDOR => b"albind test vendor\0",
        AL_RENDERER => b"albind fake renderer\0",
        AL_VERSION => b"1.1 albind-fake\0",
        AL_EXTENSIONS => b"AL_EXT_FLOAT32 AL_SOFT_loop_points\0",
        _ => return ptr::null(),
    };
    bytes.as_ptr() as *const ALchar
}

unsafe extern "C" fn fake_al_get_proc_address(name: *const ALchar) -> *mut c_void {
    let opts = options();
    match c_str(name) {
        Some(n) if FilterSymbol::from_name(n).is_some() && !is_missing(&opts, n) => {
            stub as *const () as *mut c_void
        }
        _ => ptr::null_mut(),
    }
}

fn address_of(name: &str) -> *mut c_void {
    let f: *const () = match Symbol::from_name(name) {
        Some(Symbol::AlcOpenDevice) => fake_alc_open_device as *const (),
        Some(Symbol::AlcCloseDevice) => fake_alc_close_device as *const (),
        Some(Symbol::AlcCreateContext) => fake_alc_create_context as *const (),
        Some(Symbol::AlcMakeContextCurrent) => fake_alc_make_context_current as *const (),
        Some(Symbol::AlcDestroyContext) => fake_alc_destroy_context as *const (),
        Some(Symbol::AlcGetError) => fake_alc_get_error as *const (),
        Some(Symbol::AlcIsExtensionPresent) => fake_alc_is_extension_present as *const (),
        Some(Symbol::AlcGetString) => fake_alc_get_string as *const (),
        Some(Symbol::AlGetString) => fake_al_get_string as *const (),
        Some(Symbol::AlGetProcAddress) => fake_al_get_proc_address as *const (),
        Some(_) => stub as *const (),
        None if FilterSymbol::from_name(name).is_some() => stub as *const (),
        None => ptr::null(),
    };
    f as *mut c_void
}

/// A fake loaded library; dropping it counts as an unload
pub struct FakeLibrary {
    path: String,
}

impl FakeLibrary {
    /// Install `options` and hand out a library directly, bypassing a loader
    pub fn new(options: FakeOptions) -> Self {
        install(options);
        Self::open("libfake-openal.so")
    }

    fn open(path: &str) -> Self {
        with_counters(|c| c.loads += 1);
        Self {
            path: path.to_string(),
        }
    }
}

impl SharedLibrary for FakeLibrary {
    fn path(&self) -> &str {
        &self.path
    }

    fn symbol(&self, name: &str) -> Option<RawSymbol> {
        if is_missing(&options(), name) {
            return None;
        }
        NonNull::new(address_of(name))
    }
}

impl Drop for FakeLibrary {
    fn drop(&mut self) {
        with_counters(|c| c.unloads += 1);
    }
}

/// Loader handing out `FakeLibrary` values
pub struct FakeLoader;

impl FakeLoader {
    /// Install `options` and return a loader
    pub fn new(options: FakeOptions) -> Self {
        install(options);
        Self
    }
}

impl LibraryLoader for FakeLoader {
    fn load(&self, path: &str) -> Result<Box<dyn SharedLibrary>, PlatformError> {
        if options().fail_load {
            return Err(PlatformError::LibraryLoadFailed {
                path: path.to_string(),
                reason: "fake library refused to load".into(),
            });
        }
        Ok(Box::new(FakeLibrary::open(path)))
    }
}
