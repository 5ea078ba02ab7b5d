//! Binding Diagnostics
//!
//! Read-only introspection of a ready binding: implementation strings,
//! device enumeration and the active device. Outside `Ready` every query
//! answers "nothing" instead of calling into the library.

use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ffi::{
    extensions, ALenum, ALC_ALL_DEVICES_SPECIFIER, ALC_DEVICE_SPECIFIER, AL_EXTENSIONS,
    AL_RENDERER, AL_VENDOR, AL_VERSION,
};
use crate::lifecycle::{AudioBinding, BindingState};
use crate::table::Capability;

/// Identity of the bound OpenAL implementation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    /// Space-separated `AL_EXTENSIONS`, split
    pub extensions: Vec<String>,
}

/// Snapshot of everything the reporter knows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingReport {
    pub state: BindingState,
    pub library: Option<String>,
    pub implementation: Option<ImplementationInfo>,
    pub devices: Vec<String>,
    pub current_device: Option<String>,
    pub capabilities: Vec<Capability>,
}

/// Device names from a null-separated, double-null-terminated buffer
///
/// Borrows the buffer; it is read lazily and never copied.
#[derive(Debug, Clone)]
pub struct DeviceList<'a> {
    remaining: &'a [u8],
}

impl<'a> DeviceList<'a> {
    /// A list with no entries
    pub const fn empty() -> Self {
        Self { remaining: &[] }
    }

    /// Walk `buffer`, stopping at an empty segment (the double null) or at
    /// the end of the slice
    pub const fn from_bytes(buffer: &'a [u8]) -> Self {
        Self { remaining: buffer }
    }

    /// Wrap a list returned by `alcGetString`
    ///
    /// # Safety
    ///
    /// `list` must be null or point to a double-null-terminated buffer that
    /// stays valid and unchanged for `'a`.
    pub unsafe fn from_ptr(list: *const c_char) -> Self {
        if list.is_null() {
            return Self::empty();
        }

        let base = list.cast::<u8>();
        let mut len = 0;
        while *base.add(len) != 0 {
            while *base.add(len) != 0 {
                len += 1;
            }
            len += 1;
        }

        Self::from_bytes(std::slice::from_raw_parts(base, len))
    }
}

impl<'a> Iterator for DeviceList<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining.first() {
            None | Some(0) => {
                self.remaining = &[];
                None
            }
            Some(_) => {
                let end = self
                    .remaining
                    .iter()
                    .position(|&b| b == 0)
                    .unwrap_or(self.remaining.len());
                let name = String::from_utf8_lossy(&self.remaining[..end]);
                self.remaining = self.remaining.get(end + 1..).unwrap_or(&[]);
                Some(name)
            }
        }
    }
}

impl std::iter::FusedIterator for DeviceList<'_> {}

/// Read-only view over an `AudioBinding`
pub struct Diagnostics<'a> {
    binding: &'a AudioBinding,
}

impl<'a> Diagnostics<'a> {
    pub fn new(binding: &'a AudioBinding) -> Self {
        Self { binding }
    }

    fn ready(&self) -> bool {
        self.binding.state() == BindingState::Ready
    }

    fn al_string(&self, param: ALenum) -> Option<String> {
        let get_string = self.binding.table().al_get_string()?;
        // SAFETY: the binding is ready, so its context is current; the
        // returned string is owned by the library.
        unsafe { owned_string(get_string(param)) }
    }

    /// Vendor, renderer, version and extension list
    ///
    /// `None` unless the binding is ready.
    pub fn describe_implementation(&self) -> Option<ImplementationInfo> {
        if !self.ready() {
            return None;
        }

        Some(ImplementationInfo {
            vendor: self.al_string(AL_VENDOR).unwrap_or_default(),
            renderer: self.al_string(AL_RENDERER).unwrap_or_default(),
            version: self.al_string(AL_VERSION).unwrap_or_default(),
            extensions: self
                .al_string(AL_EXTENSIONS)
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }

    /// Whether the library can list every output device
    pub fn enumeration_supported(&self) -> bool {
        self.ready()
            && self
                .binding
                .alc_extension_present(ptr::null_mut(), extensions::ALC_ENUMERATE_ALL_EXT)
    }

    /// Names of every output device the library knows about
    ///
    /// Re-queries the library on every call. Empty when the binding is not
    /// ready, when enumeration is unsupported, or when the library reports
    /// no devices.
    pub fn enumerate_devices(&self) -> DeviceList<'a> {
        if !self.enumeration_supported() {
            return DeviceList::empty();
        }
        let Some(get_string) = self.binding.table().alc_get_string() else {
            return DeviceList::empty();
        };

        // SAFETY: the list is owned by the library, which stays loaded while
        // `self.binding` is borrowed.
        unsafe { DeviceList::from_ptr(get_string(ptr::null_mut(), ALC_ALL_DEVICES_SPECIFIER)) }
    }

    /// Name the open device reports for itself
    ///
    /// `None` means "no device": not ready, no device open, or enumeration
    /// unsupported.
    pub fn current_device_name(&self) -> Option<String> {
        if !self.enumeration_supported() || !self.binding.has_device() {
            return None;
        }
        let get_string = self.binding.table().alc_get_string()?;

        // SAFETY: the device is live while the binding is ready.
        unsafe { owned_string(get_string(self.binding.device_ptr(), ALC_DEVICE_SPECIFIER)) }
    }

    pub fn report(&self) -> BindingReport {
        BindingReport {
            state: self.binding.state(),
            library: self.binding.library_path().map(str::to_string),
            implementation: self.describe_implementation(),
            devices: self.enumerate_devices().map(Cow::into_owned).collect(),
            current_device: self.current_device_name(),
            capabilities: Capability::ALL
                .into_iter()
                .filter(|c| self.binding.has_capability(*c))
                .collect(),
        }
    }

    /// Narrate the binding through the log
    pub fn log_summary(&self) {
        let Some(implementation) = self.describe_implementation() else {
            info!("Audio binding not ready");
            return;
        };

        info!("OpenAL settings:");
        info!("AL_VENDOR: {}", implementation.vendor);
        info!("AL_RENDERER: {}", implementation.renderer);
        info!("AL_VERSION: {}", implementation.version);
        info!("AL_EXTENSIONS: {}", implementation.extensions.join(" "));

        if !self.enumeration_supported() {
            return;
        }

        info!("Available OpenAL devices:");
        let mut devices = self.enumerate_devices().peekable();
        if devices.peek().is_none() {
            info!("- No devices found. Depending on your platform this may be expected and doesn't indicate a problem!");
        }
        for device in devices {
            info!("- {}", device);
        }

        info!("Current OpenAL device:");
        match self.current_device_name() {
            Some(name) => info!("- {}", name),
            None => info!("- No OpenAL device in use"),
        }
    }
}

unsafe fn owned_string(s: *const c_char) -> Option<String> {
    if s.is_null() {
        None
    } else {
        Some(CStr::from_ptr(s).to_string_lossy().into_owned())
    }
}
