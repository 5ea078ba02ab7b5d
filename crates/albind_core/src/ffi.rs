//! OpenAL / ALC FFI Types
//!
//! Raw C types and enum values from `al.h`, `alc.h` and `efx.h`. Only the
//! values this crate and its callers need are declared; everything else is
//! reachable through `alGetEnumValue` once the binding is ready.
//!
//! # Safety
//!
//! These are raw C types. The function signatures that use them live in the
//! symbol table (`symbols.rs`).

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_double, c_float, c_int, c_uint};

pub type ALboolean = c_char;
pub type ALchar = c_char;
pub type ALint = c_int;
pub type ALuint = c_uint;
pub type ALsizei = c_int;
pub type ALenum = c_int;
pub type ALfloat = c_float;
pub type ALdouble = c_double;

pub type ALCboolean = c_char;
pub type ALCchar = c_char;
pub type ALCint = c_int;
pub type ALCuint = c_uint;
pub type ALCsizei = c_int;
pub type ALCenum = c_int;

/// Opaque ALC device
#[repr(C)]
pub struct ALCdevice {
    _private: [u8; 0],
}

/// Opaque ALC context
#[repr(C)]
pub struct ALCcontext {
    _private: [u8; 0],
}

pub const AL_FALSE: ALboolean = 0;
pub const AL_TRUE: ALboolean = 1;
pub const ALC_FALSE: ALCboolean = 0;
pub const ALC_TRUE: ALCboolean = 1;

pub const AL_NO_ERROR: ALenum = 0;
pub const ALC_NO_ERROR: ALCenum = 0;

/// `alGetString` selectors
pub const AL_VENDOR: ALenum = 0xB001;
pub const AL_VERSION: ALenum = 0xB002;
pub const AL_RENDERER: ALenum = 0xB003;
pub const AL_EXTENSIONS: ALenum = 0xB004;

/// `alcGetString` selectors
pub const ALC_DEFAULT_DEVICE_SPECIFIER: ALCenum = 0x1004;
pub const ALC_DEVICE_SPECIFIER: ALCenum = 0x1005;
pub const ALC_EXTENSIONS: ALCenum = 0x1006;
pub const ALC_DEFAULT_ALL_DEVICES_SPECIFIER: ALCenum = 0x1012;
pub const ALC_ALL_DEVICES_SPECIFIER: ALCenum = 0x1013;

/// ALC error codes
pub const ALC_INVALID_DEVICE: ALCenum = 0xA001;
pub const ALC_INVALID_CONTEXT: ALCenum = 0xA002;
pub const ALC_INVALID_ENUM: ALCenum = 0xA003;
pub const ALC_INVALID_VALUE: ALCenum = 0xA004;
pub const ALC_OUT_OF_MEMORY: ALCenum = 0xA005;

/// EFX filter parameters (`efx.h`)
pub const AL_FILTER_TYPE: ALenum = 0x8001;
pub const AL_FILTER_NULL: ALint = 0x0000;
pub const AL_FILTER_LOWPASS: ALint = 0x0001;
pub const AL_LOWPASS_GAIN: ALenum = 0x0001;
pub const AL_LOWPASS_GAINHF: ALenum = 0x0002;
pub const AL_DIRECT_FILTER: ALenum = 0x20005;

/// Extension names probed during initialization
pub mod extensions {
    /// Effects extension, gates the filter functions
    pub const ALC_EXT_EFX: &str = "ALC_EXT_EFX";

    /// Full device enumeration (`ALC_ALL_DEVICES_SPECIFIER`)
    pub const ALC_ENUMERATE_ALL_EXT: &str = "ALC_ENUMERATE_ALL_EXT";
}

/// Human-readable name of an ALC error code
pub fn alc_error_name(code: ALCenum) -> &'static str {
    match code {
        ALC_NO_ERROR => "ALC_NO_ERROR",
        ALC_INVALID_DEVICE => "ALC_INVALID_DEVICE",
        ALC_INVALID_CONTEXT => "ALC_INVALID_CONTEXT",
        ALC_INVALID_ENUM => "ALC_INVALID_ENUM",
        ALC_INVALID_VALUE => "ALC_INVALID_VALUE",
        ALC_OUT_OF_MEMORY => "ALC_OUT_OF_MEMORY",
        _ => "unknown ALC error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alc_error_names() {
        assert_eq!(alc_error_name(ALC_NO_ERROR), "ALC_NO_ERROR");
        assert_eq!(alc_error_name(ALC_INVALID_DEVICE), "ALC_INVALID_DEVICE");
        assert_eq!(alc_error_name(0x1234), "unknown ALC error");
    }

    #[test]
    fn test_opaque_handles_are_zero_sized() {
        assert_eq!(std::mem::size_of::<ALCdevice>(), 0);
        assert_eq!(std::mem::size_of::<ALCcontext>(), 0);
    }
}
