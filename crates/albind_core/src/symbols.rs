//! Symbol Table
//!
//! Every entry point the binding resolves, declared once as
//! `(tag, exported name, group, C signature)`. The `symbol_table!` macro
//! turns each declaration into:
//!
//! - an enum tag with `name()`, `group()` and `index()`
//! - an `ALL` list that drives the generic resolution loop
//! - a typed accessor on `BindingTable` returning `Option<fn>`
//!
//! Required/optional is a property of the group, not of the individual
//! symbol: management and API entries are required, filter entries are not.

#![allow(clippy::type_complexity)]

use std::ffi::c_void;

use crate::ffi::*;
use crate::table::BindingTable;

/// Which part of the binding a symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolGroup {
    /// Library-level control: devices, contexts, capture
    Management,
    /// Audio object manipulation exposed to callers
    Api,
    /// EFX filter objects, gated behind `ALC_EXT_EFX`
    Filter,
}

impl SymbolGroup {
    /// Missing symbols in a required group abort initialization
    pub const fn is_required(self) -> bool {
        match self {
            SymbolGroup::Management | SymbolGroup::Api => true,
            SymbolGroup::Filter => false,
        }
    }
}

macro_rules! symbol_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $lookup:ident {
            $( $variant:ident => $sym:literal as $accessor:ident : $group:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant ),*
        }

        impl $name {
            /// Every tag, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

            /// Number of tags
            pub const COUNT: usize = Self::ALL.len();

            /// Exported symbol name
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $sym ),*
                }
            }

            pub const fn group(self) -> SymbolGroup {
                match self {
                    $( $name::$variant => SymbolGroup::$group ),*
                }
            }

            /// Slot index in the binding table
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Find a tag by its exported name
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.name() == name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl BindingTable {
            $(
                #[doc = concat!("`", $sym, "`, if bound")]
                #[inline]
                pub fn $accessor(&self) -> Option<$fty> {
                    self.$lookup($name::$variant).map(|ptr| {
                        // SAFETY: the slot only ever holds the address exported
                        // under this symbol's name, whose C signature is `$fty`.
                        unsafe { std::mem::transmute::<*mut c_void, $fty>(ptr.as_ptr()) }
                    })
                }
            )*
        }
    };
}

symbol_table! {
    /// Required entry points: ALC management and the core AL API
    pub enum Symbol in core_slot {
        // Context management
        AlcCreateContext => "alcCreateContext" as alc_create_context: Management:
            unsafe extern "C" fn(*mut ALCdevice, *const ALCint) -> *mut ALCcontext,
        AlcMakeContextCurrent => "alcMakeContextCurrent" as alc_make_context_current: Management:
            unsafe extern "C" fn(*mut ALCcontext) -> ALCboolean,
        AlcProcessContext => "alcProcessContext" as alc_process_context: Management:
            unsafe extern "C" fn(*mut ALCcontext),
        AlcSuspendContext => "alcSuspendContext" as alc_suspend_context: Management:
            unsafe extern "C" fn(*mut ALCcontext),
        AlcDestroyContext => "alcDestroyContext" as alc_destroy_context: Management:
            unsafe extern "C" fn(*mut ALCcontext),
        AlcGetCurrentContext => "alcGetCurrentContext" as alc_get_current_context: Management:
            unsafe extern "C" fn() -> *mut ALCcontext,
        AlcGetContextsDevice => "alcGetContextsDevice" as alc_get_contexts_device: Management:
            unsafe extern "C" fn(*mut ALCcontext) -> *mut ALCdevice,

        // Device management
        AlcOpenDevice => "alcOpenDevice" as alc_open_device: Management:
            unsafe extern "C" fn(*const ALCchar) -> *mut ALCdevice,
        AlcCloseDevice => "alcCloseDevice" as alc_close_device: Management:
            unsafe extern "C" fn(*mut ALCdevice) -> ALCboolean,

        // Errors, extensions, queries
        AlcGetError => "alcGetError" as alc_get_error: Management:
            unsafe extern "C" fn(*mut ALCdevice) -> ALCenum,
        AlcIsExtensionPresent => "alcIsExtensionPresent" as alc_is_extension_present: Management:
            unsafe extern "C" fn(*mut ALCdevice, *const ALCchar) -> ALCboolean,
        AlcGetProcAddress => "alcGetProcAddress" as alc_get_proc_address: Management:
            unsafe extern "C" fn(*mut ALCdevice, *const ALCchar) -> *mut c_void,
        AlcGetEnumValue => "alcGetEnumValue" as alc_get_enum_value: Management:
            unsafe extern "C" fn(*mut ALCdevice, *const ALCchar) -> ALCenum,
        AlcGetString => "alcGetString" as alc_get_string: Management:
            unsafe extern "C" fn(*mut ALCdevice, ALCenum) -> *const ALCchar,
        AlcGetIntegerv => "alcGetIntegerv" as alc_get_integerv: Management:
            unsafe extern "C" fn(*mut ALCdevice, ALCenum, ALCsizei, *mut ALCint),

        // Capture
        AlcCaptureOpenDevice => "alcCaptureOpenDevice" as alc_capture_open_device: Management:
            unsafe extern "C" fn(*const ALCchar, ALCuint, ALCenum, ALCsizei) -> *mut ALCdevice,
        AlcCaptureCloseDevice => "alcCaptureCloseDevice" as alc_capture_close_device: Management:
            unsafe extern "C" fn(*mut ALCdevice) -> ALCboolean,
        AlcCaptureStart => "alcCaptureStart" as alc_capture_start: Management:
            unsafe extern "C" fn(*mut ALCdevice),
        AlcCaptureStop => "alcCaptureStop" as alc_capture_stop: Management:
            unsafe extern "C" fn(*mut ALCdevice),
        AlcCaptureSamples => "alcCaptureSamples" as alc_capture_samples: Management:
            unsafe extern "C" fn(*mut ALCdevice, *mut c_void, ALCsizei),

        // State
        AlEnable => "alEnable" as al_enable: Api:
            unsafe extern "C" fn(ALenum),
        AlDisable => "alDisable" as al_disable: Api:
            unsafe extern "C" fn(ALenum),
        AlIsEnabled => "alIsEnabled" as al_is_enabled: Api:
            unsafe extern "C" fn(ALenum) -> ALboolean,
        AlGetString => "alGetString" as al_get_string: Api:
            unsafe extern "C" fn(ALenum) -> *const ALchar,
        AlGetBooleanv => "alGetBooleanv" as al_get_booleanv: Api:
            unsafe extern "C" fn(ALenum, *mut ALboolean),
        AlGetIntegerv => "alGetIntegerv" as al_get_integerv: Api:
            unsafe extern "C" fn(ALenum, *mut ALint),
        AlGetFloatv => "alGetFloatv" as al_get_floatv: Api:
            unsafe extern "C" fn(ALenum, *mut ALfloat),
        AlGetDoublev => "alGetDoublev" as al_get_doublev: Api:
            unsafe extern "C" fn(ALenum, *mut ALdouble),
        AlGetBoolean => "alGetBoolean" as al_get_boolean: Api:
            unsafe extern "C" fn(ALenum) -> ALboolean,
        AlGetInteger => "alGetInteger" as al_get_integer: Api:
            unsafe extern "C" fn(ALenum) -> ALint,
        AlGetFloat => "alGetFloat" as al_get_float: Api:
            unsafe extern "C" fn(ALenum) -> ALfloat,
        AlGetDouble => "alGetDouble" as al_get_double: Api:
            unsafe extern "C" fn(ALenum) -> ALdouble,
        AlGetError => "alGetError" as al_get_error: Api:
            unsafe extern "C" fn() -> ALenum,
        AlIsExtensionPresent => "alIsExtensionPresent" as al_is_extension_present: Api:
            unsafe extern "C" fn(*const ALchar) -> ALboolean,
        AlGetProcAddress => "alGetProcAddress" as al_get_proc_address: Api:
            unsafe extern "C" fn(*const ALchar) -> *mut c_void,
        AlGetEnumValue => "alGetEnumValue" as al_get_enum_value: Api:
            unsafe extern "C" fn(*const ALchar) -> ALenum,

        // Listener
        AlListenerf => "alListenerf" as al_listenerf: Api:
            unsafe extern "C" fn(ALenum, ALfloat),
        AlListener3f => "alListener3f" as al_listener3f: Api:
            unsafe extern "C" fn(ALenum, ALfloat, ALfloat, ALfloat),
        AlListenerfv => "alListenerfv" as al_listenerfv: Api:
            unsafe extern "C" fn(ALenum, *const ALfloat),
        AlListeneri => "alListeneri" as al_listeneri: Api:
            unsafe extern "C" fn(ALenum, ALint),
        AlListener3i => "alListener3i" as al_listener3i: Api:
            unsafe extern "C" fn(ALenum, ALint, ALint, ALint),
        AlListeneriv => "alListeneriv" as al_listeneriv: Api:
            unsafe extern "C" fn(ALenum, *const ALint),
        AlGetListenerf => "alGetListenerf" as al_get_listenerf: Api:
            unsafe extern "C" fn(ALenum, *mut ALfloat),
        AlGetListener3f => "alGetListener3f" as al_get_listener3f: Api:
            unsafe extern "C" fn(ALenum, *mut ALfloat, *mut ALfloat, *mut ALfloat),
        AlGetListenerfv => "alGetListenerfv" as al_get_listenerfv: Api:
            unsafe extern "C" fn(ALenum, *mut ALfloat),
        AlGetListeneri => "alGetListeneri" as al_get_listeneri: Api:
            unsafe extern "C" fn(ALenum, *mut ALint),
        AlGetListener3i => "alGetListener3i" as al_get_listener3i: Api:
            unsafe extern "C" fn(ALenum, *mut ALint, *mut ALint, *mut ALint),
        AlGetListeneriv => "alGetListeneriv" as al_get_listeneriv: Api:
            unsafe extern "C" fn(ALenum, *mut ALint),

        // Sources
        AlGenSources => "alGenSources" as al_gen_sources: Api:
            unsafe extern "C" fn(ALsizei, *mut ALuint),
        AlDeleteSources => "alDeleteSources" as al_delete_sources: Api:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlIsSource => "alIsSource" as al_is_source: Api:
            unsafe extern "C" fn(ALuint) -> ALboolean,
        AlSourcef => "alSourcef" as al_sourcef: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALfloat),
        AlSource3f => "alSource3f" as al_source3f: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALfloat, ALfloat, ALfloat),
        AlSourcefv => "alSourcefv" as al_sourcefv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *const ALfloat),
        AlSourcei => "alSourcei" as al_sourcei: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALint),
        AlSource3i => "alSource3i" as al_source3i: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALint, ALint, ALint),
        AlSourceiv => "alSourceiv" as al_sourceiv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *const ALint),
        AlGetSourcef => "alGetSourcef" as al_get_sourcef: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALfloat),
        AlGetSource3f => "alGetSource3f" as al_get_source3f: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALfloat, *mut ALfloat, *mut ALfloat),
        AlGetSourcefv => "alGetSourcefv" as al_get_sourcefv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALfloat),
        AlGetSourcei => "alGetSourcei" as al_get_sourcei: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALint),
        AlGetSource3i => "alGetSource3i" as al_get_source3i: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALint, *mut ALint, *mut ALint),
        AlGetSourceiv => "alGetSourceiv" as al_get_sourceiv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALint),

        // Transport
        AlSourcePlayv => "alSourcePlayv" as al_source_playv: Api:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlSourceStopv => "alSourceStopv" as al_source_stopv: Api:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlSourceRewindv => "alSourceRewindv" as al_source_rewindv: Api:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlSourcePausev => "alSourcePausev" as al_source_pausev: Api:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlSourcePlay => "alSourcePlay" as al_source_play: Api:
            unsafe extern "C" fn(ALuint),
        AlSourceStop => "alSourceStop" as al_source_stop: Api:
            unsafe extern "C" fn(ALuint),
        AlSourceRewind => "alSourceRewind" as al_source_rewind: Api:
            unsafe extern "C" fn(ALuint),
        AlSourcePause => "alSourcePause" as al_source_pause: Api:
            unsafe extern "C" fn(ALuint),
        AlSourceQueueBuffers => "alSourceQueueBuffers" as al_source_queue_buffers: Api:
            unsafe extern "C" fn(ALuint, ALsizei, *const ALuint),
        AlSourceUnqueueBuffers => "alSourceUnqueueBuffers" as al_source_unqueue_buffers: Api:
            unsafe extern "C" fn(ALuint, ALsizei, *mut ALuint),

        // Buffers
        AlGenBuffers => "alGenBuffers" as al_gen_buffers: Api:
            unsafe extern "C" fn(ALsizei, *mut ALuint),
        AlDeleteBuffers => "alDeleteBuffers" as al_delete_buffers: Api:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlIsBuffer => "alIsBuffer" as al_is_buffer: Api:
            unsafe extern "C" fn(ALuint) -> ALboolean,
        AlBufferData => "alBufferData" as al_buffer_data: Api:
            unsafe extern "C" fn(ALuint, ALenum, *const c_void, ALsizei, ALsizei),
        AlBufferf => "alBufferf" as al_bufferf: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALfloat),
        AlBuffer3f => "alBuffer3f" as al_buffer3f: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALfloat, ALfloat, ALfloat),
        AlBufferfv => "alBufferfv" as al_bufferfv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *const ALfloat),
        AlBufferi => "alBufferi" as al_bufferi: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALint),
        AlBuffer3i => "alBuffer3i" as al_buffer3i: Api:
            unsafe extern "C" fn(ALuint, ALenum, ALint, ALint, ALint),
        AlBufferiv => "alBufferiv" as al_bufferiv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *const ALint),
        AlGetBufferf => "alGetBufferf" as al_get_bufferf: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALfloat),
        AlGetBuffer3f => "alGetBuffer3f" as al_get_buffer3f: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALfloat, *mut ALfloat, *mut ALfloat),
        AlGetBufferfv => "alGetBufferfv" as al_get_bufferfv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALfloat),
        AlGetBufferi => "alGetBufferi" as al_get_bufferi: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALint),
        AlGetBuffer3i => "alGetBuffer3i" as al_get_buffer3i: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALint, *mut ALint, *mut ALint),
        AlGetBufferiv => "alGetBufferiv" as al_get_bufferiv: Api:
            unsafe extern "C" fn(ALuint, ALenum, *mut ALint),

        // Global 3D model
        AlDopplerFactor => "alDopplerFactor" as al_doppler_factor: Api:
            unsafe extern "C" fn(ALfloat),
        AlDopplerVelocity => "alDopplerVelocity" as al_doppler_velocity: Api:
            unsafe extern "C" fn(ALfloat),
        AlSpeedOfSound => "alSpeedOfSound" as al_speed_of_sound: Api:
            unsafe extern "C" fn(ALfloat),
        AlDistanceModel => "alDistanceModel" as al_distance_model: Api:
            unsafe extern "C" fn(ALenum),
    }
}

symbol_table! {
    /// Optional EFX filter entry points, resolved through `alGetProcAddress`
    pub enum FilterSymbol in filter_slot {
        AlGenFilters => "alGenFilters" as al_gen_filters: Filter:
            unsafe extern "C" fn(ALsizei, *mut ALuint),
        AlDeleteFilters => "alDeleteFilters" as al_delete_filters: Filter:
            unsafe extern "C" fn(ALsizei, *const ALuint),
        AlFilteri => "alFilteri" as al_filteri: Filter:
            unsafe extern "C" fn(ALuint, ALenum, ALint),
        AlFilterf => "alFilterf" as al_filterf: Filter:
            unsafe extern "C" fn(ALuint, ALenum, ALfloat),
    }
}

impl Symbol {
    /// Tags belonging to `group`, in declaration order
    pub fn in_group(group: SymbolGroup) -> impl Iterator<Item = Symbol> {
        Symbol::ALL.iter().copied().filter(move |s| s.group() == group)
    }
}
