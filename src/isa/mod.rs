//! Instruction set architecture backends.
//!
//! Each sub-module encodes the portable operation vocabulary for one target
//! architecture and SIMD extension. A backend is selected at build time via
//! cargo features; [`lookup`] maps a target triple to the matching
//! compiled-in backend so that callers can pick a module once per
//! compilation unit, not once per encode call.

use core::fmt;
use target_lexicon::{Architecture, Triple};

#[cfg(feature = "arm64")]
pub mod aarch64;

#[cfg(feature = "mips64")]
pub mod mips64;

#[cfg(feature = "ppc64")]
pub mod ppc64;

#[cfg(feature = "x86")]
pub mod x64;

/// Identifies one compiled-in encoder backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// AArch64 with the SVE extension, packed half-precision.
    Aarch64,
    /// 64-bit POWER with VSX3/VMX, packed half-precision.
    Ppc64,
    /// x86-64 with SSE2, packed half-precision over paired 128-bit registers.
    X64,
    /// MIPS64 release 6 BASE (scalar 64-bit) subset.
    Mips64,
}

impl Backend {
    /// Short name of the backend, as used by [`lookup_by_name`].
    pub fn name(self) -> &'static str {
        match self {
            Backend::Aarch64 => "aarch64",
            Backend::Ppc64 => "ppc64",
            Backend::X64 => "x64",
            Backend::Mips64 => "mips64",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes reasons for target lookup failure.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LookupError {
    /// Support for this target was disabled in the current build.
    SupportDisabled,
    /// Support for this target has not yet been implemented.
    Unsupported,
}

impl std::error::Error for LookupError {}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::SupportDisabled => write!(f, "support for this target is disabled"),
            LookupError::Unsupported => write!(f, "support for this target is not implemented"),
        }
    }
}

/// Returns the backend matching `triple`, or an error if the architecture
/// is unknown or its backend was not compiled in.
macro_rules! backend {
    ($kind: expr, $cfg_terms: tt) => {{
        #[cfg $cfg_terms]
        {
            Ok($kind)
        }
        #[cfg(not $cfg_terms)]
        {
            Err(LookupError::SupportDisabled)
        }
    }};
}

/// Look up the encoder backend for a target triple.
pub fn lookup(triple: Triple) -> Result<Backend, LookupError> {
    match triple.architecture {
        Architecture::Aarch64 { .. } => backend!(Backend::Aarch64, (feature = "arm64")),
        Architecture::Powerpc64 | Architecture::Powerpc64le => {
            backend!(Backend::Ppc64, (feature = "ppc64"))
        }
        Architecture::X86_64 => backend!(Backend::X64, (feature = "x86")),
        Architecture::Mips64 { .. } => backend!(Backend::Mips64, (feature = "mips64")),
        _ => Err(LookupError::Unsupported),
    }
}

/// Look up a backend by its short name.
pub fn lookup_by_name(name: &str) -> Result<Backend, LookupError> {
    use std::str::FromStr;
    match Triple::from_str(name) {
        Ok(triple) => lookup(triple),
        Err(_) => match name {
            "aarch64" => backend!(Backend::Aarch64, (feature = "arm64")),
            "ppc64" => backend!(Backend::Ppc64, (feature = "ppc64")),
            "x64" => backend!(Backend::X64, (feature = "x86")),
            "mips64" => backend!(Backend::Mips64, (feature = "mips64")),
            _ => Err(LookupError::Unsupported),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn lookup_by_triple() {
        let triple = Triple::from_str("x86_64-unknown-linux-gnu").unwrap();
        assert_eq!(lookup(triple), Ok(Backend::X64));
        let triple = Triple::from_str("aarch64-unknown-linux-gnu").unwrap();
        assert_eq!(lookup(triple), Ok(Backend::Aarch64));
    }

    #[test]
    fn lookup_unknown_is_rejected() {
        let triple = Triple::from_str("riscv64gc-unknown-linux-gnu").unwrap();
        assert_eq!(lookup(triple), Err(LookupError::Unsupported));
    }

    #[test]
    fn lookup_by_short_name() {
        assert_eq!(lookup_by_name("mips64"), Ok(Backend::Mips64));
        assert_eq!(lookup_by_name("sparc9"), Err(LookupError::Unsupported));
    }
}
