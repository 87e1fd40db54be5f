//! AArch64 backend: SVE packed half-precision encodings.
//!
//! Covers the packed half-float and half-int operation set over scalable
//! vector registers, 128-bit granule. Comparisons materialize their result
//! as an all-bits mask through a scratch predicate; mask-merge uses the
//! native predicated select.

use crate::reg::Reg;

pub mod inst;

pub use inst::regs;

/// Fixed constant set for the SVE encoder: implicit and scratch registers,
/// and the capability flags consumed by idiom selection.
///
/// The exact scratch numbering is configuration, not behavior: any vector
/// register not exposed through the portable register file works. What is
/// fixed is that a scratch claimed here is clobbered only inside a single
/// encode call.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// Implicit mask register for mask-merge operations (z0).
    pub mask: Reg,
    /// Memory staging scratch; loads feeding register-only operations land
    /// here (z30).
    pub scratch: Reg,
    /// Register holding the all-ones constant that compare results are
    /// broadcast from (z15).
    pub ones: Reg,
    /// Scalar staging register for broadcast shift counts (w16).
    pub scratch_base: Reg,
    /// Scratch predicate register written by compares (p1).
    pub cmp_pred: u8,
    /// Whether the target has a native per-lane blend; SVE does (SEL).
    /// There is no substitute idiom in this backend, so encoding fails
    /// closed if a profile clears this.
    pub has_native_blend: bool,
}

/// The default SVE profile.
pub const PROFILE: Profile = Profile {
    mask: regs::zreg(0),
    scratch: regs::zreg(30),
    ones: regs::zreg(15),
    scratch_base: regs::xreg(16),
    cmp_pred: 1,
    has_native_blend: true,
};
