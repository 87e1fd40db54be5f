//! POWER backend: VSX3/VMX packed half-precision encodings.
//!
//! Vector arithmetic uses the VMX integer forms; logic and moves use the
//! VSX XX3 forms with the bank-select bits baked into the opcode base
//! constants, so register operands are always plain v0..v31 numbers.
//! Instruction words are emitted big-endian.
//!
//! POWER has no displacement form for vector loads: every memory operand
//! stages its displacement into a scratch base register and uses the
//! indexed load/store.

use crate::reg::Reg;

pub mod inst;

pub use inst::regs;

/// Fixed constant set for the POWER encoder.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// Primary SIMD staging scratch (v30): memory operands and splat
    /// shift counts land here.
    pub scratch: Reg,
    /// Secondary SIMD scratch (v31): the zeroed accumulator of the
    /// multiply idiom when the primary scratch holds a loaded operand.
    pub scratch2: Reg,
    /// General-purpose scratch holding staged displacements (r12).
    pub scratch_disp: Reg,
    /// Halfword lane the indexed scalar load lands in, as consumed by the
    /// splat of the broadcast-shift idiom.
    pub splat_lane: u8,
    /// The select instruction is native here (XXSEL); its mask operand is
    /// fixed to vector register 0 inside the opcode base constant.
    pub has_native_blend: bool,
}

/// The default POWER profile.
pub const PROFILE: Profile = Profile {
    scratch: regs::vreg(30),
    scratch2: regs::vreg(31),
    scratch_disp: regs::greg(12),
    splat_lane: 3,
    has_native_blend: true,
};
