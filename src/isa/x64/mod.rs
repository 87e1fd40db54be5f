//! x86-64 backend: SSE2 packed half-precision over paired 128-bit
//! registers.
//!
//! One logical vector operand is two physical XMM registers: logical
//! register `n` maps to `xmmN` and `xmmN+8`, and every operation is issued
//! twice, the second copy selecting the high block through the REX prefix
//! and offsetting memory operands by 16 bytes.
//!
//! This profile has no native per-lane blend: mask-merge is the fixed
//! AND/ANDN/OR idiom against the implicit mask register. Per-lane variable
//! shifts have no native instruction either; they lower to a scalar loop
//! over the lanes through the info-block scratch areas.

use crate::reg::Reg;

pub mod encoding;
pub mod inst;

pub use inst::regs;

/// Fixed constant set for the x86 encoder.
///
/// The info block is a caller-owned, 16-byte-aligned data area addressed
/// off a reserved base register; the displacements below name the slots the
/// encoder is allowed to clobber (`scr01`, `scr02`) or read as constants
/// (`gpc07`, all-ones).
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// Implicit mask register for mask-merge operations (logical xmm0).
    pub mask: Reg,
    /// Base register of the info block (rbp).
    pub info_base: Reg,
    /// Displacement of the first 32-byte scratch area.
    pub scr01: i32,
    /// Displacement of the second 32-byte scratch area.
    pub scr02: i32,
    /// Displacement of the all-ones constant.
    pub gpc07: i32,
    /// Scalar shift-count register of the lane loop (rcx).
    pub count_reg: Reg,
    /// SSE2 has no per-lane blend; the AND/ANDN/OR idiom is used instead.
    pub has_native_blend: bool,
}

/// The default x86 profile.
pub const PROFILE: Profile = Profile {
    mask: regs::xmm(0),
    info_base: regs::gpr(5),
    scr01: 0x100,
    scr02: 0x120,
    gpc07: 0x1F0,
    count_reg: regs::gpr(1),
    has_native_blend: false,
};
