//! MIPS64 backend: release 6 BASE (scalar 64-bit) encodings.
//!
//! The scalar operation set over general-purpose registers: moves, logic,
//! arithmetic, shifts, multiply/divide/remainder and compare staging, in
//! register, immediate and memory forms. Memory forms are load/operate/
//! store sequences through a dedicated staging register; immediates are
//! classified inline vs high/low materialization; flag-setting variants
//! append a copy of the result into the dedicated flags register.

use crate::reg::Reg;

pub mod inst;

pub use inst::regs;

/// Fixed constant set for the MIPS64 encoder: the dedicated scratch and
/// staging registers, all outside the portable register file.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// Memory staging register for load/operate/store forms ($t8).
    pub scratch_mem: Reg,
    /// Immediate materialization register ($t9).
    pub scratch_imm: Reg,
    /// Displacement staging register for out-of-range offsets ($15).
    pub scratch_disp: Reg,
    /// Left comparand staging register of the compare family ($13).
    pub flags_left: Reg,
    /// Right comparand staging register of the compare family ($14).
    pub flags_right: Reg,
    /// Implicit shift-count register of the one-operand shift forms ($5).
    pub count_reg: Reg,
    /// The hardwired zero register.
    pub zero: Reg,
}

/// The default MIPS64 profile.
pub const PROFILE: Profile = Profile {
    scratch_mem: regs::gpr(24),
    scratch_imm: regs::gpr(25),
    scratch_disp: regs::gpr(15),
    flags_left: regs::gpr(13),
    flags_right: regs::gpr(14),
    count_reg: regs::gpr(5),
    zero: regs::gpr(0),
};
