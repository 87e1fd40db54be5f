//! MIPS64 definitions: registers.
//!
//! The portable register file maps onto $4..$11 and $16..$23; $0 is the
//! hardwired zero and the staging registers live in $13..$15 and $24/$25.

use crate::reg::{Reg, RegClass, Writable};

/// Get a reference to a general-purpose register by raw encoding.
#[inline]
pub const fn gpr(enc: u8) -> Reg {
    Reg::new(RegClass::Base, enc)
}

/// Get a writable reference to a general-purpose register.
#[inline]
pub const fn writable_gpr(enc: u8) -> Writable<Reg> {
    Writable::from_reg(gpr(enc))
}

/// Get a reference to the zero-register.
#[inline]
pub fn zero_reg() -> Reg {
    gpr(0)
}

/// First portable register (the accumulator of the fixed-register forms).
#[inline]
pub fn reax() -> Reg {
    gpr(4)
}

/// Second portable register; doubles as the implicit shift-count register.
#[inline]
pub fn recx() -> Reg {
    gpr(5)
}

/// Third portable register.
#[inline]
pub fn redx() -> Reg {
    gpr(6)
}

/// Fourth portable register.
#[inline]
pub fn rebx() -> Reg {
    gpr(7)
}

/// Fifth portable register; conventionally the info-block base.
#[inline]
pub fn rebp() -> Reg {
    gpr(8)
}

/// Sixth portable register.
#[inline]
pub fn resi() -> Reg {
    gpr(9)
}

/// Seventh portable register.
#[inline]
pub fn redi() -> Reg {
    gpr(10)
}

/// Number of addressable base registers (hardware encoding space).
pub const NUM_BASE_REGS: u8 = 32;
