//! POWER definitions: registers.

use crate::reg::{Reg, RegClass, Writable};

/// Get a reference to a vector register (v0..v31).
#[inline]
pub const fn vreg(enc: u8) -> Reg {
    Reg::new(RegClass::Simd, enc)
}

/// Get a writable reference to a vector register.
#[inline]
pub const fn writable_vreg(enc: u8) -> Writable<Reg> {
    Writable::from_reg(vreg(enc))
}

/// Get a reference to a general-purpose register (r0..r31).
#[inline]
pub const fn greg(enc: u8) -> Reg {
    Reg::new(RegClass::Base, enc)
}

/// Get a writable reference to a general-purpose register.
#[inline]
pub const fn writable_greg(enc: u8) -> Writable<Reg> {
    Writable::from_reg(greg(enc))
}

/// Number of addressable vector registers.
pub const NUM_VECTOR_REGS: u8 = 32;

/// Number of addressable base registers.
pub const NUM_BASE_REGS: u8 = 32;
