//! AArch64 SVE definitions: registers.

use crate::reg::{Reg, RegClass, Writable};

/// Get a reference to an SVE vector register.
#[inline]
pub const fn zreg(enc: u8) -> Reg {
    Reg::new(RegClass::Simd, enc)
}

/// Get a writable reference to an SVE vector register.
#[inline]
pub const fn writable_zreg(enc: u8) -> Writable<Reg> {
    Writable::from_reg(zreg(enc))
}

/// Get a reference to a general-purpose register.
#[inline]
pub const fn xreg(enc: u8) -> Reg {
    Reg::new(RegClass::Base, enc)
}

/// Get a writable reference to a general-purpose register.
#[inline]
pub const fn writable_xreg(enc: u8) -> Writable<Reg> {
    Writable::from_reg(xreg(enc))
}

/// Number of addressable vector registers.
pub const NUM_VECTOR_REGS: u8 = 32;

/// Number of addressable base registers (x0..x30; x31 is the stack pointer
/// in the load/store base position).
pub const NUM_BASE_REGS: u8 = 32;
