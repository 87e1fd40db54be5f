//! x86-64 definitions: registers.

use crate::reg::{Reg, RegClass, Writable};

/// Get a reference to a logical vector register.
///
/// Only the low block (xmm0..xmm7) is directly nameable; the paired high
/// register xmmN+8 is implied and selected during emission.
#[inline]
pub const fn xmm(enc: u8) -> Reg {
    Reg::new(RegClass::Simd, enc)
}

/// Get a writable reference to a logical vector register.
#[inline]
pub const fn writable_xmm(enc: u8) -> Writable<Reg> {
    Writable::from_reg(xmm(enc))
}

/// Get a reference to a general-purpose register (raw encoding 0..15).
#[inline]
pub const fn gpr(enc: u8) -> Reg {
    Reg::new(RegClass::Base, enc)
}

/// Get a writable reference to a general-purpose register.
#[inline]
pub const fn writable_gpr(enc: u8) -> Writable<Reg> {
    Writable::from_reg(gpr(enc))
}

/// Number of directly nameable logical vector registers.
pub const NUM_VECTOR_REGS: u8 = 8;

/// Number of addressable base registers.
pub const NUM_BASE_REGS: u8 = 16;
