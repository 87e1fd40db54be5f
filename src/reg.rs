//! Register operands.
//!
//! Registers are manually named: there is no allocator, and a register is
//! just a class plus a hardware encoding number. Each backend's `regs`
//! module provides named constructors that pin down that target's register
//! file; validation against the file's limits happens during operand
//! classification.

use core::fmt;

/// The class of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegClass {
    /// A general-purpose ("BASE") register.
    Base,
    /// A SIMD vector register.
    Simd,
}

/// A register in some backend's register file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reg {
    class: RegClass,
    hw_enc: u8,
}

impl Reg {
    /// Construct a register from a class and hardware encoding number.
    pub const fn new(class: RegClass, hw_enc: u8) -> Self {
        Self { class, hw_enc }
    }

    /// The register's class.
    pub const fn class(self) -> RegClass {
        self.class
    }

    /// The register's hardware encoding number.
    pub const fn hw_enc(self) -> u8 {
        self.hw_enc
    }
}

impl fmt::Debug for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            RegClass::Base => write!(f, "r{}", self.hw_enc),
            RegClass::Simd => write!(f, "v{}", self.hw_enc),
        }
    }
}

/// A newtype wrapper marking a register as a destination.
///
/// Written operands are easy to confuse with read operands in an encoder
/// whose instruction forms mutate their first source; the wrapper keeps the
/// distinction visible in instruction constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Writable<T> {
    reg: T,
}

impl<T: Copy> Writable<T> {
    /// Mark `reg` as writable.
    pub const fn from_reg(reg: T) -> Self {
        Self { reg }
    }

    /// The underlying register.
    pub const fn to_reg(self) -> T {
        self.reg
    }
}
