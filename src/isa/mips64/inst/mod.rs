//! This module defines the MIPS64 scalar instruction type.
//!
//! BASE operations are two-operand mutating forms (`G = G op S`); memory
//! destinations are load/operate/store sequences through the staging
//! register. `set_flags` variants append a copy of the result into the
//! flags staging register; memory-destination forms leave the flags path
//! to the staged value and encode identically either way.

use crate::reg::{Reg, Writable};

pub mod args;
pub use self::args::*;
pub mod imms;
pub use self::imms::*;
pub mod regs;
pub use self::regs::*;
pub mod emit;

#[cfg(test)]
mod emit_tests;

/// A portable scalar pseudo-instruction, lowered against the MIPS64 r6
/// profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inst {
    /// Materialize an immediate into a register.
    MovRI {
        /// destination
        rd: Writable<Reg>,
        /// immediate value
        imm: i64,
    },
    /// Materialize an immediate into memory.
    MovMI {
        /// destination address
        mem: AMode,
        /// immediate value
        imm: i64,
    },
    /// Register move.
    MovRR {
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// 64-bit load.
    Load {
        /// destination
        rd: Writable<Reg>,
        /// source address
        mem: AMode,
    },
    /// 64-bit store.
    Store {
        /// source
        rs: Reg,
        /// destination address
        mem: AMode,
    },
    /// Two-operand ALU operation (`g = g op s`).
    AluRR {
        /// operation
        op: AluOPRRR,
        /// destination and first source
        rg: Writable<Reg>,
        /// second source
        rs: Reg,
        /// append the flags materialization
        set_flags: bool,
    },
    /// ALU operation with the second source loaded from memory.
    AluLd {
        /// operation
        op: AluOPRRR,
        /// destination and first source
        rg: Writable<Reg>,
        /// second source address
        mem: AMode,
        /// append the flags materialization
        set_flags: bool,
    },
    /// ALU operation applied to a memory destination.
    AluSt {
        /// operation
        op: AluOPRRR,
        /// second source
        rs: Reg,
        /// destination address
        mem: AMode,
    },
    /// ALU operation with an immediate second source.
    AluRI {
        /// operation
        op: AluOPRRR,
        /// destination and first source
        rg: Writable<Reg>,
        /// immediate value
        imm: i64,
        /// append the flags materialization
        set_flags: bool,
    },
    /// ALU operation with an immediate applied to a memory destination.
    AluMI {
        /// operation
        op: AluOPRRR,
        /// destination address
        mem: AMode,
        /// immediate value
        imm: i64,
    },
    /// Bitwise NOT in place.
    NotRR {
        /// destination and source
        rg: Writable<Reg>,
    },
    /// Bitwise NOT of a memory location in place.
    NotMx {
        /// address
        mem: AMode,
    },
    /// Arithmetic negate in place.
    NegRR {
        /// destination and source
        rg: Writable<Reg>,
        /// append the flags materialization
        set_flags: bool,
    },
    /// Arithmetic negate of a memory location in place.
    NegMx {
        /// address
        mem: AMode,
    },
    /// And-not (`g = ~g & s`): NOT then AND.
    AnnRR {
        /// destination and negated source
        rg: Writable<Reg>,
        /// second source
        rs: Reg,
    },
    /// And-not with the second source loaded from memory.
    AnnLd {
        /// destination and negated source
        rg: Writable<Reg>,
        /// second source address
        mem: AMode,
    },
    /// And-not applied to a memory destination.
    AnnSt {
        /// second source
        rs: Reg,
        /// destination address
        mem: AMode,
    },
    /// Or-not (`g = ~g | s`): NOT then OR.
    OrnRR {
        /// destination and negated source
        rg: Writable<Reg>,
        /// second source
        rs: Reg,
    },
    /// Or-not with the second source loaded from memory.
    OrnLd {
        /// destination and negated source
        rg: Writable<Reg>,
        /// second source address
        mem: AMode,
    },
    /// Or-not applied to a memory destination.
    OrnSt {
        /// second source
        rs: Reg,
        /// destination address
        mem: AMode,
    },
    /// Shift by the implicit count register.
    ShiftRx {
        /// operation
        op: ShiftOp,
        /// destination and source
        rg: Writable<Reg>,
        /// append the flags materialization
        set_flags: bool,
    },
    /// Shift a memory location by the implicit count register.
    ShiftMx {
        /// operation
        op: ShiftOp,
        /// address
        mem: AMode,
    },
    /// Shift by an immediate count (modulo 64).
    ShiftRI {
        /// operation
        op: ShiftOp,
        /// destination and source
        rg: Writable<Reg>,
        /// shift count
        imm: u8,
        /// append the flags materialization
        set_flags: bool,
    },
    /// Shift a memory location by an immediate count.
    ShiftMI {
        /// operation
        op: ShiftOp,
        /// address
        mem: AMode,
        /// shift count
        imm: u8,
    },
    /// Shift by a register count.
    ShiftRR {
        /// operation
        op: ShiftOp,
        /// destination and source
        rg: Writable<Reg>,
        /// count register
        rs: Reg,
        /// append the flags materialization
        set_flags: bool,
    },
    /// Shift by a count loaded from memory.
    ShiftLd {
        /// operation
        op: ShiftOp,
        /// destination and source
        rg: Writable<Reg>,
        /// count address
        mem: AMode,
        /// append the flags materialization
        set_flags: bool,
    },
    /// Shift a memory location by a register count.
    ShiftSt {
        /// count register
        rs: Reg,
        /// operation
        op: ShiftOp,
        /// address
        mem: AMode,
    },
    /// Stage both comparands for a following conditional jump.
    CmpRR {
        /// left comparand
        rs: Reg,
        /// right comparand
        rt: Reg,
    },
    /// Compare staging against an immediate.
    CmpRI {
        /// left comparand
        rs: Reg,
        /// right immediate
        imm: i64,
    },
    /// Compare staging against memory.
    CmpRM {
        /// left comparand
        rs: Reg,
        /// right comparand address
        mem: AMode,
    },
    /// Compare staging of memory against a register.
    CmpMR {
        /// left comparand address
        mem: AMode,
        /// right comparand
        rt: Reg,
    },
    /// Compare staging of memory against an immediate.
    CmpMI {
        /// left comparand address
        mem: AMode,
        /// right immediate
        imm: i64,
    },
}
