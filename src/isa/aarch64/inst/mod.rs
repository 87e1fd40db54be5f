//! This module defines the AArch64 SVE instruction type.

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

/// A portable pseudo-instruction, lowered against the SVE packed-half
/// profile.
///
/// Naming follows the operand-shape suffixes of the portable vocabulary:
/// `RRR` variants are three-operand non-mutating forms (`d = s op t`),
/// `RR` variants mutate their destination (`g = g op s`), `RRM`/`RM` take
/// the last source from memory, staged through the profile's scratch
/// register before the register-register word.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inst {
    /// Contiguous vector load.
    VecLoad {
        /// destination
        rd: Writable<Reg>,
        /// source address
        mem: AMode,
    },
    /// Contiguous vector store.
    VecStore {
        /// source
        rs: Reg,
        /// destination address
        mem: AMode,
    },
    /// Register move.
    VecMov {
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// Mask-merge: keep a destination lane where the implicit mask lane is
    /// zero, replace it with the source lane otherwise.
    VecMaskMerge {
        /// destination and first source
        rg: Writable<Reg>,
        /// replacement lanes
        rs: Reg,
    },
    /// Mask-merge with the replacement lanes loaded from memory.
    VecMaskMergeLoad {
        /// destination and first source
        rg: Writable<Reg>,
        /// replacement address
        mem: AMode,
    },
    /// Mask-merge into memory: merged lanes are written back to the
    /// destination address.
    VecMaskMergeStore {
        /// replacement lanes
        rs: Reg,
        /// destination address
        mem: AMode,
    },
    /// Three-address bitwise operation.
    VecBitRRR {
        /// operation
        op: BitOp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source
        rt: Reg,
    },
    /// Bitwise operation with the second source in memory.
    VecBitRRM {
        /// operation
        op: BitOp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source address
        mem: AMode,
    },
    /// Or-not: `d = ~s | t`, a NOT-then-OR chain.
    VecOrnRRR {
        /// destination
        rd: Writable<Reg>,
        /// negated source
        rs: Reg,
        /// second source
        rt: Reg,
    },
    /// Or-not with the second source in memory.
    VecOrnRRM {
        /// destination
        rd: Writable<Reg>,
        /// negated source
        rs: Reg,
        /// second source address
        mem: AMode,
    },
    /// Bitwise NOT.
    VecNot {
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// Three-address floating-point arithmetic.
    VecFpuRRR {
        /// operation
        op: FpuRRROp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source
        rt: Reg,
    },
    /// Floating-point arithmetic with the second source in memory.
    VecFpuRRM {
        /// operation
        op: FpuRRROp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source address
        mem: AMode,
    },
    /// Two-operand predicated floating-point arithmetic (`g = g op s`).
    VecFpuRR {
        /// operation
        op: FpuPredOp,
        /// destination and first source
        rg: Writable<Reg>,
        /// second source
        rs: Reg,
    },
    /// Two-operand predicated arithmetic with a memory source.
    VecFpuRM {
        /// operation
        op: FpuPredOp,
        /// destination and first source
        rg: Writable<Reg>,
        /// second source address
        mem: AMode,
    },
    /// Three-operand form of the predicated families, defined as a copy
    /// followed by the two-operand form.
    VecFpuRRRChained {
        /// operation
        op: FpuPredOp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source
        rt: Reg,
    },
    /// Three-operand predicated form with a memory source.
    VecFpuRRMChained {
        /// operation
        op: FpuPredOp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source address
        mem: AMode,
    },
    /// One-source floating-point operation.
    VecFpuUnary {
        /// operation
        op: FpuUnaryOp,
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// Square root of a memory operand.
    VecSqrtLoad {
        /// destination
        rd: Writable<Reg>,
        /// source address
        mem: AMode,
    },
    /// One Newton-Raphson step refining a reciprocal estimate. Destroys the
    /// source register.
    VecRecipStep {
        /// destination (holds the estimate)
        rg: Writable<Reg>,
        /// original operand; clobbered
        rs: Reg,
    },
    /// One Newton-Raphson step refining a reciprocal square-root estimate.
    /// Destroys the source register.
    VecRsqrtStep {
        /// destination (holds the estimate)
        rg: Writable<Reg>,
        /// original operand; clobbered
        rs: Reg,
    },
    /// Fused multiply-add: `g = g + s * t`.
    VecFpuMulAdd {
        /// accumulator
        rg: Writable<Reg>,
        /// first factor
        rs: Reg,
        /// second factor
        rt: Reg,
    },
    /// Fused multiply-add with the second factor in memory.
    VecFpuMulAddLoad {
        /// accumulator
        rg: Writable<Reg>,
        /// first factor
        rs: Reg,
        /// second factor address
        mem: AMode,
    },
    /// Fused multiply-subtract: `g = g - s * t`.
    VecFpuMulSub {
        /// accumulator
        rg: Writable<Reg>,
        /// first factor
        rs: Reg,
        /// second factor
        rt: Reg,
    },
    /// Fused multiply-subtract with the second factor in memory.
    VecFpuMulSubLoad {
        /// accumulator
        rg: Writable<Reg>,
        /// first factor
        rs: Reg,
        /// second factor address
        mem: AMode,
    },
    /// Mask-producing floating-point compare: lanes where the condition
    /// holds become all-ones, others become zero.
    VecFpuCmp {
        /// condition
        cond: Cond,
        /// destination mask
        rd: Writable<Reg>,
        /// first comparand
        rs: Reg,
        /// second comparand
        rt: Reg,
    },
    /// Mask-producing compare with the second comparand in memory.
    VecFpuCmpLoad {
        /// condition
        cond: Cond,
        /// destination mask
        rd: Writable<Reg>,
        /// first comparand
        rs: Reg,
        /// second comparand address
        mem: AMode,
    },
    /// Round to integral value in floating-point representation.
    VecRound {
        /// rounding mode
        mode: RoundMode,
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// Round a memory operand.
    VecRoundLoad {
        /// rounding mode
        mode: RoundMode,
        /// destination
        rd: Writable<Reg>,
        /// source address
        mem: AMode,
    },
    /// Convert float to signed int under the given rounding mode. Only
    /// round-towards-zero is a single instruction; every other mode is the
    /// fixed round-then-truncate pair.
    VecFpToInt {
        /// rounding mode
        mode: RoundMode,
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// Convert a float memory operand to signed int.
    VecFpToIntLoad {
        /// rounding mode
        mode: RoundMode,
        /// destination
        rd: Writable<Reg>,
        /// source address
        mem: AMode,
    },
    /// Convert signed int to float.
    VecIntToFp {
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
    },
    /// Convert a signed int memory operand to float.
    VecIntToFpLoad {
        /// destination
        rd: Writable<Reg>,
        /// source address
        mem: AMode,
    },
    /// Three-address integer arithmetic.
    VecIntRRR {
        /// operation
        op: IntOp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source
        rt: Reg,
    },
    /// Integer arithmetic with the second source in memory.
    VecIntRRM {
        /// operation
        op: IntOp,
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source address
        mem: AMode,
    },
    /// Two-operand predicated integer multiply (`g = g * s`).
    VecIntMul {
        /// destination and first source
        rg: Writable<Reg>,
        /// second source
        rs: Reg,
    },
    /// Predicated integer multiply with a memory source.
    VecIntMulLoad {
        /// destination and first source
        rg: Writable<Reg>,
        /// second source address
        mem: AMode,
    },
    /// Three-operand integer multiply, chained through a copy.
    VecIntMulRRR {
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source
        rt: Reg,
    },
    /// Three-operand integer multiply with a memory source.
    VecIntMulRRM {
        /// destination
        rd: Writable<Reg>,
        /// first source
        rs: Reg,
        /// second source address
        mem: AMode,
    },
    /// Shift every lane by an immediate count. Counts are taken modulo the
    /// element width before encoding.
    VecShiftImm {
        /// operation
        op: ShiftOp,
        /// destination
        rd: Writable<Reg>,
        /// source
        rs: Reg,
        /// shift count
        imm: u8,
    },
    /// Shift every lane by a scalar count loaded from memory (first element
    /// semantics: the halfword at the address supplies the count).
    VecShiftLoad {
        /// operation
        op: ShiftOp,
        /// destination and source
        rg: Writable<Reg>,
        /// count address
        mem: AMode,
    },
    /// Three-operand form of the broadcast shift, chained through a copy.
    VecShiftLoadRRR {
        /// operation
        op: ShiftOp,
        /// destination
        rd: Writable<Reg>,
        /// source lanes
        rs: Reg,
        /// count address
        mem: AMode,
    },
    /// Per-lane variable shift (`g = g shift s`, counts per lane).
    VecShiftVar {
        /// operation
        op: ShiftOp,
        /// destination and first source
        rg: Writable<Reg>,
        /// per-lane counts
        rs: Reg,
    },
    /// Per-lane variable shift with counts loaded from memory.
    VecShiftVarLoad {
        /// operation
        op: ShiftOp,
        /// destination and first source
        rg: Writable<Reg>,
        /// counts address
        mem: AMode,
    },
    /// Three-operand per-lane variable shift, chained through a copy.
    VecShiftVarRRR {
        /// operation
        op: ShiftOp,
        /// destination
        rd: Writable<Reg>,
        /// source lanes
        rs: Reg,
        /// per-lane counts
        rt: Reg,
    },
    /// Three-operand variable shift with counts loaded from memory.
    VecShiftVarRRM {
        /// operation
        op: ShiftOp,
        /// destination
        rd: Writable<Reg>,
        /// source lanes
        rs: Reg,
        /// counts address
        mem: AMode,
    },
}
