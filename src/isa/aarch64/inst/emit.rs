//! AArch64 SVE: binary code emission.

use crate::binemit::{ByteSink, CodeBuffer, MachInstEmit};
use crate::bitfield::{Field, InstWord};
use crate::isa::aarch64::inst::*;
use crate::isa::aarch64::Profile;
use crate::reg::{Reg, RegClass, Writable};
use crate::result::{CodegenError, CodegenResult};

/// Element width of the packed-half profile, in bits.
pub const ELEM_BITS: u8 = 16;

const ZD: Field = Field::new(0, 5);
const ZN: Field = Field::new(5, 5);
const ZM: Field = Field::new(16, 5);
const PD: Field = Field::new(0, 4);
const LDST_RN: Field = Field::new(5, 5);
const LDST_IMM4: Field = Field::new(16, 4);
const LDUR_IMM9: Field = Field::new(12, 9);

const LD1H: u32 = 0x8580_4000;
const ST1H: u32 = 0xE580_4000;
const SEL: u32 = 0x0560_C400;
const CMPNE_ZERO: u32 = 0x2440_A000;
const NOT: u32 = 0x045E_A000;
const MUL_PRED: u32 = 0x0450_0000;
const FCVTZS: u32 = 0x655A_A000;
const SCVTF: u32 = 0x6552_A000;
const FMUL: u32 = 0x6540_0800;
const FRECPS: u32 = 0x6540_1800;
const FRSQRTS: u32 = 0x6540_1C00;
const FMLA: u32 = 0x6560_0000;
const FMLS: u32 = 0x6560_2000;
const LDURH: u32 = 0x7C40_0000;
const DUP_GPR: u32 = 0x0522_2000;

fn machreg_to_vec(m: Reg) -> CodegenResult<u32> {
    if m.class() != RegClass::Simd {
        return Err(CodegenError::Unsupported {
            isa: "aarch64",
            mnemonic: "base register in vector position",
        });
    }
    if m.hw_enc() >= regs::NUM_VECTOR_REGS {
        return Err(CodegenError::RegOutOfRange {
            index: m.hw_enc(),
            limit: regs::NUM_VECTOR_REGS,
        });
    }
    Ok(u32::from(m.hw_enc()))
}

fn machreg_to_gpr(m: Reg) -> CodegenResult<u32> {
    if m.class() != RegClass::Base {
        return Err(CodegenError::Unsupported {
            isa: "aarch64",
            mnemonic: "vector register in base position",
        });
    }
    if m.hw_enc() >= regs::NUM_BASE_REGS {
        return Err(CodegenError::RegOutOfRange {
            index: m.hw_enc(),
            limit: regs::NUM_BASE_REGS,
        });
    }
    Ok(u32::from(m.hw_enc()))
}

fn enc_vec_rrr(top: u32, zd: u32, zn: u32, zm: u32) -> u32 {
    InstWord::opcode(top)
        .field(ZD, zd)
        .field(ZN, zn)
        .field(ZM, zm)
        .bits()
}

fn enc_vec_rr(top: u32, zd: u32, zn: u32) -> u32 {
    InstWord::opcode(top).field(ZD, zd).field(ZN, zn).bits()
}

fn enc_cmp(top: u32, pd: u32, zn: u32, zm: u32) -> u32 {
    InstWord::opcode(top)
        .field(PD, pd)
        .field(ZN, zn)
        .field(ZM, zm)
        .bits()
}

fn enc_ldst(op: u32, zt: u32, xn: u32, imm4: u32) -> u32 {
    InstWord::opcode(op)
        .field(ZD, zt)
        .field(LDST_RN, xn)
        .field(LDST_IMM4, imm4)
        .bits()
}

fn enc_ldurh(rt: u32, rn: u32, imm9: u32) -> u32 {
    InstWord::opcode(LDURH)
        .field(ZD, rt)
        .field(LDST_RN, rn)
        .field(LDUR_IMM9, imm9)
        .bits()
}

/// Immediate shift encoding for 16-bit elements: the 5-bit tsz:imm field
/// carries `16 + count` for left shifts and `32 - count` for right shifts,
/// with shift-by-zero folded onto the left-shift-by-zero encoding.
fn enc_shift_imm(op: ShiftOp, zd: u32, zn: u32, count: u32) -> u32 {
    debug_assert!(count < 16);
    let (base, tweak, imm) = match op {
        ShiftOp::Shl => (0x0430_9400, 0x800, count),
        ShiftOp::ShrU if count == 0 => (0x0430_9400, 0x800, 0),
        ShiftOp::ShrU => (0x0430_9400, 0, (16 - count) & 0xf),
        ShiftOp::ShrS if count == 0 => (0x0430_9000, 0xC00, 0),
        ShiftOp::ShrS => (0x0430_9000, 0, (16 - count) & 0xf),
    };
    InstWord::opcode(base | tweak)
        .field(ZD, zd)
        .field(ZN, zn)
        .field(Field::new(16, 4), imm)
        .bits()
}

/// Memory finalization for the contiguous vector load/store forms: the
/// displacement must be granule-aligned and fit the scaled 4-bit field.
fn mem_finalize_vec(mem: &AMode) -> CodegenResult<(u32, u32)> {
    let base = machreg_to_gpr(mem.base())?;
    let off = mem.offset();
    match Imm4VlScaled::maybe_from_i64(off) {
        Some(imm4) => {
            log::trace!("mem_finalize: [{:?}, {}] -> imm4 {}", mem.base(), off, imm4);
            Ok((base, imm4.bits()))
        }
        None => Err(CodegenError::DispOutOfRange {
            disp: off,
            access: Imm4VlScaled::GRANULE as u8,
        }),
    }
}

/// Memory finalization for the scalar halfword load that feeds broadcast
/// shifts.
fn mem_finalize_half(mem: &AMode) -> CodegenResult<(u32, u32)> {
    let base = machreg_to_gpr(mem.base())?;
    match SImm9::maybe_from_i64(mem.offset()) {
        Some(simm9) => Ok((base, simm9.bits())),
        None => Err(CodegenError::DispOutOfRange {
            disp: mem.offset(),
            access: 2,
        }),
    }
}

/// The two-word mask-merge idiom: compare the implicit mask register
/// against zero into the scratch predicate, then select replacement lanes
/// where the predicate holds.
fn enc_mask_test(profile: &Profile) -> CodegenResult<u32> {
    if !profile.has_native_blend {
        return Err(CodegenError::MissingCapability("native blend"));
    }
    Ok(enc_cmp(
        CMPNE_ZERO,
        u32::from(profile.cmp_pred),
        machreg_to_vec(profile.mask)?,
        0,
    ))
}

fn enc_sel(zd: u32, zn: u32, zm: u32) -> u32 {
    enc_vec_rrr(SEL, zd, zn, zm)
}

impl Inst {
    fn emit_staged_load(profile: &Profile, mem: &AMode, sink: &mut CodeBuffer) -> CodegenResult<u32> {
        let (xn, imm4) = mem_finalize_vec(mem)?;
        let scratch = machreg_to_vec(profile.scratch)?;
        sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
        Ok(scratch)
    }
}

impl MachInstEmit for Inst {
    type Profile = Profile;

    fn emit(&self, profile: &Profile, sink: &mut CodeBuffer) -> CodegenResult<()> {
        match *self {
            Inst::VecLoad { rd, mem } => {
                let zt = machreg_to_vec(rd.to_reg())?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                sink.put4(enc_ldst(LD1H, zt, xn, imm4));
            }
            Inst::VecStore { rs, mem } => {
                let zt = machreg_to_vec(rs)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                sink.put4(enc_ldst(ST1H, zt, xn, imm4));
            }
            Inst::VecMov { rd, rs } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
            }
            Inst::VecMaskMerge { rg, rs } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let test = enc_mask_test(profile)?;
                sink.put4(test);
                sink.put4(enc_sel(zg, zs, zg));
            }
            Inst::VecMaskMergeLoad { rg, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let test = enc_mask_test(profile)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
                sink.put4(test);
                sink.put4(enc_sel(zg, scratch, zg));
            }
            Inst::VecMaskMergeStore { rs, mem } => {
                let zs = machreg_to_vec(rs)?;
                let test = enc_mask_test(profile)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
                sink.put4(test);
                sink.put4(enc_sel(scratch, zs, scratch));
                sink.put4(enc_ldst(ST1H, scratch, xn, imm4));
            }
            Inst::VecBitRRR { op, rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                let (zn, zm) = if op.swaps_operands() { (zt, zs) } else { (zs, zt) };
                sink.put4(enc_vec_rrr(op.opcode(), zd, zn, zm));
            }
            Inst::VecBitRRM { op, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                let (zn, zm) = if op.swaps_operands() {
                    (scratch, zs)
                } else {
                    (zs, scratch)
                };
                sink.put4(enc_vec_rrr(op.opcode(), zd, zn, zm));
            }
            Inst::VecOrnRRR { rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rr(NOT, zd, zs));
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zd, zt));
            }
            Inst::VecOrnRRM { rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_vec_rr(NOT, zd, zs));
                sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zd, scratch));
            }
            Inst::VecNot { rd, rs } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(NOT, zd, zs));
            }
            Inst::VecFpuRRR { op, rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(op.opcode(), zd, zs, zt));
            }
            Inst::VecFpuRRM { op, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rrr(op.opcode(), zd, zs, scratch));
            }
            Inst::VecFpuRR { op, rg, rs } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(op.opcode(), zg, zs));
            }
            Inst::VecFpuRM { op, rg, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rr(op.opcode(), zg, scratch));
            }
            Inst::VecFpuRRRChained { op, rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_vec_rr(op.opcode(), zd, zt));
            }
            Inst::VecFpuRRMChained { op, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
                sink.put4(enc_vec_rr(op.opcode(), zd, scratch));
            }
            Inst::VecFpuUnary { op, rd, rs } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(op.opcode(), zd, zs));
            }
            Inst::VecSqrtLoad { rd, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rr(FpuUnaryOp::Sqrt.opcode(), zd, scratch));
            }
            Inst::VecRecipStep { rg, rs } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rrr(FRECPS, zs, zs, zg));
                sink.put4(enc_vec_rrr(FMUL, zg, zg, zs));
            }
            Inst::VecRsqrtStep { rg, rs } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rrr(FMUL, zs, zs, zg));
                sink.put4(enc_vec_rrr(FRSQRTS, zs, zs, zg));
                sink.put4(enc_vec_rrr(FMUL, zg, zg, zs));
            }
            Inst::VecFpuMulAdd { rg, rs, rt } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(FMLA, zg, zs, zt));
            }
            Inst::VecFpuMulAddLoad { rg, rs, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rrr(FMLA, zg, zs, scratch));
            }
            Inst::VecFpuMulSub { rg, rs, rt } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(FMLS, zg, zs, zt));
            }
            Inst::VecFpuMulSubLoad { rg, rs, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rrr(FMLS, zg, zs, scratch));
            }
            Inst::VecFpuCmp { cond, rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                let ones = machreg_to_vec(profile.ones)?;
                let (base, swap) = cond.opcode_and_swap();
                let (zn, zm) = if swap { (zt, zs) } else { (zs, zt) };
                sink.put4(enc_cmp(base, u32::from(profile.cmp_pred), zn, zm));
                sink.put4(enc_vec_rrr(BitOp::Xor.opcode(), zd, zd, zd));
                sink.put4(enc_sel(zd, ones, zd));
            }
            Inst::VecFpuCmpLoad { cond, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let ones = machreg_to_vec(profile.ones)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                let (base, swap) = cond.opcode_and_swap();
                let (zn, zm) = if swap { (scratch, zs) } else { (zs, scratch) };
                sink.put4(enc_cmp(base, u32::from(profile.cmp_pred), zn, zm));
                sink.put4(enc_vec_rrr(BitOp::Xor.opcode(), zd, zd, zd));
                sink.put4(enc_sel(zd, ones, zd));
            }
            Inst::VecRound { mode, rd, rs } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(mode.round_opcode(), zd, zs));
            }
            Inst::VecRoundLoad { mode, rd, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rr(mode.round_opcode(), zd, scratch));
            }
            Inst::VecFpToInt { mode, rd, rs } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                match mode {
                    RoundMode::Zero => sink.put4(enc_vec_rr(FCVTZS, zd, zs)),
                    _ => {
                        sink.put4(enc_vec_rr(mode.round_opcode(), zd, zs));
                        sink.put4(enc_vec_rr(FCVTZS, zd, zd));
                    }
                }
            }
            Inst::VecFpToIntLoad { mode, rd, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                match mode {
                    RoundMode::Zero => sink.put4(enc_vec_rr(FCVTZS, zd, scratch)),
                    _ => {
                        sink.put4(enc_vec_rr(mode.round_opcode(), zd, scratch));
                        sink.put4(enc_vec_rr(FCVTZS, zd, zd));
                    }
                }
            }
            Inst::VecIntToFp { rd, rs } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(SCVTF, zd, zs));
            }
            Inst::VecIntToFpLoad { rd, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rr(SCVTF, zd, scratch));
            }
            Inst::VecIntRRR { op, rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(op.opcode(), zd, zs, zt));
            }
            Inst::VecIntRRM { op, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rrr(op.opcode(), zd, zs, scratch));
            }
            Inst::VecIntMul { rg, rs } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(MUL_PRED, zg, zs));
            }
            Inst::VecIntMulLoad { rg, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rr(MUL_PRED, zg, scratch));
            }
            Inst::VecIntMulRRR { rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_vec_rr(MUL_PRED, zd, zt));
            }
            Inst::VecIntMulRRM { rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
                sink.put4(enc_vec_rr(MUL_PRED, zd, scratch));
            }
            Inst::VecShiftImm { op, rd, rs, imm } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let count = u32::from(imm) % u32::from(ELEM_BITS);
                sink.put4(enc_shift_imm(op, zd, zs, count));
            }
            Inst::VecShiftLoad { op, rg, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let (xn, imm9) = mem_finalize_half(&mem)?;
                let wtmp = machreg_to_gpr(profile.scratch_base)?;
                let ztmp = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_ldurh(wtmp, xn, imm9));
                sink.put4(enc_vec_rr(DUP_GPR, ztmp, wtmp));
                sink.put4(enc_vec_rr(op.wide_opcode(), zg, ztmp));
            }
            Inst::VecShiftLoadRRR { op, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let (xn, imm9) = mem_finalize_half(&mem)?;
                let wtmp = machreg_to_gpr(profile.scratch_base)?;
                let ztmp = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_ldurh(wtmp, xn, imm9));
                sink.put4(enc_vec_rr(DUP_GPR, ztmp, wtmp));
                sink.put4(enc_vec_rr(op.wide_opcode(), zd, ztmp));
            }
            Inst::VecShiftVar { op, rg, rs } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                sink.put4(enc_vec_rr(op.wide_opcode(), zg, zs));
            }
            Inst::VecShiftVarLoad { op, rg, mem } => {
                let zg = machreg_to_vec(rg.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4(enc_vec_rr(op.wide_opcode(), zg, scratch));
            }
            Inst::VecShiftVarRRR { op, rd, rs, rt } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let zt = machreg_to_vec(rt)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_vec_rr(op.wide_opcode(), zd, zt));
            }
            Inst::VecShiftVarRRM { op, rd, rs, mem } => {
                let zd = machreg_to_vec(rd.to_reg())?;
                let zs = machreg_to_vec(rs)?;
                let (xn, imm4) = mem_finalize_vec(&mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                sink.put4(enc_vec_rrr(BitOp::Orr.opcode(), zd, zs, zs));
                sink.put4(enc_ldst(LD1H, scratch, xn, imm4));
                sink.put4(enc_vec_rr(op.wide_opcode(), zd, scratch));
            }
        }
        Ok(())
    }
}

/// Convenience constructor mirroring the two-operand mutating forms of the
/// portable vocabulary: `G = G op S` is the three-operand form with the
/// destination repeated as first source.
pub fn with_dst_as_src(op: IntOp, rg: Writable<Reg>, rs: Reg) -> Inst {
    Inst::VecIntRRR {
        op,
        rd: rg,
        rs: rg.to_reg(),
        rt: rs,
    }
}
