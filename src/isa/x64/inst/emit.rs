//! x86-64: binary code emission.

use crate::binemit::{ByteSink, CodeBuffer, MachInstEmit};
use crate::isa::x64::encoding::rex::{
    emit_reg_mem, emit_reg_reg, emit_shift_mem16_cl, encode_modrm, encode_sib, rex, LegacyPrefixes,
};
use crate::isa::x64::inst::*;
use crate::isa::x64::Profile;
use crate::reg::{Reg, RegClass};
use crate::result::{CodegenError, CodegenResult};

/// Element width of the packed-half profile, in bits.
pub const ELEM_BITS: u8 = 16;

/// Lanes per logical (paired) vector operand.
pub const LANES: i32 = 16;

const MOVAPS_LOAD: u8 = 0x28;
const MOVAPS_STORE: u8 = 0x29;
const SHIFT_IMM_OPCODE: u8 = 0x71;

use LegacyPrefixes::{None as PfxNone, _66};

fn machreg_to_xmm(m: Reg) -> CodegenResult<u8> {
    if m.class() != RegClass::Simd {
        return Err(CodegenError::Unsupported {
            isa: "x64",
            mnemonic: "base register in vector position",
        });
    }
    if m.hw_enc() >= regs::NUM_VECTOR_REGS {
        return Err(CodegenError::RegOutOfRange {
            index: m.hw_enc(),
            limit: regs::NUM_VECTOR_REGS,
        });
    }
    Ok(m.hw_enc())
}

fn machreg_to_gpr(m: Reg) -> CodegenResult<u8> {
    if m.class() != RegClass::Base {
        return Err(CodegenError::Unsupported {
            isa: "x64",
            mnemonic: "vector register in base position",
        });
    }
    if m.hw_enc() >= regs::NUM_BASE_REGS {
        return Err(CodegenError::RegOutOfRange {
            index: m.hw_enc(),
            limit: regs::NUM_BASE_REGS,
        });
    }
    Ok(m.hw_enc())
}

/// Classify a vector memory operand: 16-byte alignment of the
/// displacement, and room for the high-half offset in 32 bits.
fn mem_finalize(mem: &Amode) -> CodegenResult<(u8, i32)> {
    let base = machreg_to_gpr(mem.base())?;
    let off = mem.offset();
    if off % 16 != 0 {
        return Err(CodegenError::DispOutOfRange {
            disp: off,
            access: 16,
        });
    }
    match i32::try_from(off) {
        Ok(disp) if disp <= i32::MAX - 16 => {
            log::trace!("mem_finalize: [{:?} + {}]", mem.base(), disp);
            Ok((base, disp))
        }
        _ => Err(CodegenError::DispOutOfRange {
            disp: off,
            access: 16,
        }),
    }
}

/// Emit both halves of a register-register pair operation.
fn put_pair_rr(sink: &mut CodeBuffer, prefix: LegacyPrefixes, opcode: u8, g: u8, e: u8) {
    emit_reg_reg(sink, prefix, opcode, g, e, false);
    emit_reg_reg(sink, prefix, opcode, g, e, true);
}

/// Emit both halves of a register-memory pair operation; the high half
/// addresses the second 128-bit block at `disp + 16` unless the operation
/// reads a shared scalar (`shared_scalar`), which re-reads `disp`.
fn put_pair_rm(
    sink: &mut CodeBuffer,
    prefix: LegacyPrefixes,
    opcode: u8,
    g: u8,
    base: u8,
    disp: i32,
    shared_scalar: bool,
) {
    emit_reg_mem(sink, prefix, opcode, g, base, disp, false);
    let hi = if shared_scalar { disp } else { disp + 16 };
    emit_reg_mem(sink, prefix, opcode, g, base, hi, true);
}

/// Emit both halves of the immediate shift: `66 REX 0F 71 /ext ib`.
fn put_pair_shift_imm(sink: &mut CodeBuffer, ext: u8, g: u8, count: u8) {
    for high in [false, true] {
        sink.put1(0x66);
        sink.put1(rex(false, false, high));
        sink.put1(0x0F);
        sink.put1(SHIFT_IMM_OPCODE);
        sink.put1(encode_modrm(3, ext, g));
        sink.put1(count);
    }
}

/// One 16-bit MOVZX of a lane into the count register.
fn put_movzx16(sink: &mut CodeBuffer, g: u8, base: u8, disp: i32) {
    debug_assert!(g < 8);
    sink.put1(rex(false, false, base >= 8));
    sink.put1(0x0F);
    sink.put1(0xB7);
    if base & 7 == 4 {
        sink.put1(encode_modrm(2, g, 4));
        sink.put1(encode_sib(0, 4, base & 7));
    } else {
        sink.put1(encode_modrm(2, g, base & 7));
    }
    sink.put4(disp as u32);
}

struct InfoBlock {
    base: u8,
    count: u8,
}

fn info_block(profile: &Profile) -> CodegenResult<InfoBlock> {
    Ok(InfoBlock {
        base: machreg_to_gpr(profile.info_base)?,
        count: machreg_to_gpr(profile.count_reg)?,
    })
}

/// The scalar lane loop of the variable shifts: for each of the 16 lanes,
/// load its count into cl and shift the lane in the first scratch area.
/// The count register is preserved around the loop.
fn put_lane_loop(sink: &mut CodeBuffer, profile: &Profile, op: ShiftOp, ib: &InfoBlock) {
    debug_assert!(ib.count < 8);
    sink.put1(0x50 | ib.count); // push
    for lane in 0..LANES {
        let off = lane * 2;
        put_movzx16(sink, ib.count, ib.base, profile.scr02 + off);
        emit_shift_mem16_cl(sink, op.scalar_ext(), ib.base, profile.scr01 + off);
    }
    sink.put1(0x58 | ib.count); // pop
}

impl MachInstEmit for Inst {
    type Profile = Profile;

    fn emit(&self, profile: &Profile, sink: &mut CodeBuffer) -> CodegenResult<()> {
        match *self {
            Inst::VecMov { rd, rs } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
            }
            Inst::VecLoad { rd, mem } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, PfxNone, MOVAPS_LOAD, d, base, disp, false);
            }
            Inst::VecStore { rs, mem } => {
                let s = machreg_to_xmm(rs)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, PfxNone, MOVAPS_STORE, s, base, disp, false);
            }
            Inst::VecMaskMerge { rg, rs } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let mask = machreg_to_xmm(profile.mask)?;
                if profile.has_native_blend {
                    return Err(CodegenError::Unsupported {
                        isa: "x64",
                        mnemonic: "native blend",
                    });
                }
                put_pair_rr(sink, _66, AluOp::And.opcode(), s, mask);
                put_pair_rr(sink, _66, AluOp::Ann.opcode(), mask, g);
                put_pair_rr(sink, _66, AluOp::Orr.opcode(), mask, s);
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, g, mask);
            }
            Inst::VecMaskMergeLoad { rg, mem } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let mask = machreg_to_xmm(profile.mask)?;
                let ib = info_block(profile)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), mask, ib.base, profile.gpc07, false);
                put_pair_rr(sink, _66, AluOp::And.opcode(), g, mask);
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), mask, base, disp, false);
                put_pair_rr(sink, _66, AluOp::Orr.opcode(), g, mask);
            }
            Inst::VecMaskMergeStore { rs, mem } => {
                let s = machreg_to_xmm(rs)?;
                let mask = machreg_to_xmm(profile.mask)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rr(sink, _66, AluOp::And.opcode(), s, mask);
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), mask, base, disp, false);
                put_pair_rr(sink, _66, AluOp::Orr.opcode(), mask, s);
                put_pair_rm(sink, PfxNone, MOVAPS_STORE, mask, base, disp, false);
            }
            Inst::VecAluRR { op, rg, rs } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                put_pair_rr(sink, _66, op.opcode(), g, s);
            }
            Inst::VecAluRM { op, rg, mem } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, _66, op.opcode(), g, base, disp, false);
            }
            Inst::VecAluRRR { op, rd, rs, rt } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let t = machreg_to_xmm(rt)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_rr(sink, _66, op.opcode(), d, t);
            }
            Inst::VecAluRRM { op, rd, rs, mem } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_rm(sink, _66, op.opcode(), d, base, disp, false);
            }
            Inst::VecNot { rg } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let ib = info_block(profile)?;
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), g, ib.base, profile.gpc07, false);
            }
            Inst::VecNotRR { rd, rs } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let ib = info_block(profile)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), d, ib.base, profile.gpc07, false);
            }
            Inst::VecOrn { rg, rs } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let ib = info_block(profile)?;
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), g, ib.base, profile.gpc07, false);
                put_pair_rr(sink, _66, AluOp::Orr.opcode(), g, s);
            }
            Inst::VecOrnLoad { rg, mem } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let ib = info_block(profile)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), g, ib.base, profile.gpc07, false);
                put_pair_rm(sink, _66, AluOp::Orr.opcode(), g, base, disp, false);
            }
            Inst::VecOrnRRR { rd, rs, rt } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let t = machreg_to_xmm(rt)?;
                let ib = info_block(profile)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), d, ib.base, profile.gpc07, false);
                put_pair_rr(sink, _66, AluOp::Orr.opcode(), d, t);
            }
            Inst::VecOrnRRM { rd, rs, mem } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let ib = info_block(profile)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_rm(sink, _66, AluOp::Ann.opcode(), d, ib.base, profile.gpc07, false);
                put_pair_rm(sink, _66, AluOp::Orr.opcode(), d, base, disp, false);
            }
            Inst::VecShiftImm { op, rg, imm } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                put_pair_shift_imm(sink, op.imm_ext(), g, imm % ELEM_BITS);
            }
            Inst::VecShiftImmRRR { op, rd, rs, imm } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_shift_imm(sink, op.imm_ext(), d, imm % ELEM_BITS);
            }
            Inst::VecShiftMem { op, rg, mem } => {
                let g = machreg_to_xmm(rg.to_reg())?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, _66, op.mem_opcode(), g, base, disp, true);
            }
            Inst::VecShiftMemRRR { op, rd, rs, mem } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rr(sink, PfxNone, MOVAPS_LOAD, d, s);
                put_pair_rm(sink, _66, op.mem_opcode(), d, base, disp, true);
            }
            Inst::VecShiftVarRRR { op, rd, rs, rt } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let t = machreg_to_xmm(rt)?;
                let ib = info_block(profile)?;
                put_pair_rm(sink, PfxNone, MOVAPS_STORE, s, ib.base, profile.scr01, false);
                put_pair_rm(sink, PfxNone, MOVAPS_STORE, t, ib.base, profile.scr02, false);
                put_lane_loop(sink, profile, op, &ib);
                put_pair_rm(sink, PfxNone, MOVAPS_LOAD, d, ib.base, profile.scr01, false);
            }
            Inst::VecShiftVarRRM { op, rd, rs, mem } => {
                let d = machreg_to_xmm(rd.to_reg())?;
                let s = machreg_to_xmm(rs)?;
                let ib = info_block(profile)?;
                let (base, disp) = mem_finalize(&mem)?;
                put_pair_rm(sink, PfxNone, MOVAPS_STORE, s, ib.base, profile.scr01, false);
                put_pair_rm(sink, PfxNone, MOVAPS_LOAD, d, base, disp, false);
                put_pair_rm(sink, PfxNone, MOVAPS_STORE, d, ib.base, profile.scr02, false);
                put_lane_loop(sink, profile, op, &ib);
                put_pair_rm(sink, PfxNone, MOVAPS_LOAD, d, ib.base, profile.scr01, false);
            }
        }
        Ok(())
    }
}
