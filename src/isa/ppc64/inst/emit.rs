//! POWER: binary code emission.
//!
//! All instruction words are written big-endian.

use crate::binemit::{ByteSink, CodeBuffer, MachInstEmit};
use crate::bitfield::{Field, InstWord};
use crate::isa::ppc64::inst::*;
use crate::isa::ppc64::Profile;
use crate::reg::{Reg, RegClass};
use crate::result::{CodegenError, CodegenResult};
use smallvec::SmallVec;

/// Element width of the packed-half profile, in bits.
pub const ELEM_BITS: u8 = 16;

const VD: Field = Field::new(21, 5);
const VA: Field = Field::new(16, 5);
const VB: Field = Field::new(11, 5);
const VC: Field = Field::new(6, 5);
const IMM16: Field = Field::new(0, 16);

const XXSEL: u32 = 0xF000_003F;
const XXLNOR: u32 = 0xF000_0517;
const VXOR: u32 = 0x1000_04C4;
const VMLADDUHM: u32 = 0x1000_0022;
const VSPLTISH: u32 = 0x1000_034C;
const VSPLTH: u32 = 0x1000_024C;
const LXVX: u32 = 0x7C00_0219;
const STXVX: u32 = 0x7C00_0319;
const LXSIHZX: u32 = 0x7C00_004E;
const ADDI: u32 = 0x3800_0000;
const ADDIS: u32 = 0x3C00_0000;
const ORI: u32 = 0x6000_0000;

fn machreg_to_vec(m: Reg) -> CodegenResult<u32> {
    if m.class() != RegClass::Simd {
        return Err(CodegenError::Unsupported {
            isa: "ppc64",
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
            isa: "ppc64",
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

fn enc_vec_rrr(top: u32, vd: u32, va: u32, vb: u32) -> u32 {
    InstWord::opcode(top)
        .field(VD, vd)
        .field(VA, va)
        .field(VB, vb)
        .bits()
}

fn enc_vmladd(vd: u32, va: u32, vb: u32, vc: u32) -> u32 {
    InstWord::opcode(VMLADDUHM)
        .field(VD, vd)
        .field(VA, va)
        .field(VB, vb)
        .field(VC, vc)
        .bits()
}

/// Materialize a byte displacement into the scratch base register: one
/// ADDI for 16-bit values, ADDIS+ORI for anything wider that still fits
/// 32 bits.
fn stage_displacement(tdxx: u32, disp: i64) -> CodegenResult<SmallVec<[u32; 2]>> {
    let mut words = SmallVec::new();
    if let Ok(imm) = i16::try_from(disp) {
        words.push(
            InstWord::opcode(ADDI)
                .field(VD, tdxx)
                .field(IMM16, (imm as u16).into())
                .bits(),
        );
    } else if i32::try_from(disp).is_ok() {
        let bits = disp as u32;
        words.push(
            InstWord::opcode(ADDIS)
                .field(VD, tdxx)
                .field(IMM16, bits >> 16)
                .bits(),
        );
        words.push(
            InstWord::opcode(ORI)
                .field(VD, tdxx)
                .field(VA, tdxx)
                .field(IMM16, bits & 0xffff)
                .bits(),
        );
    } else {
        return Err(CodegenError::DispOutOfRange { disp, access: 16 });
    }
    log::trace!("stage_displacement: {disp} in {} words", words.len());
    Ok(words)
}

/// Classify a memory operand: returns the staging words plus the (base,
/// index) register pair of the final indexed access.
fn mem_finalize(
    profile: &Profile,
    mem: &AMode,
) -> CodegenResult<(SmallVec<[u32; 2]>, u32, u32)> {
    let base = machreg_to_gpr(mem.base())?;
    let tdxx = machreg_to_gpr(profile.scratch_disp)?;
    let words = stage_displacement(tdxx, mem.offset())?;
    Ok((words, base, tdxx))
}

impl Inst {
    /// Stage a vector memory operand into the primary SIMD scratch; returns
    /// the scratch register number.
    fn emit_staged_load(profile: &Profile, mem: &AMode, sink: &mut CodeBuffer) -> CodegenResult<u32> {
        let (stage, base, tdxx) = mem_finalize(profile, mem)?;
        let scratch = machreg_to_vec(profile.scratch)?;
        for w in stage {
            sink.put4_be(w);
        }
        sink.put4_be(enc_vec_rrr(LXVX, scratch, base, tdxx));
        Ok(scratch)
    }
}

impl MachInstEmit for Inst {
    type Profile = Profile;

    fn emit(&self, profile: &Profile, sink: &mut CodeBuffer) -> CodegenResult<()> {
        match *self {
            Inst::VecLoad { rd, mem } => {
                let vt = machreg_to_vec(rd.to_reg())?;
                let (stage, base, tdxx) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4_be(w);
                }
                sink.put4_be(enc_vec_rrr(LXVX, vt, base, tdxx));
            }
            Inst::VecStore { rs, mem } => {
                let vt = machreg_to_vec(rs)?;
                let (stage, base, tdxx) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4_be(w);
                }
                sink.put4_be(enc_vec_rrr(STXVX, vt, base, tdxx));
            }
            Inst::VecMov { rd, rs } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                sink.put4_be(enc_vec_rrr(BitOp::Orr.opcode(), vd, vs, vs));
            }
            Inst::VecMaskMerge { rg, rs } => {
                if !profile.has_native_blend {
                    return Err(CodegenError::MissingCapability("native blend"));
                }
                let vg = machreg_to_vec(rg.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                sink.put4_be(enc_vec_rrr(XXSEL, vg, vg, vs));
            }
            Inst::VecMaskMergeLoad { rg, mem } => {
                if !profile.has_native_blend {
                    return Err(CodegenError::MissingCapability("native blend"));
                }
                let vg = machreg_to_vec(rg.to_reg())?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4_be(enc_vec_rrr(XXSEL, vg, vg, scratch));
            }
            Inst::VecMaskMergeStore { rs, mem } => {
                if !profile.has_native_blend {
                    return Err(CodegenError::MissingCapability("native blend"));
                }
                let vs = machreg_to_vec(rs)?;
                let (stage, base, tdxx) = mem_finalize(profile, &mem)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                for w in stage {
                    sink.put4_be(w);
                }
                sink.put4_be(enc_vec_rrr(LXVX, scratch, base, tdxx));
                sink.put4_be(enc_vec_rrr(XXSEL, scratch, scratch, vs));
                sink.put4_be(enc_vec_rrr(STXVX, scratch, base, tdxx));
            }
            Inst::VecBitRRR { op, rd, rs, rt } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let vt = machreg_to_vec(rt)?;
                let (va, vb) = if op.swaps_operands() { (vt, vs) } else { (vs, vt) };
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, va, vb));
            }
            Inst::VecBitRRM { op, rd, rs, mem } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                let (va, vb) = if op.swaps_operands() {
                    (scratch, vs)
                } else {
                    (vs, scratch)
                };
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, va, vb));
            }
            Inst::VecNot { rd, rs } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                sink.put4_be(enc_vec_rrr(XXLNOR, vd, vs, vs));
            }
            Inst::VecIntRRR { op, rd, rs, rt } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let vt = machreg_to_vec(rt)?;
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, vs, vt));
            }
            Inst::VecIntRRM { op, rd, rs, mem } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, vs, scratch));
            }
            Inst::VecMulRRR { rd, rs, rt } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let vt = machreg_to_vec(rt)?;
                let acc = machreg_to_vec(profile.scratch)?;
                sink.put4_be(enc_vec_rrr(VXOR, acc, acc, acc));
                sink.put4_be(enc_vmladd(vd, vs, vt, acc));
            }
            Inst::VecMulRRM { rd, rs, mem } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let acc = machreg_to_vec(profile.scratch2)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4_be(enc_vec_rrr(VXOR, acc, acc, acc));
                sink.put4_be(enc_vmladd(vd, vs, scratch, acc));
            }
            Inst::VecShiftImm { op, rd, rs, imm } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                let count = u32::from(imm) % u32::from(ELEM_BITS);
                sink.put4_be(enc_vec_rrr(VSPLTISH, scratch, count, 0));
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, vs, scratch));
            }
            Inst::VecShiftLoad { op, rd, rs, mem } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let scratch = machreg_to_vec(profile.scratch)?;
                let (stage, base, tdxx) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4_be(w);
                }
                sink.put4_be(enc_vec_rrr(LXSIHZX, scratch, base, tdxx));
                sink.put4_be(enc_vec_rrr(
                    VSPLTH,
                    scratch,
                    u32::from(profile.splat_lane),
                    scratch,
                ));
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, vs, scratch));
            }
            Inst::VecShiftVarRRR { op, rd, rs, rt } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let vt = machreg_to_vec(rt)?;
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, vs, vt));
            }
            Inst::VecShiftVarRRM { op, rd, rs, mem } => {
                let vd = machreg_to_vec(rd.to_reg())?;
                let vs = machreg_to_vec(rs)?;
                let scratch = Inst::emit_staged_load(profile, &mem, sink)?;
                sink.put4_be(enc_vec_rrr(op.opcode(), vd, vs, scratch));
            }
        }
        Ok(())
    }
}
