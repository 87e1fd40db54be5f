//! MIPS64: binary code emission.
//!
//! Words are emitted little-endian (the mips64el configuration).

use crate::binemit::{ByteSink, CodeBuffer, MachInstEmit};
use crate::bitfield::{Field, InstWord};
use crate::isa::mips64::inst::*;
use crate::isa::mips64::Profile;
use crate::reg::{Reg, RegClass};
use crate::result::{CodegenError, CodegenResult};
use smallvec::SmallVec;

const RD: Field = Field::new(11, 5);
const RS: Field = Field::new(21, 5);
const RT: Field = Field::new(16, 5);
const SA: Field = Field::new(6, 5);
const IMM16: Field = Field::new(0, 16);

const LD: u32 = 0xDC00_0000;
const SD: u32 = 0xFC00_0000;
const LUI: u32 = 0x3C00_0000;
const DADDIU: u32 = 0x6400_0000;
const ORI: u32 = 0x3400_0000;

fn machreg(m: Reg) -> CodegenResult<u32> {
    if m.class() != RegClass::Base {
        return Err(CodegenError::Unsupported {
            isa: "mips64",
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

fn enc_rrr(funct: u32, rd: u32, rs: u32, rt: u32) -> u32 {
    InstWord::opcode(funct)
        .field(RD, rd)
        .field(RS, rs)
        .field(RT, rt)
        .bits()
}

fn enc_ri(opcode: u32, rs: u32, rt: u32, imm: u32) -> u32 {
    InstWord::opcode(opcode)
        .field(RS, rs)
        .field(RT, rt)
        .field(IMM16, imm)
        .bits()
}

fn enc_mem(opcode: u32, rt: u32, base: u32, imm: u32) -> u32 {
    InstWord::opcode(opcode)
        .field(RS, base)
        .field(RT, rt)
        .field(IMM16, imm)
        .bits()
}

fn enc_shift_imm(op: ShiftOp, rd: u32, rt: u32, count: u8) -> u32 {
    InstWord::opcode(op.funct_imm(count))
        .field(RD, rd)
        .field(RT, rt)
        .field(SA, u32::from(count) & 0x1f)
        .bits()
}

/// Materialize an immediate into a register: one DADDIU when it fits,
/// a LUI/ORI pair otherwise.
fn load_imm(rd: u32, value: i64) -> CodegenResult<SmallVec<[u32; 2]>> {
    let mut words = SmallVec::new();
    match imms::classify_move(value)? {
        ImmShape::Inline => {
            let imm = Imm16::maybe_from_i64(value).expect("classified inline");
            words.push(enc_ri(DADDIU, 0, rd, imm.bits()));
        }
        ImmShape::LoadHighLow => {
            let bits = value as u32;
            words.push(enc_ri(LUI, 0, rd, bits >> 16));
            words.push(enc_ri(ORI, rd, rd, bits & 0xffff));
        }
    }
    Ok(words)
}

/// Classify a memory operand: an in-range displacement encodes inline,
/// otherwise the address is computed into the displacement staging
/// register first.
fn mem_finalize(
    profile: &Profile,
    mem: &AMode,
) -> CodegenResult<(SmallVec<[u32; 3]>, u32, u32)> {
    let base = machreg(mem.base())?;
    let off = mem.offset();
    if let Some(imm) = Imm16::maybe_from_i64(off) {
        return Ok((SmallVec::new(), base, imm.bits()));
    }
    if i32::try_from(off).is_err() {
        return Err(CodegenError::DispOutOfRange { disp: off, access: 8 });
    }
    log::trace!("mem_finalize: staging displacement {off}");
    let tdxx = machreg(profile.scratch_disp)?;
    let bits = off as u32;
    let mut words = SmallVec::new();
    words.push(enc_ri(LUI, 0, tdxx, bits >> 16));
    words.push(enc_ri(ORI, tdxx, tdxx, bits & 0xffff));
    words.push(enc_rrr(AluOPRRR::Daddu.funct(), tdxx, tdxx, base));
    Ok((words, tdxx, 0))
}

/// The flags materialization appended by the `set_flags` variants.
fn enc_flags(profile: &Profile, result: u32) -> CodegenResult<u32> {
    let tlxx = machreg(profile.flags_left)?;
    let zero = machreg(profile.zero)?;
    Ok(enc_rrr(AluOPRRR::Or.funct(), tlxx, result, zero))
}

/// Emit an immediate ALU operation against an arbitrary destination
/// register pair (used by both the register and memory forms).
fn put_alu_imm(
    sink: &mut CodeBuffer,
    profile: &Profile,
    op: AluOPRRR,
    reg: u32,
    imm: i64,
) -> CodegenResult<()> {
    // Subtract reuses the add-immediate with a negated value.
    if op == AluOPRRR::Dsubu {
        if let Some(neg) = imm.checked_neg().and_then(Imm16::maybe_from_i64) {
            sink.put4(enc_ri(DADDIU, reg, reg, neg.bits()));
            return Ok(());
        }
        let tixx = machreg(profile.scratch_imm)?;
        let stage = load_imm(tixx, imm)?;
        for w in stage {
            sink.put4(w);
        }
        sink.put4(enc_rrr(op.funct(), reg, reg, tixx));
        return Ok(());
    }
    let inline = match op.imm_opcode() {
        Some(_) if op.imm_is_arith() => imms::classify_arith(imm)? == ImmShape::Inline,
        Some(_) => imms::classify_logic(imm)? == ImmShape::Inline,
        None => {
            imms::classify_move(imm)?;
            false
        }
    };
    if inline {
        let opcode = op.imm_opcode().expect("inline implies immediate form");
        let bits = if op.imm_is_arith() {
            Imm16::maybe_from_i64(imm).expect("classified inline").bits()
        } else {
            UImm16::maybe_from_i64(imm).expect("classified inline").bits()
        };
        sink.put4(enc_ri(opcode, reg, reg, bits));
    } else {
        let tixx = machreg(profile.scratch_imm)?;
        let stage = load_imm(tixx, imm)?;
        for w in stage {
            sink.put4(w);
        }
        sink.put4(enc_rrr(op.funct(), reg, reg, tixx));
    }
    Ok(())
}

impl MachInstEmit for Inst {
    type Profile = Profile;

    fn emit(&self, profile: &Profile, sink: &mut CodeBuffer) -> CodegenResult<()> {
        let zero = machreg(profile.zero)?;
        match *self {
            Inst::MovRI { rd, imm } => {
                let rd = machreg(rd.to_reg())?;
                for w in load_imm(rd, imm)? {
                    sink.put4(w);
                }
            }
            Inst::MovMI { mem, imm } => {
                let tixx = machreg(profile.scratch_imm)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                let value = load_imm(tixx, imm)?;
                for w in stage {
                    sink.put4(w);
                }
                for w in value {
                    sink.put4(w);
                }
                sink.put4(enc_mem(SD, tixx, base, disp));
            }
            Inst::MovRR { rd, rs } => {
                let rd = machreg(rd.to_reg())?;
                let rs = machreg(rs)?;
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), rd, rs, zero));
            }
            Inst::Load { rd, mem } => {
                let rd = machreg(rd.to_reg())?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, rd, base, disp));
            }
            Inst::Store { rs, mem } => {
                let rs = machreg(rs)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(SD, rs, base, disp));
            }
            Inst::AluRR {
                op,
                rg,
                rs,
                set_flags,
            } => {
                let g = machreg(rg.to_reg())?;
                let s = machreg(rs)?;
                sink.put4(enc_rrr(op.funct(), g, g, s));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::AluLd {
                op,
                rg,
                mem,
                set_flags,
            } => {
                let g = machreg(rg.to_reg())?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(op.funct(), g, g, tmxx));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::AluSt { op, rs, mem } => {
                let s = machreg(rs)?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(op.funct(), tmxx, tmxx, s));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::AluRI {
                op,
                rg,
                imm,
                set_flags,
            } => {
                let g = machreg(rg.to_reg())?;
                put_alu_imm(sink, profile, op, g, imm)?;
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::AluMI { op, mem, imm } => {
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                put_alu_imm(sink, profile, op, tmxx, imm)?;
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::NotRR { rg } => {
                let g = machreg(rg.to_reg())?;
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), g, zero, g));
            }
            Inst::NotMx { mem } => {
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), tmxx, zero, tmxx));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::NegRR { rg, set_flags } => {
                let g = machreg(rg.to_reg())?;
                sink.put4(enc_rrr(AluOPRRR::Dsubu.funct(), g, zero, g));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::NegMx { mem } => {
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Dsubu.funct(), tmxx, zero, tmxx));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::AnnRR { rg, rs } => {
                let g = machreg(rg.to_reg())?;
                let s = machreg(rs)?;
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), g, zero, g));
                sink.put4(enc_rrr(AluOPRRR::And.funct(), g, g, s));
            }
            Inst::AnnLd { rg, mem } => {
                let g = machreg(rg.to_reg())?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), g, zero, g));
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::And.funct(), g, g, tmxx));
            }
            Inst::AnnSt { rs, mem } => {
                let s = machreg(rs)?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), tmxx, zero, tmxx));
                sink.put4(enc_rrr(AluOPRRR::And.funct(), tmxx, tmxx, s));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::OrnRR { rg, rs } => {
                let g = machreg(rg.to_reg())?;
                let s = machreg(rs)?;
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), g, zero, g));
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), g, g, s));
            }
            Inst::OrnLd { rg, mem } => {
                let g = machreg(rg.to_reg())?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), g, zero, g));
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), g, g, tmxx));
            }
            Inst::OrnSt { rs, mem } => {
                let s = machreg(rs)?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Nor.funct(), tmxx, zero, tmxx));
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), tmxx, tmxx, s));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::ShiftRx { op, rg, set_flags } => {
                let g = machreg(rg.to_reg())?;
                let count = machreg(profile.count_reg)?;
                sink.put4(enc_rrr(op.funct_var(), g, count, g));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::ShiftMx { op, mem } => {
                let tmxx = machreg(profile.scratch_mem)?;
                let count = machreg(profile.count_reg)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(op.funct_var(), tmxx, count, tmxx));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::ShiftRI {
                op,
                rg,
                imm,
                set_flags,
            } => {
                let g = machreg(rg.to_reg())?;
                let count = imm % 64;
                sink.put4(enc_shift_imm(op, g, g, count));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::ShiftMI { op, mem, imm } => {
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                let count = imm % 64;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_shift_imm(op, tmxx, tmxx, count));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::ShiftRR {
                op,
                rg,
                rs,
                set_flags,
            } => {
                let g = machreg(rg.to_reg())?;
                let count = machreg(rs)?;
                sink.put4(enc_rrr(op.funct_var(), g, count, g));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::ShiftLd {
                op,
                rg,
                mem,
                set_flags,
            } => {
                let g = machreg(rg.to_reg())?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(op.funct_var(), g, tmxx, g));
                if set_flags {
                    let flags = enc_flags(profile, g)?;
                    sink.put4(flags);
                }
            }
            Inst::ShiftSt { rs, op, mem } => {
                let count = machreg(rs)?;
                let tmxx = machreg(profile.scratch_mem)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tmxx, base, disp));
                sink.put4(enc_rrr(op.funct_var(), tmxx, count, tmxx));
                sink.put4(enc_mem(SD, tmxx, base, disp));
            }
            Inst::CmpRR { rs, rt } => {
                let s = machreg(rs)?;
                let t = machreg(rt)?;
                let tlxx = machreg(profile.flags_left)?;
                let trxx = machreg(profile.flags_right)?;
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), trxx, t, zero));
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), tlxx, s, zero));
            }
            Inst::CmpRI { rs, imm } => {
                let s = machreg(rs)?;
                let tlxx = machreg(profile.flags_left)?;
                let trxx = machreg(profile.flags_right)?;
                let value = load_imm(trxx, imm)?;
                for w in value {
                    sink.put4(w);
                }
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), tlxx, s, zero));
            }
            Inst::CmpRM { rs, mem } => {
                let s = machreg(rs)?;
                let tlxx = machreg(profile.flags_left)?;
                let trxx = machreg(profile.flags_right)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, trxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), tlxx, s, zero));
            }
            Inst::CmpMR { mem, rt } => {
                let t = machreg(rt)?;
                let tlxx = machreg(profile.flags_left)?;
                let trxx = machreg(profile.flags_right)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tlxx, base, disp));
                sink.put4(enc_rrr(AluOPRRR::Or.funct(), trxx, t, zero));
            }
            Inst::CmpMI { mem, imm } => {
                let tlxx = machreg(profile.flags_left)?;
                let trxx = machreg(profile.flags_right)?;
                let (stage, base, disp) = mem_finalize(profile, &mem)?;
                let value = load_imm(trxx, imm)?;
                for w in value {
                    sink.put4(w);
                }
                for w in stage {
                    sink.put4(w);
                }
                sink.put4(enc_mem(LD, tlxx, base, disp));
            }
        }
        Ok(())
    }
}
