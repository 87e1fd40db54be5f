use crate::binemit::{CodeBuffer, MachInstEmit};
use crate::isa::aarch64::inst::*;
use crate::isa::aarch64::{Profile, PROFILE};
use crate::result::CodegenError;

fn emit_bytes(inst: &Inst) -> Vec<u8> {
    let mut buf = CodeBuffer::new();
    inst.emit(&PROFILE, &mut buf).expect("encode");
    buf.data().to_vec()
}

fn words(ws: &[u32]) -> Vec<u8> {
    ws.iter().flat_map(|w| w.to_le_bytes()).collect()
}

#[test]
fn test_aarch64_binemit() {
    struct TestUnit {
        inst: Inst,
        assembly: &'static str,
        code: Vec<u32>,
    }

    impl TestUnit {
        fn new(inst: Inst, assembly: &'static str, code: Vec<u32>) -> Self {
            Self {
                inst,
                assembly,
                code,
            }
        }
    }

    let mut insns = Vec::<TestUnit>::with_capacity(32);

    insns.push(TestUnit::new(
        Inst::VecMov {
            rd: writable_zreg(1),
            rs: zreg(2),
        },
        "mov z1.d, z2.d",
        vec![0x0460_3000 | 1 | 2 << 5 | 2 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecLoad {
            rd: writable_zreg(3),
            mem: AMode::RegOffset(xreg(2), 32),
        },
        "ld1h {z3.h}, p0/z, [x2, #2, mul vl]",
        vec![0x8580_4000 | 3 | 2 << 5 | 2 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecStore {
            rs: zreg(3),
            mem: AMode::RegOffset(xreg(2), -16),
        },
        "st1h {z3.h}, p0, [x2, #-1, mul vl]",
        vec![0xE580_4000 | 3 | 2 << 5 | 0xf << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecBitRRR {
            op: BitOp::And,
            rd: writable_zreg(4),
            rs: zreg(5),
            rt: zreg(6),
        },
        "and z4.d, z5.d, z6.d",
        vec![0x0420_3000 | 4 | 5 << 5 | 6 << 16],
    ));
    // The and-not family swaps its vector operands onto BIC.
    insns.push(TestUnit::new(
        Inst::VecBitRRR {
            op: BitOp::Ann,
            rd: writable_zreg(4),
            rs: zreg(5),
            rt: zreg(6),
        },
        "bic z4.d, z6.d, z5.d",
        vec![0x04E0_3000 | 4 | 6 << 5 | 5 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecIntRRR {
            op: IntOp::Add,
            rd: writable_zreg(2),
            rs: zreg(3),
            rt: zreg(5),
        },
        "add z2.h, z3.h, z5.h",
        vec![0x0460_0000 | 2 | 3 << 5 | 5 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecFpuRRR {
            op: FpuRRROp::Mul,
            rd: writable_zreg(1),
            rs: zreg(2),
            rt: zreg(3),
        },
        "fmul z1.h, z2.h, z3.h",
        vec![0x6540_0800 | 1 | 2 << 5 | 3 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecFpuRR {
            op: FpuPredOp::Div,
            rg: writable_zreg(7),
            rs: zreg(8),
        },
        "fdiv z7.h, p0/m, z7.h, z8.h",
        vec![0x654D_8000 | 7 | 8 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecNot {
            rd: writable_zreg(1),
            rs: zreg(9),
        },
        "not z1.h, p0/m, z9.h",
        vec![0x045E_A000 | 1 | 9 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecFpuUnary {
            op: FpuUnaryOp::Sqrt,
            rd: writable_zreg(2),
            rs: zreg(3),
        },
        "fsqrt z2.h, p0/m, z3.h",
        vec![0x654D_A000 | 2 | 3 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecRound {
            mode: RoundMode::Zero,
            rd: writable_zreg(2),
            rs: zreg(3),
        },
        "frintz z2.h, p0/m, z3.h",
        vec![0x6543_A000 | 2 | 3 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecFpToInt {
            mode: RoundMode::Zero,
            rd: writable_zreg(4),
            rs: zreg(5),
        },
        "fcvtzs z4.h, p0/m, z5.h",
        vec![0x655A_A000 | 4 | 5 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecIntToFp {
            rd: writable_zreg(4),
            rs: zreg(5),
        },
        "scvtf z4.h, p0/m, z5.h",
        vec![0x6552_A000 | 4 | 5 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecShiftVar {
            op: ShiftOp::Shl,
            rg: writable_zreg(3),
            rs: zreg(4),
        },
        "lsl z3.h, p0/m, z3.h, z4.d",
        vec![0x0453_8000 | 3 | 4 << 5],
    ));
    insns.push(TestUnit::new(
        Inst::VecShiftImm {
            op: ShiftOp::Shl,
            rd: writable_zreg(1),
            rs: zreg(2),
            imm: 3,
        },
        "lsl z1.h, z2.h, #3",
        vec![0x0430_9400 | 0x800 | 1 | 2 << 5 | 3 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecShiftImm {
            op: ShiftOp::ShrU,
            rd: writable_zreg(1),
            rs: zreg(2),
            imm: 3,
        },
        "lsr z1.h, z2.h, #3",
        vec![0x0430_9400 | 1 | 2 << 5 | 13 << 16],
    ));
    insns.push(TestUnit::new(
        Inst::VecFpuMulAdd {
            rg: writable_zreg(1),
            rs: zreg(2),
            rt: zreg(3),
        },
        "fmla z1.h, p0/m, z2.h, z3.h",
        vec![0x6560_0000 | 1 | 2 << 5 | 3 << 16],
    ));

    for unit in insns {
        let actual = emit_bytes(&unit.inst);
        assert_eq!(
            actual,
            words(&unit.code),
            "wrong encoding for {}",
            unit.assembly
        );
    }
}

#[test]
fn mask_merge_fixture() {
    // Fixed two-word idiom: predicate test of the implicit mask register,
    // then a select of the replacement lanes.
    let inst = Inst::VecMaskMerge {
        rg: writable_zreg(1),
        rs: zreg(2),
    };
    let expected = words(&[
        0x2440_A000 | 1, // mask register z0 in the Zn slot
        0x0560_C400 | 1 | 2 << 5 | 1 << 16,
    ]);
    assert_eq!(emit_bytes(&inst), expected);
    // Byte-identical across runs.
    assert_eq!(emit_bytes(&inst), expected);
}

#[test]
fn mask_merge_fails_closed_without_blend() {
    let profile = Profile {
        has_native_blend: false,
        ..PROFILE
    };
    let inst = Inst::VecMaskMerge {
        rg: writable_zreg(1),
        rs: zreg(2),
    };
    let mut buf = CodeBuffer::new();
    assert_eq!(
        inst.emit(&profile, &mut buf),
        Err(CodegenError::MissingCapability("native blend"))
    );
    assert!(buf.data().is_empty());
}

#[test]
fn three_operand_chaining_law() {
    // D = S / T must be exactly copy(D, S) ++ div(D, T).
    let chained = emit_bytes(&Inst::VecFpuRRRChained {
        op: FpuPredOp::Div,
        rd: writable_zreg(1),
        rs: zreg(2),
        rt: zreg(3),
    });
    let mut manual = emit_bytes(&Inst::VecMov {
        rd: writable_zreg(1),
        rs: zreg(2),
    });
    manual.extend(emit_bytes(&Inst::VecFpuRR {
        op: FpuPredOp::Div,
        rg: writable_zreg(1),
        rs: zreg(3),
    }));
    assert_eq!(chained, manual);
}

#[test]
fn compare_swap_law() {
    // cgt(d, s, t) is clt(d, t, s) with the comparands swapped.
    let cgt = emit_bytes(&Inst::VecFpuCmp {
        cond: Cond::Gt,
        rd: writable_zreg(1),
        rs: zreg(2),
        rt: zreg(3),
    });
    let clt = emit_bytes(&Inst::VecFpuCmp {
        cond: Cond::Lt,
        rd: writable_zreg(1),
        rs: zreg(3),
        rt: zreg(2),
    });
    assert_eq!(cgt, clt);
}

#[test]
fn shift_count_modulo_law() {
    for op in [ShiftOp::Shl, ShiftOp::ShrU, ShiftOp::ShrS] {
        for k in 0..16u8 {
            let a = emit_bytes(&Inst::VecShiftImm {
                op,
                rd: writable_zreg(1),
                rs: zreg(2),
                imm: k,
            });
            let b = emit_bytes(&Inst::VecShiftImm {
                op,
                rd: writable_zreg(1),
                rs: zreg(2),
                imm: k + 16,
            });
            assert_eq!(a, b, "count {k} vs {} for {op:?}", k + 16);
        }
    }
}

#[test]
fn round_then_convert_law() {
    // cvp(d, s) == rnp(d, s) ++ cvz(d, d)
    let combined = emit_bytes(&Inst::VecFpToInt {
        mode: RoundMode::Plus,
        rd: writable_zreg(4),
        rs: zreg(5),
    });
    let mut manual = emit_bytes(&Inst::VecRound {
        mode: RoundMode::Plus,
        rd: writable_zreg(4),
        rs: zreg(5),
    });
    manual.extend(emit_bytes(&Inst::VecFpToInt {
        mode: RoundMode::Zero,
        rd: writable_zreg(4),
        rs: zreg(4),
    }));
    assert_eq!(combined, manual);
}

#[test]
fn displacement_rejections() {
    let mut buf = CodeBuffer::new();
    // Unaligned: not a multiple of the 16-byte granule.
    let inst = Inst::VecLoad {
        rd: writable_zreg(1),
        mem: AMode::RegOffset(xreg(2), 8),
    };
    assert_eq!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::DispOutOfRange { disp: 8, access: 16 })
    );
    // Aligned but out of the scaled 4-bit range.
    let inst = Inst::VecLoad {
        rd: writable_zreg(1),
        mem: AMode::RegOffset(xreg(2), 128),
    };
    assert_eq!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::DispOutOfRange {
            disp: 128,
            access: 16
        })
    );
    assert!(buf.data().is_empty());
}

#[test]
fn wrong_register_class_is_unsupported() {
    let mut buf = CodeBuffer::new();
    let inst = Inst::VecMov {
        rd: writable_zreg(1),
        rs: xreg(2),
    };
    assert!(matches!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::Unsupported { isa: "aarch64", .. })
    ));
}

#[test]
fn staged_memory_operand() {
    // A register-memory form is the staging load followed by the
    // register-register word against the scratch register.
    let rrm = emit_bytes(&Inst::VecIntRRM {
        op: IntOp::Add,
        rd: writable_zreg(2),
        rs: zreg(3),
        mem: AMode::RegOffset(xreg(4), 0),
    });
    let expected = words(&[
        0x8580_4000 | 30 | 4 << 5,
        0x0460_0000 | 2 | 3 << 5 | 30 << 16,
    ]);
    assert_eq!(rrm, expected);
}
