use crate::binemit::{CodeBuffer, MachInstEmit};
use crate::isa::x64::inst::*;
use crate::isa::x64::PROFILE;
use crate::result::CodegenError;

fn emit_bytes(inst: &Inst) -> Vec<u8> {
    let mut buf = CodeBuffer::new();
    inst.emit(&PROFILE, &mut buf).expect("encode");
    buf.data().to_vec()
}

#[test]
fn test_x64_binemit() {
    struct TestUnit {
        inst: Inst,
        assembly: &'static str,
        code: Vec<u8>,
    }

    impl TestUnit {
        fn new(inst: Inst, assembly: &'static str, code: Vec<u8>) -> Self {
            Self {
                inst,
                assembly,
                code,
            }
        }
    }

    let mut insns = Vec::<TestUnit>::with_capacity(16);

    // Every operation is a pair: low block, then high block via REX.R/B.
    insns.push(TestUnit::new(
        Inst::VecMov {
            rd: writable_xmm(1),
            rs: xmm(2),
        },
        "movaps xmm1, xmm2 ; movaps xmm9, xmm10",
        vec![0x40, 0x0F, 0x28, 0xCA, 0x45, 0x0F, 0x28, 0xCA],
    ));
    insns.push(TestUnit::new(
        Inst::VecAluRR {
            op: AluOp::Add,
            rg: writable_xmm(1),
            rs: xmm(2),
        },
        "paddw xmm1, xmm2 ; paddw xmm9, xmm10",
        vec![0x66, 0x40, 0x0F, 0xFD, 0xCA, 0x66, 0x45, 0x0F, 0xFD, 0xCA],
    ));
    insns.push(TestUnit::new(
        Inst::VecAluRR {
            op: AluOp::Mul,
            rg: writable_xmm(3),
            rs: xmm(4),
        },
        "pmullw xmm3, xmm4 ; pmullw xmm11, xmm12",
        vec![0x66, 0x40, 0x0F, 0xD5, 0xDC, 0x66, 0x45, 0x0F, 0xD5, 0xDC],
    ));
    insns.push(TestUnit::new(
        Inst::VecLoad {
            rd: writable_xmm(3),
            mem: Amode::RegOffset(gpr(5), 0x10),
        },
        "movaps xmm3, [rbp+0x10] ; movaps xmm11, [rbp+0x20]",
        vec![
            0x40, 0x0F, 0x28, 0x9D, 0x10, 0x00, 0x00, 0x00, //
            0x44, 0x0F, 0x28, 0x9D, 0x20, 0x00, 0x00, 0x00,
        ],
    ));
    insns.push(TestUnit::new(
        Inst::VecStore {
            rs: xmm(2),
            mem: Amode::RegOffset(gpr(4), 0),
        },
        "movaps [rsp], xmm2 ; movaps [rsp+0x10], xmm10",
        vec![
            0x40, 0x0F, 0x29, 0x94, 0x24, 0x00, 0x00, 0x00, 0x00, //
            0x44, 0x0F, 0x29, 0x94, 0x24, 0x10, 0x00, 0x00, 0x00,
        ],
    ));
    insns.push(TestUnit::new(
        Inst::VecShiftImm {
            op: ShiftOp::Shl,
            rg: writable_xmm(2),
            imm: 3,
        },
        "psllw xmm2, 3 ; psllw xmm10, 3",
        vec![
            0x66, 0x40, 0x0F, 0x71, 0xF2, 0x03, //
            0x66, 0x41, 0x0F, 0x71, 0xF2, 0x03,
        ],
    ));
    insns.push(TestUnit::new(
        Inst::VecNot {
            rg: writable_xmm(6),
        },
        "pandn xmm6, [rbp+GPC07] ; pandn xmm14, [rbp+GPC07+0x10]",
        vec![
            0x66, 0x40, 0x0F, 0xDF, 0xB5, 0xF0, 0x01, 0x00, 0x00, //
            0x66, 0x44, 0x0F, 0xDF, 0xB5, 0x00, 0x02, 0x00, 0x00,
        ],
    ));
    // The memory-scalar shift rereads the same count for both halves.
    insns.push(TestUnit::new(
        Inst::VecShiftMem {
            op: ShiftOp::ShrU,
            rg: writable_xmm(1),
            mem: Amode::RegOffset(gpr(3), 0x20),
        },
        "psrlw xmm1, [rbx+0x20] ; psrlw xmm9, [rbx+0x20]",
        vec![
            0x66, 0x40, 0x0F, 0xD1, 0x8B, 0x20, 0x00, 0x00, 0x00, //
            0x66, 0x44, 0x0F, 0xD1, 0x8B, 0x20, 0x00, 0x00, 0x00,
        ],
    ));

    for unit in insns {
        let actual = emit_bytes(&unit.inst);
        assert_eq!(actual, unit.code, "wrong encoding for {}", unit.assembly);
    }
}

#[test]
fn mask_merge_idiom() {
    // No native blend on this profile: AND, ANDN, OR, then the move back.
    let bytes = emit_bytes(&Inst::VecMaskMerge {
        rg: writable_xmm(1),
        rs: xmm(2),
    });
    let expected = vec![
        0x66, 0x40, 0x0F, 0xDB, 0xD0, 0x66, 0x45, 0x0F, 0xDB, 0xD0, // pand s, mask
        0x66, 0x40, 0x0F, 0xDF, 0xC1, 0x66, 0x45, 0x0F, 0xDF, 0xC1, // pandn mask, g
        0x66, 0x40, 0x0F, 0xEB, 0xC2, 0x66, 0x45, 0x0F, 0xEB, 0xC2, // por mask, s
        0x40, 0x0F, 0x28, 0xC8, 0x45, 0x0F, 0x28, 0xC8, // movaps g, mask
    ];
    assert_eq!(bytes, expected);
    assert_eq!(emit_bytes(&Inst::VecMaskMerge {
        rg: writable_xmm(1),
        rs: xmm(2),
    }), expected);
}

#[test]
fn three_operand_chaining_law() {
    let chained = emit_bytes(&Inst::VecAluRRR {
        op: AluOp::Sub,
        rd: writable_xmm(1),
        rs: xmm(2),
        rt: xmm(3),
    });
    let mut manual = emit_bytes(&Inst::VecMov {
        rd: writable_xmm(1),
        rs: xmm(2),
    });
    manual.extend(emit_bytes(&Inst::VecAluRR {
        op: AluOp::Sub,
        rg: writable_xmm(1),
        rs: xmm(3),
    }));
    assert_eq!(chained, manual);
}

#[test]
fn shift_count_modulo_law() {
    for op in [ShiftOp::Shl, ShiftOp::ShrU, ShiftOp::ShrS] {
        for k in 0..16u8 {
            let a = emit_bytes(&Inst::VecShiftImm {
                op,
                rg: writable_xmm(1),
                imm: k,
            });
            let b = emit_bytes(&Inst::VecShiftImm {
                op,
                rg: writable_xmm(1),
                imm: k + 16,
            });
            assert_eq!(a, b, "count {k} vs {} for {op:?}", k + 16);
        }
    }
}

#[test]
fn variable_shift_lane_loop() {
    // The only loop-bearing encoder: spill both operands, then one scalar
    // shift per lane, count register preserved around the loop.
    let bytes = emit_bytes(&Inst::VecShiftVarRRR {
        op: ShiftOp::Shl,
        rd: writable_xmm(1),
        rs: xmm(2),
        rt: xmm(3),
    });
    // 4 spill stores (8 bytes each), push, 16 lanes of movzx+shift
    // (8 bytes each), pop, 2 reloads.
    assert_eq!(bytes.len(), 4 * 8 + 1 + 16 * 16 + 1 + 2 * 8);
    assert_eq!(bytes[32], 0x51, "push rcx");
    assert_eq!(bytes[32 + 1 + 256], 0x59, "pop rcx");
    // First lane: movzx ecx, word [rbp+SCR02] ; shl word [rbp+SCR01], cl.
    assert_eq!(
        &bytes[33..49],
        &[
            0x40, 0x0F, 0xB7, 0x8D, 0x20, 0x01, 0x00, 0x00, //
            0x66, 0x40, 0xD3, 0xA5, 0x00, 0x01, 0x00, 0x00,
        ]
    );
    // Last lane addresses lane offset 0x1E.
    assert_eq!(
        &bytes[273..289],
        &[
            0x40, 0x0F, 0xB7, 0x8D, 0x3E, 0x01, 0x00, 0x00, //
            0x66, 0x40, 0xD3, 0xA5, 0x1E, 0x01, 0x00, 0x00,
        ]
    );
}

#[test]
fn unaligned_displacement_is_rejected() {
    let mut buf = CodeBuffer::new();
    let inst = Inst::VecLoad {
        rd: writable_xmm(1),
        mem: Amode::RegOffset(gpr(3), 8),
    };
    assert_eq!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::DispOutOfRange { disp: 8, access: 16 })
    );
    assert!(buf.data().is_empty());
}

#[test]
fn high_logical_register_is_rejected() {
    // Only xmm0..7 are nameable; the high block is the implied pair.
    let mut buf = CodeBuffer::new();
    let inst = Inst::VecMov {
        rd: writable_xmm(1),
        rs: xmm(9),
    };
    assert_eq!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::RegOutOfRange { index: 9, limit: 8 })
    );
}
