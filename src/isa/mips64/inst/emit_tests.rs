use crate::binemit::{CodeBuffer, MachInstEmit};
use crate::isa::mips64::inst::*;
use crate::isa::mips64::PROFILE;
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
fn test_mips64_binemit() {
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

    let mut insns = Vec::<TestUnit>::with_capacity(24);

    insns.push(TestUnit::new(
        Inst::MovRR {
            rd: writable_gpr(4),
            rs: gpr(5),
        },
        "or $4, $5, $0",
        vec![0x00A0_2025],
    ));
    insns.push(TestUnit::new(
        Inst::AluRR {
            op: AluOPRRR::And,
            rg: writable_gpr(4),
            rs: gpr(5),
            set_flags: false,
        },
        "and $4, $4, $5",
        vec![0x0085_2024],
    ));
    insns.push(TestUnit::new(
        Inst::AluRR {
            op: AluOPRRR::And,
            rg: writable_gpr(4),
            rs: gpr(5),
            set_flags: true,
        },
        "and $4, $4, $5 ; or $13, $4, $0",
        vec![0x0085_2024, 0x0080_6825],
    ));
    insns.push(TestUnit::new(
        Inst::AluRR {
            op: AluOPRRR::Dmulu,
            rg: writable_gpr(4),
            rs: gpr(5),
            set_flags: false,
        },
        "dmulu $4, $4, $5",
        vec![0x0085_209D],
    ));
    insns.push(TestUnit::new(
        Inst::AluRR {
            op: AluOPRRR::Ddiv,
            rg: writable_gpr(6),
            rs: gpr(7),
            set_flags: false,
        },
        "ddiv $6, $6, $7",
        vec![0x00C7_309E],
    ));
    insns.push(TestUnit::new(
        Inst::Load {
            rd: writable_gpr(6),
            mem: AMode::RegOffset(gpr(8), 16),
        },
        "ld $6, 16($8)",
        vec![0xDD06_0010],
    ));
    insns.push(TestUnit::new(
        Inst::Store {
            rs: gpr(6),
            mem: AMode::RegOffset(gpr(8), -8),
        },
        "sd $6, -8($8)",
        vec![0xFD06_FFF8],
    ));
    insns.push(TestUnit::new(
        Inst::MovRI {
            rd: writable_gpr(4),
            imm: 100,
        },
        "daddiu $4, $0, 100",
        vec![0x6404_0064],
    ));
    insns.push(TestUnit::new(
        Inst::MovRI {
            rd: writable_gpr(4),
            imm: 0x12345,
        },
        "lui $4, 1 ; ori $4, $4, 0x2345",
        vec![0x3C04_0001, 0x3484_2345],
    ));
    insns.push(TestUnit::new(
        Inst::AluRI {
            op: AluOPRRR::Daddu,
            rg: writable_gpr(4),
            imm: 100,
            set_flags: false,
        },
        "daddiu $4, $4, 100",
        vec![0x6484_0064],
    ));
    insns.push(TestUnit::new(
        Inst::AluRI {
            op: AluOPRRR::Dsubu,
            rg: writable_gpr(4),
            imm: 100,
            set_flags: false,
        },
        "daddiu $4, $4, -100",
        vec![0x6484_FF9C],
    ));
    insns.push(TestUnit::new(
        Inst::AluRI {
            op: AluOPRRR::And,
            rg: writable_gpr(4),
            imm: 0xFF,
            set_flags: false,
        },
        "andi $4, $4, 0xff",
        vec![0x3084_00FF],
    ));
    // Wide logic immediate: staged through the materialization register.
    insns.push(TestUnit::new(
        Inst::AluRI {
            op: AluOPRRR::And,
            rg: writable_gpr(4),
            imm: 0x12345,
            set_flags: false,
        },
        "lui $25, 1 ; ori $25, $25, 0x2345 ; and $4, $4, $25",
        vec![0x3C19_0001, 0x3739_2345, 0x0099_2024],
    ));
    insns.push(TestUnit::new(
        Inst::NotRR {
            rg: writable_gpr(4),
        },
        "nor $4, $0, $4",
        vec![0x0004_2027],
    ));
    insns.push(TestUnit::new(
        Inst::NegRR {
            rg: writable_gpr(4),
            set_flags: false,
        },
        "dsubu $4, $0, $4",
        vec![0x0004_202F],
    ));
    insns.push(TestUnit::new(
        Inst::ShiftRI {
            op: ShiftOp::Shl,
            rg: writable_gpr(4),
            imm: 3,
            set_flags: false,
        },
        "dsll $4, $4, 3",
        vec![0x0004_20F8],
    ));
    insns.push(TestUnit::new(
        Inst::ShiftRI {
            op: ShiftOp::Shl,
            rg: writable_gpr(4),
            imm: 35,
            set_flags: false,
        },
        "dsll32 $4, $4, 3",
        vec![0x0004_20FC],
    ));
    insns.push(TestUnit::new(
        Inst::ShiftRR {
            op: ShiftOp::ShrS,
            rg: writable_gpr(4),
            rs: gpr(7),
            set_flags: false,
        },
        "dsrav $4, $7, $4",
        vec![0x00E4_2017],
    ));
    insns.push(TestUnit::new(
        Inst::CmpRR {
            rs: gpr(4),
            rt: gpr(5),
        },
        "or $14, $5, $0 ; or $13, $4, $0",
        vec![0x00A0_7025, 0x0080_6825],
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
fn shift_count_modulo_law() {
    for op in [ShiftOp::Shl, ShiftOp::ShrU, ShiftOp::ShrS] {
        for k in 0..64u8 {
            let a = emit_bytes(&Inst::ShiftRI {
                op,
                rg: writable_gpr(4),
                imm: k,
                set_flags: false,
            });
            let b = emit_bytes(&Inst::ShiftRI {
                op,
                rg: writable_gpr(4),
                imm: k + 64,
                set_flags: false,
            });
            assert_eq!(a, b, "count {k} vs {} for {op:?}", k + 64);
        }
    }
}

#[test]
fn staged_displacement() {
    let bytes = emit_bytes(&Inst::Load {
        rd: writable_gpr(6),
        mem: AMode::RegOffset(gpr(8), 0x12340),
    });
    let expected = words(&[
        0x3C0F_0001, // lui $15, 1
        0x35EF_2340, // ori $15, $15, 0x2340
        0x01E8_782D, // daddu $15, $15, $8
        0xDDE6_0000, // ld $6, 0($15)
    ]);
    assert_eq!(bytes, expected);
}

#[test]
fn memory_destination_is_load_modify_store() {
    let bytes = emit_bytes(&Inst::AluSt {
        op: AluOPRRR::Daddu,
        rs: gpr(4),
        mem: AMode::RegOffset(gpr(8), 0),
    });
    let expected = words(&[
        0xDD18_0000, // ld $24, 0($8)
        0x0304_C02D, // daddu $24, $24, $4
        0xFD18_0000, // sd $24, 0($8)
    ]);
    assert_eq!(bytes, expected);
}

#[test]
fn displacement_wider_than_32_bits_is_rejected() {
    let mut buf = CodeBuffer::new();
    let inst = Inst::Load {
        rd: writable_gpr(6),
        mem: AMode::RegOffset(gpr(8), 1 << 40),
    };
    assert_eq!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::DispOutOfRange {
            disp: 1 << 40,
            access: 8
        })
    );
    assert!(buf.data().is_empty());
}

#[test]
fn immediate_wider_than_32_bits_is_rejected() {
    let mut buf = CodeBuffer::new();
    let inst = Inst::MovRI {
        rd: writable_gpr(4),
        imm: 1 << 40,
    };
    assert_eq!(
        inst.emit(&PROFILE, &mut buf),
        Err(CodegenError::ImmOutOfRange {
            value: 1 << 40,
            bits: 32
        })
    );
    assert!(buf.data().is_empty());
}

#[test]
fn flags_variant_appends_one_word() {
    let plain = emit_bytes(&Inst::AluRR {
        op: AluOPRRR::Daddu,
        rg: writable_gpr(4),
        rs: gpr(5),
        set_flags: false,
    });
    let flagged = emit_bytes(&Inst::AluRR {
        op: AluOPRRR::Daddu,
        rg: writable_gpr(4),
        rs: gpr(5),
        set_flags: true,
    });
    assert_eq!(&flagged[..plain.len()], &plain[..]);
    assert_eq!(flagged.len(), plain.len() + 4);
}
