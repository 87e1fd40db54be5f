//! Measure instruction encoding throughput; the benchmark is
//! feature-gated on `ppc64`/`x86` since it exercises those backends'
//! encoding mechanisms.

#[cfg(all(feature = "ppc64", feature = "x86"))]
mod backends {
    use criterion::{criterion_group, Criterion};
    use unisimd_codegen::binemit::{CodeBuffer, MachInstEmit};
    use unisimd_codegen::isa::{ppc64, x64};

    fn encoding_benchmarks(c: &mut Criterion) {
        let mut group = c.benchmark_group("instruction encoding");

        group.bench_function("ppc64 packed add (single word)", |b| {
            let inst = ppc64::inst::Inst::VecIntRRR {
                op: ppc64::inst::IntOp::Add,
                rd: ppc64::regs::writable_vreg(2),
                rs: ppc64::regs::vreg(3),
                rt: ppc64::regs::vreg(5),
            };
            let mut sink = CodeBuffer::new();
            b.iter(|| {
                sink.clear();
                inst.emit(&ppc64::PROFILE, &mut sink).unwrap();
            });
        });

        group.bench_function("x64 variable shift (lane loop)", |b| {
            let inst = x64::inst::Inst::VecShiftVarRRR {
                op: x64::inst::ShiftOp::Shl,
                rd: x64::regs::writable_xmm(1),
                rs: x64::regs::xmm(2),
                rt: x64::regs::xmm(3),
            };
            let mut sink = CodeBuffer::new();
            b.iter(|| {
                sink.clear();
                inst.emit(&x64::PROFILE, &mut sink).unwrap();
            });
        });

        group.finish();
    }

    criterion_group!(benches, encoding_benchmarks);
}

#[cfg(all(feature = "ppc64", feature = "x86"))]
criterion::criterion_main!(backends::benches);

#[cfg(not(all(feature = "ppc64", feature = "x86")))]
fn main() {}
