//! Unified SIMD instruction encoder library.
//!
//! This crate maps a fixed vocabulary of portable pseudo-instructions (move,
//! logic, arithmetic, compare, convert and shift operations over scalar and
//! SIMD register/memory operands) onto the literal machine-code encodings of
//! several target architectures. Each backend under [`isa`] defines its own
//! instruction type and emits exact byte sequences into a caller-supplied
//! [`binemit::CodeBuffer`]; there is no runtime component beyond that pure
//! transformation.
//!
//! Encoding is deterministic: the same instruction, emitted against the same
//! architecture profile, always produces byte-identical output. Multi-word
//! idioms (memory-operand staging, copy-chained three-operand forms,
//! round-then-truncate conversion pairs) are fixed policy, not optimization
//! choices, and are reproduced exactly on every call.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod binemit;
pub mod bitfield;
pub mod isa;
pub mod reg;

mod result;

pub use crate::result::{CodegenError, CodegenResult};
