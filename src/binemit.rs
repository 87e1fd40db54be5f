//! Binary machine-code emission.
//!
//! Backends write finished instruction bytes through the [`ByteSink`] trait;
//! [`CodeBuffer`] is the in-memory sink handed to [`MachInstEmit::emit`] by
//! callers. The buffer adds no framing, length prefixes or checksums — the
//! bytes appear in program order exactly as encoded.

use crate::result::CodegenResult;

/// A sink for accumulating encoded machine code.
pub trait ByteSink {
    /// Add 1 byte to the code section.
    fn put1(&mut self, value: u8);

    /// Add 2 little-endian bytes to the code section.
    fn put2(&mut self, value: u16);

    /// Add 4 little-endian bytes to the code section.
    fn put4(&mut self, value: u32);

    /// Add a 4-byte instruction word in big-endian byte order.
    ///
    /// Fixed-width RISC targets store instruction words in target byte
    /// order; the big-endian POWER profile uses this instead of `put4`.
    fn put4_be(&mut self, value: u32) {
        for b in value.to_be_bytes() {
            self.put1(b);
        }
    }
}

/// A growable in-memory code sink.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct CodeBuffer {
    data: Vec<u8>,
}

impl CodeBuffer {
    /// Create a new, empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes emitted so far, in program order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Current length of the emitted code, in bytes.
    pub fn cur_offset(&self) -> usize {
        self.data.len()
    }

    /// Discard all emitted bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl ByteSink for CodeBuffer {
    fn put1(&mut self, value: u8) {
        self.data.push(value);
    }

    fn put2(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    fn put4(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }
}

/// A machine instruction that knows how to emit itself.
///
/// Implemented once per backend by that backend's `Inst` type. The profile
/// is the backend's read-only constant table (scratch registers, capability
/// flags, displacement rules); it is never mutated, so concurrent encode
/// calls may share one profile reference freely.
pub trait MachInstEmit {
    /// The backend's architecture-profile type.
    type Profile;

    /// Encode this instruction and append the resulting bytes to `sink`.
    ///
    /// On error nothing has been written: all operand classification happens
    /// before the first byte is emitted.
    fn emit(&self, profile: &Self::Profile, sink: &mut CodeBuffer) -> CodegenResult<()>;
}
