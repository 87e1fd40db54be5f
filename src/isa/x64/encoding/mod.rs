//! Byte-level encoding primitives for the x86 backend.

pub mod rex;
