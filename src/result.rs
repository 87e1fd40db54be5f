//! Result and error types representing the outcome of an encode call.

use thiserror::Error;

/// An encoding error.
///
/// Every failure is reported by the operand-classification stage, before any
/// byte has been written to the output buffer, so a failed encode never
/// leaves a partially-emitted instruction sequence behind.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodegenError {
    /// The operand shape or mnemonic family is not implemented for the
    /// active architecture profile.
    #[error("unsupported operand shape for {mnemonic} on {isa}")]
    Unsupported {
        /// Name of the backend that rejected the instruction.
        isa: &'static str,
        /// The mnemonic family that was requested.
        mnemonic: &'static str,
    },

    /// A memory displacement lies outside the encodable range for the
    /// requested access width, or violates its alignment requirement.
    ///
    /// This is distinct from [`CodegenError::Unsupported`]: the operand kind
    /// is implemented, but this particular value cannot be represented.
    #[error("displacement {disp} not encodable for {access}-byte access")]
    DispOutOfRange {
        /// The raw displacement value.
        disp: i64,
        /// Access width in bytes.
        access: u8,
    },

    /// An immediate value does not fit the instruction field and has no
    /// materialization sequence on this target.
    #[error("immediate {value} does not fit a {bits}-bit field")]
    ImmOutOfRange {
        /// The raw immediate value.
        value: i64,
        /// Width of the widest materializable field, in bits.
        bits: u8,
    },

    /// A register index lies outside the architecture's addressable
    /// register file, or a register of the wrong class was supplied.
    #[error("register {index} outside the addressable register file (limit {limit})")]
    RegOutOfRange {
        /// The hardware encoding that was supplied.
        index: u8,
        /// Number of addressable registers in the file.
        limit: u8,
    },

    /// The requested idiom needs a capability the profile does not declare,
    /// and no fallback sequence is defined. Encoding fails closed.
    #[error("target profile lacks required capability: {0}")]
    MissingCapability(&'static str),
}

/// A convenient alias for a `Result` that uses `CodegenError` as the error
/// type.
pub type CodegenResult<T> = Result<T, CodegenError>;
