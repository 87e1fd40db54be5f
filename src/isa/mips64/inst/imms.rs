//! MIPS64 definitions: immediate constants.

use crate::result::{CodegenError, CodegenResult};
use core::fmt::{Display, Formatter, Result};

/// A signed 16-bit immediate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Imm16 {
    bits: u16,
}

impl Imm16 {
    /// Create a signed 16-bit immediate, if the value fits.
    pub fn maybe_from_i64(val: i64) -> Option<Imm16> {
        if (-32768..=32767).contains(&val) {
            Some(Imm16 {
                bits: val as u16,
            })
        } else {
            None
        }
    }

    /// Bits for encoding.
    pub fn bits(&self) -> u32 {
        self.bits.into()
    }
}

impl Display for Imm16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.bits as i16)
    }
}

/// An unsigned 16-bit immediate, as consumed by the zero-extending logic
/// immediates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UImm16 {
    bits: u16,
}

impl UImm16 {
    /// Create an unsigned 16-bit immediate, if the value fits.
    pub fn maybe_from_i64(val: i64) -> Option<UImm16> {
        if (0..=0xffff).contains(&val) {
            Some(UImm16 { bits: val as u16 })
        } else {
            None
        }
    }

    /// Bits for encoding.
    pub fn bits(&self) -> u32 {
        self.bits.into()
    }
}

impl Display for UImm16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.bits)
    }
}

/// Materialization strategy for an immediate operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImmShape {
    /// Fits the instruction's inline 16-bit field.
    Inline,
    /// Split across a LUI/ORI pair into a staging register.
    LoadHighLow,
}

/// Classify an arithmetic (sign-extending) immediate.
pub fn classify_arith(value: i64) -> CodegenResult<ImmShape> {
    if Imm16::maybe_from_i64(value).is_some() {
        Ok(ImmShape::Inline)
    } else if i32::try_from(value).is_ok() {
        Ok(ImmShape::LoadHighLow)
    } else {
        Err(CodegenError::ImmOutOfRange { value, bits: 32 })
    }
}

/// Classify a logic (zero-extending) immediate.
pub fn classify_logic(value: i64) -> CodegenResult<ImmShape> {
    if UImm16::maybe_from_i64(value).is_some() {
        Ok(ImmShape::Inline)
    } else if i32::try_from(value).is_ok() {
        Ok(ImmShape::LoadHighLow)
    } else {
        Err(CodegenError::ImmOutOfRange { value, bits: 32 })
    }
}

/// Classify an immediate that is always materialized into a register
/// (moves, multiply/divide sources).
pub fn classify_move(value: i64) -> CodegenResult<ImmShape> {
    if Imm16::maybe_from_i64(value).is_some() {
        Ok(ImmShape::Inline)
    } else if i32::try_from(value).is_ok() {
        Ok(ImmShape::LoadHighLow)
    } else {
        Err(CodegenError::ImmOutOfRange { value, bits: 32 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arith_classification() {
        assert_eq!(classify_arith(0).unwrap(), ImmShape::Inline);
        assert_eq!(classify_arith(-32768).unwrap(), ImmShape::Inline);
        assert_eq!(classify_arith(32768).unwrap(), ImmShape::LoadHighLow);
        assert_eq!(classify_arith(-0x8000_0000).unwrap(), ImmShape::LoadHighLow);
        assert!(classify_arith(1 << 33).is_err());
    }

    #[test]
    fn logic_classification() {
        assert_eq!(classify_logic(0xffff).unwrap(), ImmShape::Inline);
        assert_eq!(classify_logic(0x1_0000).unwrap(), ImmShape::LoadHighLow);
        assert_eq!(classify_logic(-1).unwrap(), ImmShape::LoadHighLow);
    }
}
