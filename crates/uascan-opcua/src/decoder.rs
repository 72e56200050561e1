// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Value decoding for report output.
//!
//! A node value arrives as a [`TaggedVariant`]: a closed set of scalar wire
//! types plus two catch-all arms. Decoding is total. Types outside the set
//! render as [`UNSUPPORTED_SENTINEL`] instead of failing.
//!
//! | variant       | rendering                                        |
//! |---------------|--------------------------------------------------|
//! | `Double`      | decimal, integral values keep one fraction digit |
//! | `Float`       | same rule as `Double`                            |
//! | `Int32/Int16` | decimal                                          |
//! | `UInt32`      | decimal, see [`Uint32Rendering`]                 |
//! | `UInt16`      | decimal                                          |
//! | `Boolean`     | `true` / `false`                                 |
//! | `String`      | payload text                                     |
//! | `Enumeration` | raw ordinal                                      |
//! | anything else | `<unsupported type>`                             |
//!
//! # Examples
//!
//! ```
//! use uascan_opcua::decoder::{decode, TaggedVariant};
//!
//! assert_eq!(decode(&TaggedVariant::Double(42.0)), "42.0");
//! assert_eq!(decode(&TaggedVariant::Boolean(true)), "true");
//! assert_eq!(decode(&TaggedVariant::Empty), "<unsupported type>");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text emitted for values outside the recognized set.
pub const UNSUPPORTED_SENTINEL: &str = "<unsupported type>";

// =============================================================================
// TaggedVariant
// =============================================================================

/// A node value as delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedVariant {
    /// 64-bit IEEE float.
    Double(f64),
    /// 32-bit IEEE float.
    Float(f32),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Unsigned 16-bit integer.
    UInt16(u16),
    /// Boolean.
    Boolean(bool),
    /// UTF-8 string payload, exactly as long as the wire length.
    String(Vec<u8>),
    /// Enumeration ordinal.
    Enumeration(u32),
    /// Null value.
    Empty,
    /// Any other wire type, kept only by name.
    Unsupported {
        /// Wire type name, for diagnostics.
        type_name: String,
    },
}

impl TaggedVariant {
    /// Creates a string variant from text.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into().into_bytes())
    }

    /// Creates an unsupported variant.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }

    /// Returns the wire type name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Double(_) => "Double",
            Self::Float(_) => "Float",
            Self::Int32(_) => "Int32",
            Self::Int16(_) => "Int16",
            Self::UInt32(_) => "UInt32",
            Self::UInt16(_) => "UInt16",
            Self::Boolean(_) => "Boolean",
            Self::String(_) => "String",
            Self::Enumeration(_) => "Enumeration",
            Self::Empty => "Empty",
            Self::Unsupported { type_name } => type_name,
        }
    }

    /// Returns `true` if the decoder has a rendering rule for this variant.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Empty | Self::Unsupported { .. })
    }
}

// =============================================================================
// Uint32Rendering
// =============================================================================

/// How `UInt32` values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uint32Rendering {
    /// Plain unsigned decimal.
    #[default]
    Unsigned,

    /// Two's-complement reinterpretation as `i32`, so values above
    /// `i32::MAX` print negative. Matches reports produced by older scanners.
    SignedReinterpret,
}

impl fmt::Display for Uint32Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "unsigned"),
            Self::SignedReinterpret => write!(f, "signed_reinterpret"),
        }
    }
}

// =============================================================================
// ValueDecoder
// =============================================================================

/// Renders [`TaggedVariant`] values as report text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueDecoder {
    uint32: Uint32Rendering,
}

impl ValueDecoder {
    /// Creates a decoder with default renderings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `UInt32` rendering.
    pub fn with_uint32_rendering(mut self, rendering: Uint32Rendering) -> Self {
        self.uint32 = rendering;
        self
    }

    /// Returns the `UInt32` rendering.
    pub fn uint32_rendering(&self) -> Uint32Rendering {
        self.uint32
    }

    /// Decodes a variant. Never fails.
    pub fn decode(&self, variant: &TaggedVariant) -> String {
        match variant {
            TaggedVariant::Double(v) => format_float(*v),
            TaggedVariant::Float(v) => format_float(*v),
            TaggedVariant::Int32(v) => v.to_string(),
            TaggedVariant::Int16(v) => v.to_string(),
            TaggedVariant::UInt32(v) => match self.uint32 {
                Uint32Rendering::Unsigned => v.to_string(),
                Uint32Rendering::SignedReinterpret => (*v as i32).to_string(),
            },
            TaggedVariant::UInt16(v) => v.to_string(),
            TaggedVariant::Boolean(v) => v.to_string(),
            TaggedVariant::String(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            TaggedVariant::Enumeration(v) => v.to_string(),
            TaggedVariant::Empty | TaggedVariant::Unsupported { .. } => {
                UNSUPPORTED_SENTINEL.to_string()
            }
        }
    }
}

/// Decodes a variant with the default decoder.
pub fn decode(variant: &TaggedVariant) -> String {
    ValueDecoder::default().decode(variant)
}

/// `Display` never uses exponents, so an integral finite value only needs
/// the fraction digit appended.
fn format_float<F: fmt::Display + Into<f64> + Copy>(value: F) -> String {
    let text = value.to_string();
    let wide: f64 = value.into();
    if wide.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_rendering() {
        assert_eq!(decode(&TaggedVariant::Double(3.25)), "3.25");
        assert_eq!(decode(&TaggedVariant::Double(42.0)), "42.0");
        assert_eq!(decode(&TaggedVariant::Double(-0.5)), "-0.5");
        assert_eq!(decode(&TaggedVariant::Double(1e21)), "1000000000000000000000.0");
        assert_eq!(decode(&TaggedVariant::Double(f64::NAN)), "NaN");
        assert_eq!(decode(&TaggedVariant::Double(f64::INFINITY)), "inf");
    }

    #[test]
    fn test_float_rendering() {
        assert_eq!(decode(&TaggedVariant::Float(1.5)), "1.5");
        assert_eq!(decode(&TaggedVariant::Float(7.0)), "7.0");
        assert_eq!(decode(&TaggedVariant::Float(0.1)), "0.1");
    }

    #[test]
    fn test_integer_rendering() {
        assert_eq!(decode(&TaggedVariant::Int32(-17)), "-17");
        assert_eq!(decode(&TaggedVariant::Int16(i16::MIN)), "-32768");
        assert_eq!(decode(&TaggedVariant::UInt16(u16::MAX)), "65535");
        assert_eq!(decode(&TaggedVariant::Enumeration(3)), "3");
    }

    #[test]
    fn test_uint32_rendering() {
        let value = TaggedVariant::UInt32(3_000_000_000);
        assert_eq!(decode(&value), "3000000000");

        let legacy = ValueDecoder::new().with_uint32_rendering(Uint32Rendering::SignedReinterpret);
        assert_eq!(legacy.decode(&value), "-1294967296");
        assert_eq!(legacy.decode(&TaggedVariant::UInt32(7)), "7");
    }

    #[test]
    fn test_boolean_and_string() {
        assert_eq!(decode(&TaggedVariant::Boolean(true)), "true");
        assert_eq!(decode(&TaggedVariant::Boolean(false)), "false");
        assert_eq!(decode(&TaggedVariant::string("Running")), "Running");
        assert_eq!(decode(&TaggedVariant::String(Vec::new())), "");
        assert_eq!(decode(&TaggedVariant::String(vec![b'o', b'k', 0xFF])), "ok\u{FFFD}");
    }

    #[test]
    fn test_unsupported_sentinel() {
        assert_eq!(decode(&TaggedVariant::Empty), UNSUPPORTED_SENTINEL);
        assert_eq!(
            decode(&TaggedVariant::unsupported("DateTime")),
            "<unsupported type>"
        );
        assert!(!TaggedVariant::unsupported("Int64").is_supported());
        assert_eq!(TaggedVariant::unsupported("Int64").type_name(), "Int64");
    }

    #[test]
    fn test_uint32_rendering_serde() {
        let rendering: Uint32Rendering = serde_json::from_str("\"signed_reinterpret\"").unwrap();
        assert_eq!(rendering, Uint32Rendering::SignedReinterpret);
        assert_eq!(rendering.to_string(), "signed_reinterpret");
    }
}
