// wordlist_migrate/src/decode.rs
// Character decoding for text read out of the legacy Access file.

use encoding_rs::Encoding;

use crate::error::{MigrateError, Result};

/// Label of the single-byte code page the dictionary was authored in.
pub const DEFAULT_NARROW_ENCODING: &str = "windows-874";

/// Decoding applied to the two text representations an ODBC driver can hand back.
///
/// Narrow (`SQL_CHAR`) values arrive as code page bytes; wide (`SQL_WCHAR`) values
/// arrive as UTF-16 code units. Both must be decoded correctly or Thai text is
/// silently mangled, so invalid input is reported instead of replaced.
#[derive(Debug, Clone, Copy,)]
pub struct TextDecoding {
    narrow: &'static Encoding,
}

impl TextDecoding {
    /// Builds a decoding from a WHATWG encoding label such as `windows-874` or
    /// `tis-620`. The Windows code page name `cp874` is accepted as well.
    pub fn from_label(label: &str,) -> Result<Self,> {
        let normalized = label.trim().to_ascii_lowercase();
        let lookup = match normalized.as_str() {
            "cp874" | "ms874" => DEFAULT_NARROW_ENCODING,
            other => other,
        };
        let narrow = Encoding::for_label(lookup.as_bytes(),).ok_or_else(|| {
            MigrateError::ConfigurationError(format!("Unknown text encoding '{}'", label),)
        },)?;
        Ok(Self { narrow, },)
    }

    pub fn narrow_name(&self,) -> &'static str {
        self.narrow.name()
    }

    pub fn decode_narrow(&self, bytes: &[u8],) -> Result<String,> {
        let (text, had_errors,) = self.narrow.decode_without_bom_handling(bytes,);
        if had_errors {
            return Err(MigrateError::DecodeError(format!(
                "{} bytes are not valid {}",
                bytes.len(),
                self.narrow.name()
            ),),);
        }
        Ok(text.into_owned(),)
    }

    pub fn decode_wide(&self, units: &[u16],) -> Result<String,> {
        String::from_utf16(units,).map_err(|e| {
            MigrateError::DecodeError(format!("Invalid UTF-16LE sequence: {}", e),)
        },)
    }
}

impl Default for TextDecoding {
    fn default() -> Self {
        Self {
            narrow: encoding_rs::WINDOWS_874,
        }
    }
}
