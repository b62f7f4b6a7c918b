//! Output encodings for the written report

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Encoding applied to report text as it is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// UTF-8 without byte order mark
    #[default]
    Utf8,
    /// UTF-8 preceded by a byte order mark
    Utf8Bom,
    /// UTF-16 little endian with byte order mark
    Utf16Le,
    /// 7-bit ASCII; anything else becomes `?`
    Ascii,
}

impl OutputEncoding {
    /// Bytes written once, before any report text
    pub fn preamble(&self) -> &'static [u8] {
        match self {
            OutputEncoding::Utf8Bom => &[0xEF, 0xBB, 0xBF],
            OutputEncoding::Utf16Le => &[0xFF, 0xFE],
            OutputEncoding::Utf8 | OutputEncoding::Ascii => &[],
        }
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            OutputEncoding::Utf8 | OutputEncoding::Utf8Bom => text.as_bytes().to_vec(),
            OutputEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            OutputEncoding::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }

    /// Encode `text` and write it out
    pub fn write_str<W: Write>(&self, writer: &mut W, text: &str) -> io::Result<()> {
        match self {
            OutputEncoding::Utf8 | OutputEncoding::Utf8Bom => writer.write_all(text.as_bytes()),
            _ => writer.write_all(&self.encode(text)),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(OutputEncoding::Utf8),
            "utf-8-bom" | "utf8-bom" => Ok(OutputEncoding::Utf8Bom),
            "utf-16le" | "utf16le" | "utf-16-le" => Ok(OutputEncoding::Utf16Le),
            "ascii" | "us-ascii" => Ok(OutputEncoding::Ascii),
            other => Err(format!("unsupported output encoding: {}", other)),
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputEncoding::Utf8 => "utf-8",
            OutputEncoding::Utf8Bom => "utf-8-bom",
            OutputEncoding::Utf16Le => "utf-16le",
            OutputEncoding::Ascii => "ascii",
        };
        f.write_str(name)
    }
}
