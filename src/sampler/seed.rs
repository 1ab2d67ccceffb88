//! Seed bytes and the cursor that consumes them.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValleyError};

/// Range every trait sample is drawn from.
pub const SAMPLE_RANGE: u32 = 255;

/// Default seed length in bytes.
pub const DEFAULT_SEED_LEN: usize = 32;

/// An immutable sequence of seed bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(Vec<u8>);

impl Seed {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ValleyError::Seed {
                message: format!("Invalid hex seed: {}", s),
                help: Some("Seeds are an even number of hex digits, e.g. 0x0a05ff".to_string()),
            });
        }

        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ValleyError::Seed {
                    message: format!("Invalid hex byte in seed: {}", &hex[i..i + 2]),
                    help: None,
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self(bytes))
    }

    /// Canonical `0x`-prefixed lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(2 + self.0.len() * 2);
        out.push_str("0x");
        for byte in &self.0 {
            out.push_str(&format!("{:02x}", byte));
        }
        out
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Start consuming this seed from the first byte.
    pub fn cursor(&self) -> SeedCursor<'_> {
        SeedCursor::new(&self.0)
    }
}

impl FromStr for Seed {
    type Err = ValleyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<&[u8]> for Seed {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// Left-to-right reader over seed bytes.
///
/// Every read or skip advances by exactly one byte; bytes are never re-read.
#[derive(Debug)]
pub struct SeedCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SeedCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Take the next byte for a sample drawn from `range`.
    ///
    /// `range` must equal [`SAMPLE_RANGE`]; anything else would desynchronise
    /// every trait sampled after this one, so it fails instead.
    pub fn take(&mut self, range: u32) -> Result<u8> {
        if range != SAMPLE_RANGE {
            return Err(ValleyError::Seed {
                message: format!("Expected a range of {} but got {}", SAMPLE_RANGE, range),
                help: Some("Every weight table must total exactly 255".to_string()),
            });
        }
        self.advance()
    }

    /// Consume one byte without using it.
    pub fn skip(&mut self) -> Result<()> {
        self.advance().map(|_| ())
    }

    /// Number of bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Number of bytes left.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn advance(&mut self) -> Result<u8> {
        let Some(&byte) = self.bytes.get(self.pos) else {
            return Err(ValleyError::Seed {
                message: format!("Seed exhausted after {} bytes", self.pos),
                help: Some("Provide a longer seed (32 bytes is the default)".to_string()),
            });
        };
        self.pos += 1;
        Ok(byte)
    }
}
