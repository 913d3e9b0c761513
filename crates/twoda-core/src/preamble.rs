//! Signature and version check at the start of every 2DA

use crate::error::{Error, Result};
use crate::stream::ByteStream;
use serde::Serialize;
use std::fmt;
use std::io::{Read, Seek};

/// Signature every 2DA starts with
pub const SIGNATURE: [u8; 4] = *b"2DA ";

/// The two physical encodings of a 2DA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Version {
    /// `V2.0`: whitespace separated text lines
    Text,
    /// `V2.b`: header record, offset grid and string pool
    Binary,
}

impl Version {
    /// The 4-byte tag that selects this encoding
    pub const fn tag(self) -> [u8; 4] {
        match self {
            Version::Text => *b"V2.0",
            Version::Binary => *b"V2.b",
        }
    }

    /// Look up the encoding for a version tag
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        [Version::Text, Version::Binary]
            .into_iter()
            .find(|v| v.tag() == tag)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Text => write!(f, "V2.0"),
            Version::Binary => write!(f, "V2.b"),
        }
    }
}

/// Validate the signature and version, then drop the rest of the first line
pub fn read_preamble<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<Version> {
    let signature = stream.read_array::<4>();
    if signature != SIGNATURE {
        return Err(Error::InvalidFormat { found: signature });
    }

    let tag = stream.read_array::<4>();
    let version = Version::from_tag(tag).ok_or(Error::UnsupportedVersion { found: tag })?;

    stream.skip_line();
    Ok(version)
}
