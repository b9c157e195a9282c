//! Composite identity codec
//!
//! Resources whose natural key is a pair of remote object IDs are persisted
//! under a single `"<parent>:<child>"` string. Both components are
//! non-negative integers, so no escaping is needed.

use crate::error::{ProviderError, Result};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = ':';

/// Encode a parent/child pair as `"<parent>:<child>"`
pub fn encode(parent: u64, child: u64) -> String {
    format!("{}{}{}", parent, SEPARATOR, child)
}

/// Decode a `"<parent>:<child>"` string
///
/// Fails with [`ProviderError::MalformedIdentity`] unless there are exactly
/// two segments, and with [`ProviderError::InvalidComponent`] unless each
/// segment is a plain run of ASCII digits that fits in a `u64`.
pub fn decode(value: &str) -> Result<(u64, u64)> {
    let segments: Vec<&str> = value.split(SEPARATOR).collect();
    if segments.len() != 2 {
        return Err(ProviderError::MalformedIdentity {
            value: value.to_string(),
        });
    }

    let parent = parse_component(value, segments[0])?;
    let child = parse_component(value, segments[1])?;
    Ok((parent, child))
}

fn parse_component(value: &str, segment: &str) -> Result<u64> {
    let invalid = || ProviderError::InvalidComponent {
        value: value.to_string(),
        segment: segment.to_string(),
    };

    // `u64::from_str` accepts a leading '+', which is not a valid component
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    segment.parse::<u64>().map_err(|_| invalid())
}

/// Two-part identity of a child object inside a parent object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeId {
    pub parent: u64,
    pub child: u64,
}

impl CompositeId {
    pub fn new(parent: u64, child: u64) -> Self {
        Self { parent, child }
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.parent, self.child))
    }
}

impl FromStr for CompositeId {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        let (parent, child) = decode(s)?;
        Ok(Self { parent, child })
    }
}
