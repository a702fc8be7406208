//! Subscriber numbers
//!
//! A number is exactly ten ASCII digits. The first four select a shard
//! (the prefix), the last six address a slot inside it (the suffix).

use std::fmt;
use std::str::FromStr;

use crate::error::{NcprError, Result};

/// Digits in a full number
pub const NUMBER_LEN: usize = 10;

/// Digits in the prefix
pub const PREFIX_LEN: usize = 4;

/// Number of distinct suffixes (000000..=999999)
pub const SUFFIX_SPACE: u32 = 1_000_000;

/// A validated ten-digit subscriber number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberNumber {
    digits: String,
    prefix: u16,
    suffix: u32,
}

impl SubscriberNumber {
    /// Parse a number, rejecting anything that is not exactly ten digits
    pub fn parse(s: &str) -> Result<Self> {
        if !Self::is_valid(s) {
            return Err(NcprError::InvalidNumber(s.to_string()));
        }

        // Digits only, so both halves fit without overflow
        let prefix = s[..PREFIX_LEN]
            .bytes()
            .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
        let suffix = s[PREFIX_LEN..]
            .bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));

        Ok(Self {
            digits: s.to_string(),
            prefix,
            suffix,
        })
    }

    /// True if `s` is exactly ten ASCII digits
    pub fn is_valid(s: &str) -> bool {
        s.len() == NUMBER_LEN && s.bytes().all(|b| b.is_ascii_digit())
    }

    /// Leading four digits (0..=9999)
    pub fn prefix(&self) -> u16 {
        self.prefix
    }

    /// Trailing six digits (0..=999999)
    pub fn suffix(&self) -> u32 {
        self.suffix
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl FromStr for SubscriberNumber {
    type Err = NcprError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SubscriberNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}
