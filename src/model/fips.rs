use std::fmt;

use serde::Serialize;

pub const FIPS_WIDTH: usize = 5;

/// Five-digit, zero-padded county code. Only constructible through
/// [`Fips::normalize`], so every value satisfies the width/digit invariant.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Serialize, Debug, Hash)]
#[serde(transparent)]
pub struct Fips(String);

impl Fips {
    /// Trim and left-pad a raw identifier with `0` to five characters.
    ///
    /// Accepts `1001`, `"01001"`, `" 1001 "` and float-rendered ids such as
    /// `1001.0`. Returns `None` for anything that is not a 1-5 digit code
    /// (footnote rows, state totals with letters, overlong ids).
    pub fn normalize(raw: &str) -> Option<Fips> {
        let s = raw.trim().trim_matches('"').trim();
        let s = s.strip_suffix(".0").unwrap_or(s);
        if s.is_empty() || s.len() > FIPS_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Fips(format!("{:0>width$}", s, width = FIPS_WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-pad a state code to two digits. Non-numeric codes are returned trimmed.
pub fn normalize_state(raw: &str) -> String {
    let s = raw.trim();
    if !s.is_empty() && s.len() < 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        format!("{:0>2}", s)
    } else {
        s.to_string()
    }
}
