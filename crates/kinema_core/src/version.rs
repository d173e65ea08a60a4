//! Dotted-numeric schema versions.
//!
//! Versions compare segment by segment as integers; the shorter version is
//! padded with zeros, so `"1.1"` equals `"1.1.0"` and `"1.10"` is newer than
//! `"1.9"`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

/// Version assumed when a document does not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// A parsed dotted version such as `1.0` or `1.1.0`.
#[derive(Debug, Clone)]
pub struct SchemaVersion {
    segments: SmallVec<[u32; 4]>,
}

impl SchemaVersion {
    /// Parses `text`. Each segment contributes its leading decimal digits;
    /// segments without any (for example `"beta"`) count as zero.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let segments = text
            .trim()
            .split('.')
            .map(|segment| {
                let digits = segment
                    .find(|c: char| !c.is_ascii_digit())
                    .map_or(segment, |end| &segment[..end]);
                digits.parse().unwrap_or(0)
            })
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            segments: SmallVec::from_slice(&[major, minor, patch]),
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::parse(DEFAULT_VERSION)
    }
}

impl FromStr for SchemaVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                let a = self.segments.get(i).copied().unwrap_or(0);
                let b = other.segments.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SchemaVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SchemaVersion {}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ordering() {
        assert!(SchemaVersion::parse("1.0") < SchemaVersion::parse("1.1.0"));
        assert!(SchemaVersion::parse("1.10") > SchemaVersion::parse("1.9"));
        assert!(SchemaVersion::parse("2") > SchemaVersion::parse("1.99.99"));
    }

    #[test]
    fn zero_padding() {
        assert_eq!(SchemaVersion::parse("1.1"), SchemaVersion::parse("1.1.0"));
        assert_eq!(SchemaVersion::parse("1"), SchemaVersion::new(1, 0, 0));
    }

    #[test]
    fn non_numeric_segments() {
        assert_eq!(SchemaVersion::parse("1.1-beta"), SchemaVersion::new(1, 1, 0));
        assert_eq!(SchemaVersion::parse("x.y"), SchemaVersion::new(0, 0, 0));
    }

    #[test]
    fn default_is_legacy() {
        assert!(SchemaVersion::default() < SchemaVersion::parse("1.1.0"));
        assert_eq!(SchemaVersion::parse("1.0.0").to_string(), "1.0.0");
    }
}
