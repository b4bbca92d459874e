use std::fmt;

/// Version of the field stream layout.
///
/// Written into the stream preamble by [`crate::put_header_info`] and checked on
/// read: a reader only accepts streams carrying exactly its own version.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "Version values should be used for compatibility checks"]
pub struct Version(u32);

impl Version {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    pub const fn new(v: u32) -> Self {
        Self(v)
    }
}

/// Layout version written by this crate.
pub const WIRE_VERSION: Version = Version::ONE;

impl From<Version> for u32 {
    fn from(value: Version) -> u32 {
        value.0
    }
}

impl From<u32> for Version {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
