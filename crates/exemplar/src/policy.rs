//! Policies for example fields left at their default value.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How the builder treats example fields that hold their type's default.
///
/// # Example
///
/// ```
/// use exemplar::Policy;
///
/// assert_eq!(Policy::default(), Policy::DiscardUnset);
/// assert_eq!("keep-unset".parse::<Policy>().unwrap(), Policy::KeepUnset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// A field left at its default does not constrain matching records.
    #[default]
    DiscardUnset,
    /// Every field must match exactly, including absent optionals.
    KeepUnset,
}

impl Policy {
    /// Returns the canonical name of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::DiscardUnset => "discard-unset",
            Policy::KeepUnset => "keep-unset",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard-unset" | "discard_unset" | "discard" => Ok(Policy::DiscardUnset),
            "keep-unset" | "keep_unset" | "keep" => Ok(Policy::KeepUnset),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}
