//! Feature-file extensions and their fixed feature counts.

use std::fmt;
use std::str::FromStr;

use crate::error::IoError;

/// Shape-descriptor family, identified by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// `.E34`: 16 features.
    E34,
    /// `.F0`: 128 features.
    F0,
    /// `.GFD`: 100 features.
    Gfd,
    /// `.SA`: 90 features.
    Sa,
}

impl FeatureKind {
    /// All known kinds, in table order.
    pub const ALL: [FeatureKind; 4] = [Self::E34, Self::F0, Self::Gfd, Self::Sa];

    /// Looks up a kind by extension, with or without the leading dot.
    ///
    /// Matching is case-sensitive, as on the files themselves.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownExtension`] for anything outside the table.
    pub fn from_extension(extension: &str) -> Result<Self, IoError> {
        let bare = extension.strip_prefix('.').unwrap_or(extension);
        Self::ALL
            .into_iter()
            .find(|k| k.extension() == bare)
            .ok_or_else(|| IoError::UnknownExtension {
                extension: extension.to_string(),
            })
    }

    /// Extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::E34 => "E34",
            Self::F0 => "F0",
            Self::Gfd => "GFD",
            Self::Sa => "SA",
        }
    }

    /// Number of feature values each file of this kind holds.
    pub fn feature_count(self) -> usize {
        match self {
            Self::E34 => 16,
            Self::F0 => 128,
            Self::Gfd => 100,
            Self::Sa => 90,
        }
    }
}

impl FromStr for FeatureKind {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
