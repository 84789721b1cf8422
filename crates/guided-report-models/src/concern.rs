//! Free-text workplace concern submitted by a staff member.
//!
//! A [`Concern`] is guaranteed to contain at least one non-whitespace
//! character. The text itself is kept exactly as entered: trimming is only
//! applied to decide emptiness, never to the stored value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A non-blank concern, stored verbatim.
///
/// # Examples
///
/// ```
/// use guided_report_models::Concern;
///
/// let concern = Concern::new("  Lobby AC is broken ").unwrap();
/// assert_eq!(concern.as_str(), "  Lobby AC is broken ");
///
/// assert!(Concern::new(" \n\t").is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Concern(String);

impl Concern {
    /// Validate and wrap the given text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyConcern`] when `text` is empty after
    /// trimming.
    pub fn new(text: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyConcern);
        }
        Ok(Self(text))
    }

    /// Return the raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the raw text in characters.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Concern {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Concern {
    type Error = ModelError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl FromStr for Concern {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Concern> for String {
    fn from(c: Concern) -> Self {
        c.0
    }
}
