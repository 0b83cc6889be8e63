//! Name ordering for the sort buttons.
//!
//! Every name is ranked by its *first* run of decimal digits, read as an
//! integer. A name without digits ranks as 0. Nothing else is looked at
//! when two names both carry a number, so `a2b10` sorts before `a10b2`.
//!
//! Names without digits rank ahead of numbered names of value 0 and are
//! compared with each other case-insensitively. The result is a total
//! order, which `slice::sort_by` requires.
//!
//! The direction reverses the result without touching ties, so a stable sort
//! keeps equal names in their selection order either way.
//!
//! # Examples
//!
//! ```
//! use pdfjoin::sort::{SortDirection, SortPolicy};
//!
//! let policy = SortPolicy::new(SortDirection::Ascending);
//! let mut names = vec!["img10.pdf", "img2.pdf", "img1.pdf"];
//! names.sort_by(|a, b| policy.compare(a, b));
//! assert_eq!(names, ["img1.pdf", "img2.pdf", "img10.pdf"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PdfJoinError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = PdfJoinError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(PdfJoinError::invalid_config(format!(
                "Invalid sort direction: {s}. Must be one of: asc, desc"
            ))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("asc"),
            Self::Descending => f.write_str("desc"),
        }
    }
}

/// Comparator over document names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortPolicy {
    direction: SortDirection,
}

impl SortPolicy {
    /// Create a policy sorting in `direction`.
    pub fn new(direction: SortDirection) -> Self {
        Self { direction }
    }

    /// The configured direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Compare two names.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        compare_names(a, b, self.direction)
    }
}

/// Compare two names under the first-digit-run rule.
pub fn compare_names(a: &str, b: &str, direction: SortDirection) -> Ordering {
    let ordering = match (first_digit_run(a), first_digit_run(b)) {
        (Some(x), Some(y)) => compare_digit_runs(x, y),
        (Some(x), None) => compare_digit_runs(x, "0").then(Ordering::Greater),
        (None, Some(y)) => compare_digit_runs("0", y).then(Ordering::Less),
        (None, None) => collate(a, b),
    };
    direction.apply(ordering)
}

/// The first maximal run of ASCII digits in `name`.
pub fn first_digit_run(name: &str) -> Option<&str> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let rest = &name[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Compare two digit strings by integer value, without parsing.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Case-insensitive comparison of two names without digits.
fn collate(a: &str, b: &str) -> Ordering {
    let fold = |name: &str| name.chars().flat_map(char::to_uppercase).collect::<Vec<_>>();
    fold(a).cmp(&fold(b))
}
