//! Dataset label mapping.
//!
//! Real-world fake-news datasets spell their classes many ways (`TRUE`,
//! `verdadero`, `1`, `fake`, ...). Every raw value is trimmed and upper-cased
//! before lookup, and the whole column must map or training is refused.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerazError};

/// Values mapped to [`Label::Credible`].
pub const CREDIBLE_ALIASES: &[&str] = &["TRUE", "REAL", "VERDADERO", "1", "V", "T", "YES", "SI"];

/// Values mapped to [`Label::Fake`].
pub const FAKE_ALIASES: &[&str] = &["FALSE", "FAKE", "FALSO", "0", "F", "NO"];

/// Binary class of a news item. The numeric value is the training target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Credible = 0,
    Fake = 1,
}

impl Label {
    /// Both labels in target order.
    pub const ALL: [Label; 2] = [Label::Credible, Label::Fake];

    /// Target index (0 for credible, 1 for fake).
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Target as a float, for loss computations.
    pub fn as_f64(self) -> f64 {
        self as usize as f64
    }

    /// Inverse of [`Label::as_index`].
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Label::Credible),
            1 => Some(Label::Fake),
            _ => None,
        }
    }

    /// Lower-case name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Label::Credible => "credible",
            Label::Fake => "fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize_raw(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn lookup(normalized: &str) -> Option<Label> {
    if CREDIBLE_ALIASES.contains(&normalized) {
        Some(Label::Credible)
    } else if FAKE_ALIASES.contains(&normalized) {
        Some(Label::Fake)
    } else {
        None
    }
}

/// Every accepted (normalized) label spelling.
pub fn expected_labels() -> Vec<String> {
    CREDIBLE_ALIASES
        .iter()
        .chain(FAKE_ALIASES)
        .map(|s| s.to_string())
        .collect()
}

/// Map a single raw label.
pub fn map_label(raw: &str) -> Result<Label> {
    let normalized = normalize_raw(raw);
    lookup(&normalized).ok_or_else(|| VerazError::UnmappableLabels {
        values: vec![normalized],
        expected: expected_labels(),
    })
}

/// Map a whole label column.
///
/// On failure the error carries every distinct offending value, sorted, not
/// just the first one encountered.
pub fn map_labels<I, S>(raw: I) -> Result<Vec<Label>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut labels = Vec::new();
    let mut unknown = BTreeSet::new();

    for value in raw {
        let normalized = normalize_raw(value.as_ref());
        match lookup(&normalized) {
            Some(label) => labels.push(label),
            None => {
                unknown.insert(normalized);
            }
        }
    }

    if unknown.is_empty() {
        Ok(labels)
    } else {
        Err(VerazError::UnmappableLabels {
            values: unknown.into_iter().collect(),
            expected: expected_labels(),
        })
    }
}
