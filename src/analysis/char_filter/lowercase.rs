//! Lowercase char filter.

use super::CharFilter;

/// A char filter that lowercases the whole input.
///
/// Uses Unicode case mapping, so `Á` becomes `á` and `Ñ` becomes `ñ`.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_spanish() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÁRBOL Ñandú ÜBER"), "árbol ñandú über");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}
