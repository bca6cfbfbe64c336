use std::fmt;

/// Sentinel facet value meaning "no constraint".
pub const ALL: &str = "All";

/// Current choice for one facet control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FacetChoice {
    #[default]
    All,
    Only(String),
}

impl FacetChoice {
    /// `"All"` maps to [`FacetChoice::All`]; anything else is taken verbatim.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            FacetChoice::All
        } else {
            FacetChoice::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FacetChoice::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FacetChoice::All => ALL,
            FacetChoice::Only(value) => value,
        }
    }

    /// Exact, case-sensitive comparison.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            FacetChoice::All => true,
            FacetChoice::Only(wanted) => wanted == value,
        }
    }
}

impl From<&str> for FacetChoice {
    fn from(value: &str) -> Self {
        FacetChoice::parse(value)
    }
}

impl From<String> for FacetChoice {
    fn from(value: String) -> Self {
        if value == ALL {
            FacetChoice::All
        } else {
            FacetChoice::Only(value)
        }
    }
}

impl From<Option<String>> for FacetChoice {
    fn from(value: Option<String>) -> Self {
        value.map(FacetChoice::from).unwrap_or_default()
    }
}

impl fmt::Display for FacetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live filter state. Owned by whoever presents results and passed by
/// reference into [`filter`](crate::filter::filter).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive; empty means no constraint. Never trimmed.
    pub search_term: String,
    pub category: FacetChoice,
    /// Only consulted for records that carry a difficulty.
    pub difficulty: FacetChoice,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<FacetChoice>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<FacetChoice>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.category.is_all() && self.difficulty.is_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_parses_to_all() {
        assert_eq!(FacetChoice::parse("All"), FacetChoice::All);
        assert_eq!(FacetChoice::from("all"), FacetChoice::Only("all".to_string()));
        assert_eq!(FacetChoice::from(None::<String>), FacetChoice::All);
    }

    #[test]
    fn test_admits_is_exact() {
        let choice = FacetChoice::from("Network");
        assert!(choice.admits("Network"));
        assert!(!choice.admits("Networking"));
        assert!(!choice.admits("network"));
        assert!(FacetChoice::All.admits("anything"));
    }

    #[test]
    fn test_default_criteria_is_unconstrained() {
        assert!(FilterCriteria::new().is_unconstrained());
        assert!(!FilterCriteria::new().with_search_term(" ").is_unconstrained());
        assert!(FilterCriteria::new().with_category("All").is_unconstrained());
    }
}
