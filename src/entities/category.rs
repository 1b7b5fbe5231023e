// 🏷️ Category Entity - competition categories
// Category labels are what athletes register under. The default set matches
// the eight options offered by the registration form.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

// ============================================================================
// CATEGORY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    /// Sparring division, bounded by a weight limit
    Kumite,

    /// Individual forms division
    Kata,

    /// Team forms division
    TeamKata,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Kumite => "Kumite",
            CategoryKind::Kata => "Kata",
            CategoryKind::TeamKata => "Team Kata",
        }
    }
}

// ============================================================================
// CATEGORY ENTITY
// ============================================================================

/// A competition category. Labels carry no behavioral logic beyond lookup;
/// the weight limit is informational (negative = "up to", positive = "over").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable identity (UUID)
    pub id: String,

    /// Display label, e.g. "Kumite -75kg" or "Kata Individual"
    pub label: String,

    pub kind: CategoryKind,

    /// Signed weight bound in kg for kumite divisions.
    /// -75.0 means "under 75kg", +84.0 means "over 84kg". None for kata.
    pub weight_limit_kg: Option<f64>,
}

impl Category {
    pub fn new(label: &str, kind: CategoryKind, weight_limit_kg: Option<f64>) -> Self {
        Category {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.to_string(),
            kind,
            weight_limit_kg,
        }
    }

    pub fn is_kumite(&self) -> bool {
        self.kind == CategoryKind::Kumite
    }
}

// ============================================================================
// CATEGORY REGISTRY
// ============================================================================

/// In-memory registry of all known categories.
pub struct CategoryRegistry {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl CategoryRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        CategoryRegistry {
            categories: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create registry with the default tournament categories pre-loaded
    pub fn with_defaults() -> Self {
        let registry = CategoryRegistry::new();

        let defaults = [
            ("Kumite -55kg", CategoryKind::Kumite, Some(-55.0)),
            ("Kumite -61kg", CategoryKind::Kumite, Some(-61.0)),
            ("Kumite -68kg", CategoryKind::Kumite, Some(-68.0)),
            ("Kumite -75kg", CategoryKind::Kumite, Some(-75.0)),
            ("Kumite -84kg", CategoryKind::Kumite, Some(-84.0)),
            ("Kumite +84kg", CategoryKind::Kumite, Some(84.0)),
            ("Kata Individual", CategoryKind::Kata, None),
            ("Team Kata", CategoryKind::TeamKata, None),
        ];

        for (label, kind, limit) in defaults {
            registry.register(Category::new(label, kind, limit));
        }

        registry
    }

    /// Register a category
    pub fn register(&self, category: Category) {
        let mut categories = self.categories.write().unwrap();
        categories.push(category);
    }

    /// Find a category by its display label (case-insensitive)
    pub fn find_by_label(&self, label: &str) -> Option<Category> {
        let categories = self.categories.read().unwrap();
        categories
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
            .cloned()
    }

    /// True when the label names a registered category
    pub fn contains_label(&self, label: &str) -> bool {
        self.find_by_label(label).is_some()
    }

    /// All categories, in registration order
    pub fn all(&self) -> Vec<Category> {
        self.categories.read().unwrap().clone()
    }

    /// All display labels, in registration order
    pub fn labels(&self) -> Vec<String> {
        let categories = self.categories.read().unwrap();
        categories.iter().map(|c| c.label.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.categories.read().unwrap().len()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let registry = CategoryRegistry::with_defaults();

        // Eight default options, same order as the registration form
        assert_eq!(registry.count(), 8);
        assert_eq!(
            registry.labels(),
            vec![
                "Kumite -55kg",
                "Kumite -61kg",
                "Kumite -68kg",
                "Kumite -75kg",
                "Kumite -84kg",
                "Kumite +84kg",
                "Kata Individual",
                "Team Kata",
            ]
        );
    }

    #[test]
    fn test_find_by_label() {
        let registry = CategoryRegistry::with_defaults();

        let heavy = registry.find_by_label("Kumite +84kg").unwrap();
        assert_eq!(heavy.kind, CategoryKind::Kumite);
        assert_eq!(heavy.weight_limit_kg, Some(84.0));

        // Case insensitive
        assert!(registry.find_by_label("kata individual").is_some());

        assert!(registry.find_by_label("Kumite -99kg").is_none());
    }

    #[test]
    fn test_contains_label() {
        let registry = CategoryRegistry::with_defaults();

        assert!(registry.contains_label("Team Kata"));
        assert!(!registry.contains_label("Kobudo"));
    }

    #[test]
    fn test_kumite_predicate() {
        let registry = CategoryRegistry::with_defaults();

        let kumite_count = registry.all().iter().filter(|c| c.is_kumite()).count();
        assert_eq!(kumite_count, 6);
    }
}
