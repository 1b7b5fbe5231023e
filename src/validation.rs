// 📐 Registration Form Validation
// Validates athlete registration submissions before they reach the registry.
// Collects every problem instead of failing on the first, so the form can
// surface a complete notice.

use crate::entities::{Athlete, Belt, CategoryRegistry, Gender, COUNTRY_OPTIONS};
use serde::{Deserialize, Serialize};

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// ATHLETE FORM
// ============================================================================

/// Raw registration form input. Belt and gender arrive as strings straight
/// from the form controls; numbers default to zero when the input could not
/// be parsed, which validation then rejects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthleteForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub belt: String,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub dojo: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl AthleteForm {
    /// Validate the submission against the form rules and the category
    /// registry. Returns every violation found.
    pub fn validate(&self, categories: &CategoryRegistry) -> ValidationResult {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Required field is empty"));
        }

        if self.gender.trim().is_empty() {
            errors.push(ValidationError::new("gender", "Required field is empty"));
        } else if Gender::parse(&self.gender).is_none() {
            errors.push(ValidationError::new("gender", "Unknown gender"));
        }

        if self.belt.trim().is_empty() {
            errors.push(ValidationError::new("belt", "Required field is empty"));
        } else if Belt::parse(&self.belt).is_none() {
            errors.push(ValidationError::new("belt", "Unknown belt rank"));
        }

        if self.dojo.trim().is_empty() {
            errors.push(ValidationError::new("dojo", "Required field is empty"));
        }

        if self.country.trim().is_empty() {
            errors.push(ValidationError::new("country", "Required field is empty"));
        } else if !COUNTRY_OPTIONS
            .iter()
            .any(|c| c.eq_ignore_ascii_case(self.country.trim()))
        {
            errors.push(ValidationError::new("country", "Unknown country"));
        }

        if self.age <= 0 || u32::try_from(self.age).is_err() {
            errors.push(ValidationError::new("age", "Please enter a valid age"));
        }

        if self.weight_kg <= 0.0 {
            errors.push(ValidationError::new(
                "weight_kg",
                "Please enter a valid weight",
            ));
        }

        if self.categories.is_empty() {
            errors.push(ValidationError::new(
                "categories",
                "Please select at least one category",
            ));
        } else {
            for label in &self.categories {
                if !categories.contains_label(label) {
                    errors.push(ValidationError::new(
                        "categories",
                        &format!("Unknown category: {}", label),
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Convert a validated form into an athlete record. Call after
    /// `validate` succeeded; the parses here mirror the checks above.
    pub fn into_athlete(self) -> Option<Athlete> {
        let gender = Gender::parse(&self.gender)?;
        let belt = Belt::parse(&self.belt)?;
        let age = u32::try_from(self.age).ok()?;

        if age == 0 || self.weight_kg <= 0.0 {
            return None;
        }

        Some(Athlete::new(
            self.name.trim(),
            age,
            gender,
            belt,
            self.weight_kg,
            self.dojo.trim(),
            self.country.trim(),
            self.categories,
        ))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AthleteForm {
        AthleteForm {
            name: "Kenji Sato".to_string(),
            age: 27,
            gender: "Male".to_string(),
            belt: "Black".to_string(),
            weight_kg: 74.5,
            dojo: "Budokan".to_string(),
            country: "Japan".to_string(),
            categories: vec!["Kumite -75kg".to_string()],
        }
    }

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_form_passes() {
        let categories = CategoryRegistry::with_defaults();
        assert!(valid_form().validate(&categories).is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let categories = CategoryRegistry::with_defaults();
        let form = AthleteForm::default();

        let errors = form.validate(&categories).unwrap_err();
        let fields = fields(&errors);

        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"gender"));
        assert!(fields.contains(&"belt"));
        assert!(fields.contains(&"dojo"));
        assert!(fields.contains(&"country"));
        assert!(fields.contains(&"age"));
        assert!(fields.contains(&"weight_kg"));
        assert!(fields.contains(&"categories"));
    }

    #[test]
    fn test_non_positive_age_and_weight() {
        let categories = CategoryRegistry::with_defaults();

        let mut form = valid_form();
        form.age = 0;
        form.weight_kg = -5.0;

        let errors = form.validate(&categories).unwrap_err();
        let fields = fields(&errors);
        assert_eq!(fields, vec!["age", "weight_kg"]);
    }

    #[test]
    fn test_empty_category_selection() {
        let categories = CategoryRegistry::with_defaults();

        let mut form = valid_form();
        form.categories.clear();

        let errors = form.validate(&categories).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "categories");
        assert_eq!(errors[0].message, "Please select at least one category");
    }

    #[test]
    fn test_unknown_category_rejected() {
        let categories = CategoryRegistry::with_defaults();

        let mut form = valid_form();
        form.categories = vec!["Kobudo Open".to_string()];

        let errors = form.validate(&categories).unwrap_err();
        assert!(errors[0].message.contains("Kobudo Open"));
    }

    #[test]
    fn test_unknown_country_rejected() {
        let categories = CategoryRegistry::with_defaults();

        let mut form = valid_form();
        form.country = "Atlantis".to_string();

        let errors = form.validate(&categories).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "country");
        assert_eq!(errors[0].message, "Unknown country");

        // Dropdown entries match case-insensitively
        form.country = "japan".to_string();
        assert!(form.validate(&categories).is_ok());
    }

    #[test]
    fn test_age_beyond_u32_rejected() {
        let categories = CategoryRegistry::with_defaults();

        let mut form = valid_form();
        form.age = u32::MAX as i64 + 2;

        // Validation flags the field instead of letting the value wrap
        let errors = form.validate(&categories).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "age");

        assert!(form.into_athlete().is_none());
    }

    #[test]
    fn test_unknown_belt_and_gender() {
        let categories = CategoryRegistry::with_defaults();

        let mut form = valid_form();
        form.belt = "Crimson".to_string();
        form.gender = "Unknown".to_string();

        let errors = form.validate(&categories).unwrap_err();
        let fields = fields(&errors);
        assert!(fields.contains(&"belt"));
        assert!(fields.contains(&"gender"));
    }

    #[test]
    fn test_into_athlete() {
        let athlete = valid_form().into_athlete().unwrap();

        assert_eq!(athlete.name, "Kenji Sato");
        assert_eq!(athlete.belt, Belt::Black);
        assert_eq!(athlete.gender, Gender::Male);
        assert_eq!(athlete.categories, vec!["Kumite -75kg"]);
        assert!(!athlete.id.is_empty());
    }

    #[test]
    fn test_into_athlete_rejects_invalid() {
        let mut form = valid_form();
        form.belt = "Crimson".to_string();
        assert!(form.into_athlete().is_none());
    }
}
