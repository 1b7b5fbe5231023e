// 🥋 Athlete Entity - tournament registration records
// Plain records in an in-memory registry: created by the registration form,
// removed by the delete action, no update path. Nothing here survives a
// restart.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Countries offered by the registration form dropdown
pub const COUNTRY_OPTIONS: &[&str] = &[
    "USA",
    "Canada",
    "UK",
    "Spain",
    "Japan",
    "South Korea",
    "France",
    "Germany",
    "Italy",
    "Brazil",
    "Australia",
    "China",
    "Russia",
];

// ============================================================================
// BELT RANK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Belt {
    White,
    Yellow,
    Orange,
    Green,
    Blue,
    Purple,
    Brown,
    Black,
}

impl Belt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Belt::White => "White",
            Belt::Yellow => "Yellow",
            Belt::Orange => "Orange",
            Belt::Green => "Green",
            Belt::Blue => "Blue",
            Belt::Purple => "Purple",
            Belt::Brown => "Brown",
            Belt::Black => "Black",
        }
    }

    /// All ranks in grading order, as offered by the form
    pub fn all() -> &'static [Belt] {
        &[
            Belt::White,
            Belt::Yellow,
            Belt::Orange,
            Belt::Green,
            Belt::Blue,
            Belt::Purple,
            Belt::Brown,
            Belt::Black,
        ]
    }

    /// Parse a belt name (case-insensitive)
    pub fn parse(s: &str) -> Option<Belt> {
        Belt::all()
            .iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .copied()
    }
}

impl std::fmt::Display for Belt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ATHLETE ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    /// Stable identity (UUID)
    pub id: String,

    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub belt: Belt,
    pub weight_kg: f64,

    /// Affiliated training school
    pub dojo: String,
    pub country: String,

    /// Labels of the categories the athlete is entered in
    pub categories: Vec<String>,

    pub registered_at: DateTime<Utc>,
}

impl Athlete {
    pub fn new(
        name: &str,
        age: u32,
        gender: Gender,
        belt: Belt,
        weight_kg: f64,
        dojo: &str,
        country: &str,
        categories: Vec<String>,
    ) -> Self {
        Athlete {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            age,
            gender,
            belt,
            weight_kg,
            dojo: dojo.to_string(),
            country: country.to_string(),
            categories,
            registered_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match against name, dojo, or country
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q)
            || self.dojo.to_lowercase().contains(&q)
            || self.country.to_lowercase().contains(&q)
    }
}

// ============================================================================
// REGISTRY SUMMARY
// ============================================================================

/// Dashboard card data derived from the registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    /// Distinct kumite weight classes, in first-registration order
    pub kumite_classes: Vec<String>,
}

// ============================================================================
// ATHLETE REGISTRY
// ============================================================================

/// In-memory registry of registered athletes.
pub struct AthleteRegistry {
    athletes: Arc<RwLock<Vec<Athlete>>>,
}

impl AthleteRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        AthleteRegistry {
            athletes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create registry with the demo roster pre-loaded
    pub fn with_defaults() -> Self {
        let registry = AthleteRegistry::new();

        registry.add(Athlete::new(
            "John Doe",
            25,
            Gender::Male,
            Belt::Black,
            75.0,
            "Dragon Dojo",
            "USA",
            vec!["Kumite -75kg".to_string(), "Kata Individual".to_string()],
        ));
        registry.add(Athlete::new(
            "Jane Smith",
            23,
            Gender::Female,
            Belt::Black,
            61.0,
            "Tiger Academy",
            "Canada",
            vec!["Kumite -61kg".to_string(), "Kata Individual".to_string()],
        ));
        registry.add(Athlete::new(
            "Alex Johnson",
            21,
            Gender::Male,
            Belt::Brown,
            84.0,
            "Mountain Karate",
            "UK",
            vec!["Kumite -84kg".to_string()],
        ));
        registry.add(Athlete::new(
            "Maria Garcia",
            19,
            Gender::Female,
            Belt::Black,
            55.0,
            "Phoenix Martial Arts",
            "Spain",
            vec!["Kumite -55kg".to_string(), "Kata Individual".to_string()],
        ));
        registry.add(Athlete::new(
            "David Lee",
            24,
            Gender::Male,
            Belt::Black,
            70.0,
            "Harmony Dojo",
            "South Korea",
            vec![
                "Kumite -70kg".to_string(),
                "Kata Individual".to_string(),
                "Team Kata".to_string(),
            ],
        ));

        registry
    }

    /// Append exactly one record
    pub fn add(&self, athlete: Athlete) {
        let mut athletes = self.athletes.write().unwrap();
        athletes.push(athlete);
    }

    /// Remove exactly the record with this id. Returns true when a record
    /// was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut athletes = self.athletes.write().unwrap();
        let before = athletes.len();
        athletes.retain(|a| a.id != id);
        athletes.len() < before
    }

    /// Find an athlete by id
    pub fn find_by_id(&self, id: &str) -> Option<Athlete> {
        let athletes = self.athletes.read().unwrap();
        athletes.iter().find(|a| a.id == id).cloned()
    }

    /// All athletes, in registration order
    pub fn all(&self) -> Vec<Athlete> {
        self.athletes.read().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.athletes.read().unwrap().len()
    }

    /// Filter athletes by free-text query and optional belt rank.
    ///
    /// Pure, synchronous, order-preserving O(n) scan: an athlete matches
    /// when the query case-insensitively appears in name, dojo, or country
    /// AND the belt equals the filter when one is selected. An empty query
    /// matches everything.
    pub fn search(&self, query: &str, belt_filter: Option<Belt>) -> Vec<Athlete> {
        let athletes = self.athletes.read().unwrap();
        athletes
            .iter()
            .filter(|a| {
                let matches_search = query.is_empty() || a.matches_query(query);
                let matches_belt = belt_filter.map_or(true, |b| a.belt == b);
                matches_search && matches_belt
            })
            .cloned()
            .collect()
    }

    /// Dashboard summary: totals by gender plus the distinct kumite weight
    /// classes in first-registration order.
    pub fn summary(&self) -> RegistrySummary {
        let athletes = self.athletes.read().unwrap();

        let male = athletes.iter().filter(|a| a.gender == Gender::Male).count();
        let female = athletes
            .iter()
            .filter(|a| a.gender == Gender::Female)
            .count();

        let mut kumite_classes: Vec<String> = Vec::new();
        for athlete in athletes.iter() {
            for category in &athlete.categories {
                if category.contains("Kumite") && !kumite_classes.contains(category) {
                    kumite_classes.push(category.clone());
                }
            }
        }

        RegistrySummary {
            total: athletes.len(),
            male,
            female,
            kumite_classes,
        }
    }

    /// Serialize the registry to CSV (the Export action on the Athletes
    /// page). Categories are joined with "; " in a single column.
    pub fn export_csv(&self) -> Result<String> {
        let athletes = self.athletes.read().unwrap();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "name",
            "age",
            "gender",
            "belt",
            "weight_kg",
            "dojo",
            "country",
            "categories",
        ])?;

        for athlete in athletes.iter() {
            writer.write_record([
                athlete.id.as_str(),
                athlete.name.as_str(),
                &athlete.age.to_string(),
                athlete.gender.as_str(),
                athlete.belt.as_str(),
                &format!("{:.1}", athlete.weight_kg),
                athlete.dojo.as_str(),
                athlete.country.as_str(),
                &athlete.categories.join("; "),
            ])?;
        }

        let bytes = writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl Default for AthleteRegistry {
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

    fn athlete(name: &str, belt: Belt, dojo: &str, country: &str) -> Athlete {
        Athlete::new(
            name,
            22,
            Gender::Male,
            belt,
            70.0,
            dojo,
            country,
            vec!["Kumite -75kg".to_string()],
        )
    }

    #[test]
    fn test_default_roster() {
        let registry = AthleteRegistry::with_defaults();

        assert_eq!(registry.count(), 5);

        let names: Vec<String> = registry.all().iter().map(|a| a.name.clone()).collect();
        assert!(names.contains(&"John Doe".to_string()));
        assert!(names.contains(&"Maria Garcia".to_string()));
    }

    #[test]
    fn test_add_appends_one_record() {
        let registry = AthleteRegistry::new();

        registry.add(athlete("Kenji Sato", Belt::Black, "Budokan", "Japan"));
        assert_eq!(registry.count(), 1);

        registry.add(athlete("Liu Wei", Belt::Brown, "Lotus Dojo", "China"));
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_remove_exact_record() {
        let registry = AthleteRegistry::with_defaults();
        let all = registry.all();
        let target = all[2].clone();

        assert!(registry.remove(&target.id));
        assert_eq!(registry.count(), 4);
        assert!(registry.find_by_id(&target.id).is_none());

        // Everyone else untouched
        for other in all.iter().filter(|a| a.id != target.id) {
            assert!(registry.find_by_id(&other.id).is_some());
        }

        // Unknown id removes nothing
        assert!(!registry.remove("no-such-id"));
        assert_eq!(registry.count(), 4);
    }

    #[test]
    fn test_search_matches_name_dojo_country() {
        let registry = AthleteRegistry::with_defaults();

        // By name, case-insensitive
        let by_name = registry.search("jane", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Jane Smith");

        // By dojo
        let by_dojo = registry.search("tiger", None);
        assert_eq!(by_dojo.len(), 1);
        assert_eq!(by_dojo[0].dojo, "Tiger Academy");

        // By country
        let by_country = registry.search("spain", None);
        assert_eq!(by_country.len(), 1);
        assert_eq!(by_country[0].country, "Spain");

        // No match
        assert!(registry.search("zzz", None).is_empty());
    }

    #[test]
    fn test_search_belt_filter() {
        let registry = AthleteRegistry::with_defaults();

        let browns = registry.search("", Some(Belt::Brown));
        assert_eq!(browns.len(), 1);
        assert_eq!(browns[0].name, "Alex Johnson");

        // Combined query + belt
        let black_does = registry.search("doe", Some(Belt::Black));
        assert_eq!(black_does.len(), 1);

        let brown_does = registry.search("doe", Some(Belt::Brown));
        assert!(brown_does.is_empty());
    }

    #[test]
    fn test_search_preserves_order() {
        let registry = AthleteRegistry::with_defaults();

        // Empty query + no filter returns the full roster in order
        let all = registry.search("", None);
        let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "John Doe",
                "Jane Smith",
                "Alex Johnson",
                "Maria Garcia",
                "David Lee"
            ]
        );
    }

    #[test]
    fn test_summary() {
        let registry = AthleteRegistry::with_defaults();
        let summary = registry.summary();

        assert_eq!(summary.total, 5);
        assert_eq!(summary.male, 3);
        assert_eq!(summary.female, 2);

        // Distinct kumite classes in first-registration order
        assert_eq!(
            summary.kumite_classes,
            vec![
                "Kumite -75kg",
                "Kumite -61kg",
                "Kumite -84kg",
                "Kumite -55kg",
                "Kumite -70kg"
            ]
        );
    }

    #[test]
    fn test_export_csv() {
        let registry = AthleteRegistry::new();
        registry.add(athlete("Kenji Sato", Belt::Black, "Budokan", "Japan"));

        let csv = registry.export_csv().unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "id,name,age,gender,belt,weight_kg,dojo,country,categories"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Kenji Sato"));
        assert!(row.contains("Black"));
        assert!(row.contains("Budokan"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_belt_parse() {
        assert_eq!(Belt::parse("Black"), Some(Belt::Black));
        assert_eq!(Belt::parse("black"), Some(Belt::Black));
        assert_eq!(Belt::parse("crimson"), None);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("MALE"), Some(Gender::Male));
        assert_eq!(Gender::parse("other"), None);
    }
}
