use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::types::ClimberMap;

/// Normalize a gender key: "female" -> "FEMALE"
pub fn normalize_gender(gender: &str) -> String {
    gender.to_uppercase()
}

/// Normalize a category key: "aDVANCED" -> "Advanced"
pub fn normalize_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// A (gender, category) leaderboard partition, normalized on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Division {
    pub gender: String,
    pub category: String,
}

impl Division {
    pub fn new(gender: &str, category: &str) -> Self {
        Self {
            gender: normalize_gender(gender),
            category: normalize_category(category),
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gender, self.category)
    }
}

/// Collect one Division per distinct (gender, category) pair present among
/// the climbers. Pairs that only differ by case collapse into one entry.
pub fn derive_divisions(climbers: &ClimberMap) -> Vec<Division> {
    climbers
        .values()
        .map(|c| Division::new(&c.gender, &c.category))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct genders across divisions, in division order
pub fn unique_genders(divisions: &[Division]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    divisions
        .iter()
        .filter(|d| seen.insert(d.gender.clone()))
        .map(|d| d.gender.clone())
        .collect()
}

/// Distinct categories across divisions, in division order
pub fn unique_categories(divisions: &[Division]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    divisions
        .iter()
        .filter(|d| seen.insert(d.category.clone()))
        .map(|d| d.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::Climber;

    fn climbers(pairs: &[(&str, &str, &str)]) -> ClimberMap {
        pairs
            .iter()
            .map(|(name, gender, category)| {
                let climber = Climber::new(*name, "Test", *gender, *category);
                (climber.full_name(), climber)
            })
            .collect()
    }

    #[test]
    fn test_division_display() {
        assert_eq!(Division::new("female", "advanced").to_string(), "FEMALE Advanced");
    }

    #[test]
    fn test_division_normalizes_mixed_case() {
        let division = Division::new("mAlE", "iNTERMEDIATE");
        assert_eq!(division.gender, "MALE");
        assert_eq!(division.category, "Intermediate");
    }

    #[test]
    fn test_normalize_category_empty() {
        assert_eq!(normalize_category(""), "");
    }

    #[test]
    fn test_normalize_category_single_char() {
        assert_eq!(normalize_category("a"), "A");
    }

    #[test]
    fn test_derive_divisions_distinct() {
        let map = climbers(&[
            ("Alice", "FEMALE", "Advanced"),
            ("Emma", "FEMALE", "Advanced"),
            ("Bob", "MALE", "Advanced"),
        ]);
        let divisions = derive_divisions(&map);
        assert_eq!(divisions.len(), 2);
        assert!(divisions.contains(&Division::new("FEMALE", "Advanced")));
        assert!(divisions.contains(&Division::new("MALE", "Advanced")));
    }

    #[test]
    fn test_derive_divisions_collapses_case_variants() {
        let map = climbers(&[
            ("Alice", "female", "advanced"),
            ("Emma", "FEMALE", "Advanced"),
        ]);
        let divisions = derive_divisions(&map);
        assert_eq!(divisions, vec![Division::new("FEMALE", "Advanced")]);
    }

    #[test]
    fn test_derive_divisions_empty() {
        assert!(derive_divisions(&ClimberMap::new()).is_empty());
    }

    #[test]
    fn test_unique_genders_and_categories() {
        let divisions = vec![
            Division::new("FEMALE", "Advanced"),
            Division::new("FEMALE", "Beginner"),
            Division::new("MALE", "Advanced"),
        ];
        assert_eq!(unique_genders(&divisions), vec!["FEMALE", "MALE"]);
        assert_eq!(unique_categories(&divisions), vec!["Advanced", "Beginner"]);
    }
}
