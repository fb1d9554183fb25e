use serde::Serialize;

use crate::roster::{normalize_category, normalize_gender};

/// One leaderboard row, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimberResult {
    pub climber_name: String,
    pub score: f64,        // Rounded to 2 decimals
    pub num_climbs: usize, // Climbs that counted toward the score
    pub gender: String,    // Normalized, e.g. "MALE"
    pub category: String,  // Normalized, e.g. "Advanced"
    pub scored_climbs: String,
}

/// Optional gender/category selection. Values are matched case-insensitively
/// by normalizing them the same way divisions are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub gender: Option<String>,
    pub category: Option<String>,
}

impl Filters {
    pub fn new(gender: Option<&str>, category: Option<&str>) -> Self {
        Self {
            gender: gender.and_then(non_blank).map(normalize_gender),
            category: category.and_then(non_blank).map(normalize_category),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.gender.is_none() && self.category.is_none()
    }

    pub fn matches(&self, result: &ClimberResult) -> bool {
        let gender_ok = self.gender.as_ref().is_none_or(|g| *g == result.gender);
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| *c == result.category);
        gender_ok && category_ok
    }

    /// Table heading for the current selection
    pub fn heading(&self) -> String {
        match (&self.gender, &self.category) {
            (Some(g), Some(c)) => format!("{} {} Results", g, c),
            (Some(g), None) => format!("{} Results", g),
            (None, Some(c)) => format!("{} Results", c),
            (None, None) => "All Results".to_string(),
        }
    }

    /// Message shown when the selection leaves no climbers
    pub fn empty_message(&self) -> String {
        match (&self.gender, &self.category) {
            (Some(g), Some(c)) => format!("No results found for {} {} division.", g, c),
            (Some(g), None) => format!("No results found for {} climbers.", g),
            (None, Some(c)) => format!("No results found for {} category.", c),
            (None, None) => "No results found with current data.".to_string(),
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
