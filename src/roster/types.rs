use serde::Serialize;
use std::collections::BTreeMap;

/// A single attempt on a problem.
///
/// `onsight` implies `sent`; the feed is trusted on this and it is not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Climb {
    pub name: String,
    pub points: f64, // Base value of the problem
    pub sent: bool,
    pub onsight: bool,
}

impl Climb {
    pub fn new(name: impl Into<String>, points: f64, sent: bool, onsight: bool) -> Self {
        Self {
            name: name.into(),
            points,
            sent,
            onsight,
        }
    }

    /// Points as shown in the scored climbs column, "1000" or "1000*" for an onsight
    pub fn display_points(&self) -> String {
        if self.onsight {
            format!("{}*", self.points)
        } else {
            format!("{}", self.points)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Climber {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,   // As received, normalized when a Division is built
    pub category: String, // As received, normalized when a Division is built
    pub climbs: Vec<Climb>,
}

impl Climber {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: gender.into(),
            category: category.into(),
            climbs: Vec::new(),
        }
    }

    /// Identity key used for deduplication, "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Climbers keyed by full name. Ordered so that iteration (and therefore
/// tie order in the standings) is stable across runs.
pub type ClimberMap = BTreeMap<String, Climber>;
