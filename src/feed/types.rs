use serde::{Deserialize, Serialize};

/// One entry of the results feed. The feed repeats the climber's name at the
/// top level and nests everything else under `climber`.
///
/// Fields the leaderboard does not use are ignored on parse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScoreRecord {
    pub climber_first_name: String,
    pub climber_last_name: String,
    pub climber: RawClimber,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawClimber {
    pub gender: String,
    pub category: String,
    pub results: Vec<RawAttempt>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawAttempt {
    pub problem: RawProblem,
    pub sent: bool,
    pub onsight: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawProblem {
    pub name: String,
    pub value: f64,
}

impl RawScoreRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.climber_first_name, self.climber_last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_with_extra_fields() {
        let json = r#"{
            "id": 42,
            "climberFirstName": "Alice",
            "climberLastName": "Johnson",
            "climber": {
                "id": 7,
                "gender": "FEMALE",
                "category": "Advanced",
                "results": [
                    { "problem": { "name": "Crimson Tide", "value": 1000, "color": "red" },
                      "sent": true, "onsight": true }
                ]
            }
        }"#;
        let record: RawScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.full_name(), "Alice Johnson");
        assert_eq!(record.climber.results.len(), 1);
        assert_eq!(record.climber.results[0].problem.value, 1000.0);
        assert!(record.climber.results[0].onsight);
    }

    #[test]
    fn test_parse_record_missing_results_fails() {
        let json = r#"{
            "climberFirstName": "Alice",
            "climberLastName": "Johnson",
            "climber": { "gender": "FEMALE", "category": "Advanced" }
        }"#;
        let result: Result<RawScoreRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_record_missing_problem_fails() {
        let json = r#"{
            "climberFirstName": "Alice",
            "climberLastName": "Johnson",
            "climber": {
                "gender": "FEMALE",
                "category": "Advanced",
                "results": [ { "sent": true, "onsight": false } ]
            }
        }"#;
        let result: Result<RawScoreRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
