//! Synthetic competition data, shaped exactly like the live feed so the rest
//! of the pipeline cannot tell the difference.

use rand::Rng;

use crate::feed::{RawAttempt, RawClimber, RawProblem, RawScoreRecord};

const MOCK_CLIMBERS: &[(&str, &str, &str, &str)] = &[
    ("Alice", "Johnson", "FEMALE", "Advanced"),
    ("Bob", "Smith", "MALE", "Advanced"),
    ("Carol", "Williams", "FEMALE", "Intermediate"),
    ("David", "Brown", "MALE", "Intermediate"),
    ("Emma", "Davis", "FEMALE", "Advanced"),
    ("Frank", "Miller", "MALE", "Beginner"),
    ("Grace", "Wilson", "FEMALE", "Beginner"),
    ("Henry", "Moore", "MALE", "Advanced"),
    ("Isabella", "Taylor", "FEMALE", "Intermediate"),
    ("Jack", "Anderson", "MALE", "Beginner"),
];

const MOCK_PROBLEMS: &[(&str, f64)] = &[
    ("Crimson Tide", 1000.0),
    ("Blue Steel", 900.0),
    ("Green Machine", 800.0),
    ("Purple Rain", 750.0),
    ("Orange Crush", 700.0),
    ("Yellow Submarine", 650.0),
    ("Pink Panther", 600.0),
    ("Black Diamond", 550.0),
    ("White Lightning", 500.0),
    ("Red Baron", 450.0),
    ("Silver Bullet", 400.0),
    ("Golden Eagle", 350.0),
];

/// Chance that a sent climb was an onsight
const ONSIGHT_RATE: f64 = 0.3;

/// Base send rate by category; stronger categories send more
fn skill_multiplier(category: &str) -> f64 {
    match category {
        "Advanced" => 0.8,
        "Intermediate" => 0.6,
        "Beginner" => 0.4,
        _ => 0.5,
    }
}

/// Harder (higher value) problems are sent less often
fn difficulty_factor(value: f64) -> f64 {
    (1.0 - (value - 350.0) / 1000.0).max(0.1)
}

/// Generate one record per mock climber with an attempt on every problem
pub fn generate_mock_records<R: Rng + ?Sized>(rng: &mut R) -> Vec<RawScoreRecord> {
    MOCK_CLIMBERS
        .iter()
        .map(|(first, last, gender, category)| {
            let base_rate = skill_multiplier(category);
            let results = MOCK_PROBLEMS
                .iter()
                .map(|(name, value)| {
                    let success_rate = base_rate * difficulty_factor(*value);
                    let sent = rng.gen_bool(success_rate);
                    let onsight = sent && rng.gen_bool(ONSIGHT_RATE);
                    RawAttempt {
                        problem: RawProblem {
                            name: name.to_string(),
                            value: *value,
                        },
                        sent,
                        onsight,
                    }
                })
                .collect();

            RawScoreRecord {
                climber_first_name: first.to_string(),
                climber_last_name: last.to_string(),
                climber: RawClimber {
                    gender: gender.to_string(),
                    category: category.to_string(),
                    results,
                },
            }
        })
        .collect()
}
