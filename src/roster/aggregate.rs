use tracing::debug;

use super::types::{Climb, Climber, ClimberMap};
use crate::feed::RawScoreRecord;

/// Group raw feed records into climbers keyed by full name.
///
/// Records are taken in input order and the first record seen for a name
/// wins: any later record with the same full name is dropped whole, its
/// climbs are not merged into the existing climber.
pub fn build_climbers(records: &[RawScoreRecord]) -> ClimberMap {
    let mut climbers = ClimberMap::new();
    let mut skipped = 0usize;

    for record in records {
        let full_name = record.full_name();
        if climbers.contains_key(&full_name) {
            skipped += 1;
            continue; // already added
        }

        let mut climber = Climber::new(
            record.climber_first_name.clone(),
            record.climber_last_name.clone(),
            record.climber.gender.clone(),
            record.climber.category.clone(),
        );
        climber.climbs = record
            .climber
            .results
            .iter()
            .map(|attempt| {
                Climb::new(
                    attempt.problem.name.clone(),
                    attempt.problem.value,
                    attempt.sent,
                    attempt.onsight,
                )
            })
            .collect();

        climbers.insert(full_name, climber);
    }

    if skipped > 0 {
        debug!(skipped, "dropped duplicate climber records");
    }
    climbers
}
