pub mod logging;
pub mod matching;
pub mod schedule;

use serde::{Deserialize, Serialize};

use schedule::availability::RawAvailabilityRecord;

// Commonly used data models for matching functions. Field names follow the
// document-store payloads (camelCase on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// The swiping side: the user whose deck is being ranked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub location: Option<Location>,
    pub availability: Option<RawAvailabilityRecord>,
    pub max_distance_miles: Option<f64>,
}

/// One card in the deck. `job_skill_score` is computed by the external
/// skill-similarity service (0-40, enforced by the supplier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchCandidate {
    pub id: String,
    pub location: Option<Location>,
    pub availability: Option<RawAvailabilityRecord>,
    pub job_skill_score: f64,
}
