use super::geo::distance_miles;
use super::overlap::overlap_score;
use super::weights::{SubScoreCaps, SUB_SCORE_CAPS};
use crate::schedule::availability::normalize;
use crate::{MatchCandidate, UserProfile};

/// Fallback commute preference when the profile carries none. Large enough
/// that distance barely dents the score until the user opts into a radius.
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 50_000.0;

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub caps: SubScoreCaps,
    pub default_max_distance_miles: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            caps: SUB_SCORE_CAPS,
            default_max_distance_miles: env_default_max_distance(),
        }
    }
}

fn env_default_max_distance() -> f64 {
    std::env::var("GIGMATCH_DEFAULT_MAX_DISTANCE_MILES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_DISTANCE_MILES)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub score: f64,
    pub max_score: f64,
    pub status: &'static str,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub candidate_id: String,
    pub total: f64,
    pub job: ScoringResult,
    pub location: ScoringResult,
    pub availability: ScoringResult,
}

/// One-shot scoring with the default configuration.
pub fn score_candidate(profile: &UserProfile, candidate: &MatchCandidate) -> MatchScore {
    MatchScorer::new(ScoringConfig::default()).score(profile, candidate)
}

pub struct MatchScorer {
    config: ScoringConfig,
}

impl MatchScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Aggregate score: three independently capped sub-scores summed (0-100).
    /// Always returns a result; missing optional data zeroes the affected
    /// component instead of failing.
    pub fn score(&self, profile: &UserProfile, candidate: &MatchCandidate) -> MatchScore {
        let job = self.score_job(candidate);
        let location = self.score_location(profile, candidate);
        let availability = self.score_availability(profile, candidate);
        let total = job.score + location.score + availability.score;

        MatchScore {
            candidate_id: candidate.id.clone(),
            total,
            job,
            location,
            availability,
        }
    }

    /// Job fit arrives precomputed from the skill-similarity service and is
    /// passed through unchanged; the 0-40 range is the supplier's contract.
    fn score_job(&self, candidate: &MatchCandidate) -> ScoringResult {
        let cap = self.config.caps.job;
        let score = candidate.job_skill_score;

        ScoringResult {
            score,
            max_score: cap,
            status: status_from_ratio(score / cap),
            details: format!("external job fit {:.1}/{:.0}", score, cap),
        }
    }

    fn score_location(&self, profile: &UserProfile, candidate: &MatchCandidate) -> ScoringResult {
        let cap = self.config.caps.location;
        let (mine, theirs) = match (profile.location, candidate.location) {
            (Some(mine), Some(theirs)) => (mine, theirs),
            _ => {
                return ScoringResult {
                    score: 0.0,
                    max_score: cap,
                    status: "UNKNOWN",
                    details: "location missing on one side".into(),
                };
            }
        };

        let distance = distance_miles(&mine, &theirs);
        let max_preference = profile
            .max_distance_miles
            .unwrap_or(self.config.default_max_distance_miles);
        // Linear decay out to the preference radius, floored at zero. The
        // .max also swallows the NaN a zero-mile preference would produce.
        let score = ((1.0 - distance / max_preference) * cap).max(0.0);

        ScoringResult {
            score,
            max_score: cap,
            status: status_from_ratio(score / cap),
            details: format!("{distance:.0}mi apart, preference {max_preference:.0}mi"),
        }
    }

    fn score_availability(&self, profile: &UserProfile, candidate: &MatchCandidate) -> ScoringResult {
        let cap = self.config.caps.availability;
        let (mine, theirs) = match (&profile.availability, &candidate.availability) {
            (Some(mine), Some(theirs)) => (mine, theirs),
            _ => {
                return ScoringResult {
                    score: 0.0,
                    max_score: cap,
                    status: "UNKNOWN",
                    details: "availability missing on one side".into(),
                };
            }
        };

        let mine = normalize(mine);
        let theirs = normalize(theirs);
        let ratio = overlap_score(&mine.weekly, &theirs.weekly);
        // The raw ratio can exceed 1.0 when one candidate slot spans several
        // of ours; the contribution stays within the cap.
        let score = (ratio * cap).min(cap);

        ScoringResult {
            score,
            max_score: cap,
            status: status_from_ratio(score / cap),
            details: format!(
                "slot overlap {:.0}%, {}h vs {}h recurring per week",
                ratio * 100.0,
                mine.total_weekly_hours,
                theirs.total_weekly_hours
            ),
        }
    }
}

fn status_from_ratio(ratio: f64) -> &'static str {
    if ratio >= 0.9 {
        "PERFECT_MATCH"
    } else if ratio >= 0.7 {
        "MATCH"
    } else if ratio >= 0.4 {
        "PARTIAL_MATCH"
    } else {
        "MISS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::availability::{RawAvailabilityRecord, RawDayEntry, RecurringEntry, RepeatKind};
    use crate::schedule::time::TimeSlot;
    use crate::Location;

    fn weekday_nine_to_five(day: &str) -> RawAvailabilityRecord {
        RawAvailabilityRecord::new(vec![(
            day.to_string(),
            RawDayEntry::Recurring(RecurringEntry {
                repeat_type: RepeatKind::Weekly,
                slots: vec![TimeSlot::new("09:00", "17:00")],
            }),
        )])
    }

    fn full_profile() -> UserProfile {
        UserProfile {
            location: Some(Location {
                latitude: 37.7749,
                longitude: -122.4194,
            }),
            availability: Some(weekday_nine_to_five("monday")),
            max_distance_miles: Some(50.0),
        }
    }

    fn full_candidate() -> MatchCandidate {
        MatchCandidate {
            id: "cand-1".into(),
            location: Some(Location {
                latitude: 37.7749,
                longitude: -122.4194,
            }),
            availability: Some(weekday_nine_to_five("monday")),
            job_skill_score: 40.0,
        }
    }

    #[test]
    fn coincident_full_match_scores_one_hundred() {
        let score = score_candidate(&full_profile(), &full_candidate());

        assert_eq!(score.location.score, 30.0);
        assert_eq!(score.availability.score, 30.0);
        assert_eq!(score.job.score, 40.0);
        assert_eq!(score.total, 100.0);
        assert_eq!(score.job.status, "PERFECT_MATCH");
    }

    #[test]
    fn missing_location_and_availability_leave_job_score_only() {
        let candidate = MatchCandidate {
            id: "cand-2".into(),
            location: None,
            availability: None,
            job_skill_score: 25.0,
        };

        let score = score_candidate(&full_profile(), &candidate);
        assert_eq!(score.total, 25.0);
        assert_eq!(score.location.status, "UNKNOWN");
        assert_eq!(score.availability.status, "UNKNOWN");
        assert_eq!(score.location.score, 0.0);
        assert_eq!(score.availability.score, 0.0);
    }

    #[test]
    fn distance_beyond_preference_clamps_to_zero() {
        // ~100 miles due south of the profile.
        let mut candidate = full_candidate();
        candidate.location = Some(Location {
            latitude: 36.3256,
            longitude: -122.4194,
        });

        let score = score_candidate(&full_profile(), &candidate);
        assert_eq!(score.location.score, 0.0);
        assert_eq!(score.location.status, "MISS");
        assert!(score.location.details.contains("100mi"));
    }

    #[test]
    fn absent_preference_falls_back_to_permissive_default() {
        let mut profile = full_profile();
        profile.max_distance_miles = None;
        let mut candidate = full_candidate();
        candidate.location = Some(Location {
            latitude: 36.3256,
            longitude: -122.4194,
        });

        let score = score_candidate(&profile, &candidate);
        assert!(score.location.score > 29.9);
        assert_eq!(score.location.status, "PERFECT_MATCH");
    }

    #[test]
    fn zero_mile_preference_never_yields_nan() {
        let mut profile = full_profile();
        profile.max_distance_miles = Some(0.0);

        let score = score_candidate(&profile, &full_candidate());
        assert_eq!(score.location.score, 0.0);
        assert!(score.total.is_finite());
    }

    #[test]
    fn spanning_candidate_slot_is_capped_at_the_ceiling() {
        let mut profile = full_profile();
        profile.availability = Some(RawAvailabilityRecord::new(vec![(
            "monday".into(),
            RawDayEntry::Slots(vec![
                TimeSlot::new("09:00", "12:00"),
                TimeSlot::new("13:00", "18:00"),
            ]),
        )]));

        let score = score_candidate(&profile, &full_candidate());
        // Raw overlap ratio is 2.0 here; the sub-score must not exceed 30.
        assert_eq!(score.availability.score, 30.0);
    }

    #[test]
    fn disjoint_schedules_miss_on_availability() {
        let mut candidate = full_candidate();
        candidate.availability = Some(weekday_nine_to_five("saturday"));

        let score = score_candidate(&full_profile(), &candidate);
        assert_eq!(score.availability.score, 0.0);
        assert_eq!(score.availability.status, "MISS");
        assert_eq!(score.total, 70.0);
    }

    #[test]
    fn empty_availability_records_score_zero_without_error() {
        let mut profile = full_profile();
        profile.availability = Some(RawAvailabilityRecord::default());
        let mut candidate = full_candidate();
        candidate.availability = Some(RawAvailabilityRecord::default());

        let score = score_candidate(&profile, &candidate);
        assert_eq!(score.availability.score, 0.0);
        assert_eq!(score.availability.status, "MISS");
    }

    #[test]
    fn inputs_are_not_mutated_by_scoring() {
        let profile = full_profile();
        let candidate = full_candidate();
        let profile_before = profile.clone();
        let candidate_before = candidate.clone();

        let _ = score_candidate(&profile, &candidate);
        let _ = score_candidate(&profile, &candidate);

        assert_eq!(profile, profile_before);
        assert_eq!(candidate, candidate_before);
    }
}
