use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::scoring::{MatchScore, MatchScorer, ScoringConfig};
use crate::{MatchCandidate, UserProfile};

#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: MatchCandidate,
    pub score: MatchScore,
}

pub struct MatchingEngine {
    scorer: MatchScorer,
}

impl MatchingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: MatchScorer::new(config),
        }
    }

    pub fn default() -> Self {
        Self::new(ScoringConfig::default())
    }

    /// Score the whole deck and order it best-first. The sort is stable, so
    /// candidates with equal totals keep their fetch order and ranking stays
    /// deterministic across runs.
    pub fn rank_candidates(
        &self,
        profile: &UserProfile,
        candidates: &[MatchCandidate],
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<_> = candidates
            .iter()
            .map(|candidate| {
                let score = self.scorer.score(profile, candidate);
                debug!(
                    candidate_id = %score.candidate_id,
                    total = score.total,
                    job = score.job.score,
                    location = score.location.score,
                    availability = score.availability.score,
                    "scored candidate"
                );
                RankedCandidate {
                    candidate: candidate.clone(),
                    score,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total
                .partial_cmp(&a.score.total)
                .unwrap_or(Ordering::Equal)
        });

        ranked
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }
}

/// Memoized scores for one deck, keyed by candidate id. Owned by the caller
/// (the scorer itself stays stateless), for re-scoring the same deck across
/// UI passes without recomputing untouched cards.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: HashMap<String, MatchScore>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_score(
        &mut self,
        scorer: &MatchScorer,
        profile: &UserProfile,
        candidate: &MatchCandidate,
    ) -> &MatchScore {
        self.entries
            .entry(candidate.id.clone())
            .or_insert_with(|| scorer.score(profile, candidate))
    }

    /// Drop one candidate's memoized score, e.g. after its record changed.
    pub fn invalidate(&mut self, candidate_id: &str) -> Option<MatchScore> {
        self.entries.remove(candidate_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
