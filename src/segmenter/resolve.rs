use std::cmp::Ordering;

use crate::model::CandidateBoundary;

/// Removes overlapping candidates, keeping the higher-confidence one per
/// overlapping pair. Candidates are processed in (start ascending,
/// confidence descending) order; each one is checked against the first
/// already-accepted boundary it overlaps, evicting that boundary when the
/// newcomer has strictly higher confidence and being discarded otherwise.
///
/// This is a local greedy pass, not optimal interval scheduling: an eviction
/// considers only the first overlap it finds. Kept as-is for parity with the
/// tuned production behavior.
pub fn resolve_overlaps(mut candidates: Vec<CandidateBoundary>) -> Vec<CandidateBoundary> {
    if candidates.is_empty() {
        return candidates;
    }

    candidates.sort_by(|a, b| match a.start.cmp(&b.start) {
        Ordering::Equal => b.confidence.total_cmp(&a.confidence),
        other => other,
    });

    let mut accepted: Vec<CandidateBoundary> = Vec::new();

    for candidate in candidates {
        let overlap = accepted
            .iter()
            .position(|existing| candidate.start < existing.end && candidate.end > existing.start);

        match overlap {
            Some(index) if candidate.confidence > accepted[index].confidence => {
                accepted.remove(index);
                accepted.push(candidate);
            }
            Some(_) => {}
            None => accepted.push(candidate),
        }
    }

    accepted.sort_by_key(|candidate| candidate.start);
    accepted
}
