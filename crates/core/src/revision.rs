//! Revision history rules: comparison targets, retention, and pruning.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Comparison targets
// ---------------------------------------------------------------------------

/// Query-parameter value that stands for the live (unsaved) document state.
pub const LIVE_SENTINEL: DbId = 0;

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionTarget {
    /// A stored revision, by revision id.
    Stored(DbId),
    /// The document's current working state.
    Live,
}

impl RevisionTarget {
    /// Interpret an optional query parameter. `None` means "not specified";
    /// the sentinel `0` maps to [`RevisionTarget::Live`].
    pub fn from_param(param: Option<DbId>) -> Option<Self> {
        param.map(|id| {
            if id == LIVE_SENTINEL {
                Self::Live
            } else {
                Self::Stored(id)
            }
        })
    }

    /// Value to emit back at the query-parameter boundary.
    pub fn as_param(&self) -> DbId {
        match self {
            Self::Stored(id) => *id,
            Self::Live => LIVE_SENTINEL,
        }
    }
}

/// Resolved description of a comparison side, returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetSummary {
    Live,
    Stored {
        revision_id: DbId,
        revision_number: i32,
    },
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

/// Revisions kept per document when no override applies.
pub const DEFAULT_RETENTION: i32 = 25;

/// Per-entity-type revision retention.
///
/// Negative configured values behave as `0`, which disables history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub default_limit: i32,
    pub overrides: HashMap<String, i32>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_RETENTION,
            overrides: HashMap::new(),
        }
    }
}

impl RetentionPolicy {
    pub fn new(default_limit: i32) -> Self {
        Self {
            default_limit,
            overrides: HashMap::new(),
        }
    }

    /// Builder-style override for a single entity type.
    pub fn with_override(mut self, entity_type: &str, limit: i32) -> Self {
        self.overrides.insert(entity_type.to_string(), limit);
        self
    }

    /// Maximum revisions kept for `entity_type`, clamped to be non-negative.
    pub fn limit_for(&self, entity_type: &str) -> usize {
        let raw = self
            .overrides
            .get(entity_type)
            .copied()
            .unwrap_or(self.default_limit);
        usize::try_from(raw.max(0)).unwrap_or(0)
    }

    /// Retention for `entity_type`, or [`CoreError::FeatureUnavailable`] when
    /// that type keeps no history.
    pub fn require_history(&self, entity_type: &str) -> Result<usize, CoreError> {
        match self.limit_for(entity_type) {
            0 => Err(CoreError::FeatureUnavailable(format!(
                "Revision history is disabled for '{entity_type}'"
            ))),
            limit => Ok(limit),
        }
    }
}

/// Parse per-type overrides from `"post=25,page=10"`.
///
/// Whitespace around pairs is ignored and empty segments are skipped.
pub fn parse_overrides(raw: &str) -> Result<HashMap<String, i32>, CoreError> {
    let mut overrides = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (entity_type, limit) = pair.split_once('=').ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid retention override '{pair}', expected 'type=limit'"
            ))
        })?;
        let entity_type = entity_type.trim();
        if entity_type.is_empty() {
            return Err(CoreError::Validation(format!(
                "Invalid retention override '{pair}': empty entity type"
            )));
        }
        let limit: i32 = limit.trim().parse().map_err(|_| {
            CoreError::Validation(format!(
                "Invalid retention override '{pair}': limit must be an integer"
            ))
        })?;
        overrides.insert(entity_type.to_string(), limit);
    }
    Ok(overrides)
}

// ---------------------------------------------------------------------------
// Pruning
// ---------------------------------------------------------------------------

/// Select which revision numbers to delete so that only the `retention`
/// highest numbers remain.
///
/// Input order does not matter. The result is sorted ascending.
pub fn plan_prune(existing: &[i32], retention: usize) -> Vec<i32> {
    let mut numbers = existing.to_vec();
    numbers.sort_unstable_by(|a, b| b.cmp(a));
    numbers.dedup();
    let mut doomed = numbers.split_off(retention.min(numbers.len()));
    doomed.sort_unstable();
    doomed
}

/// Next revision number after the given existing numbers.
pub fn next_revision_number(existing: &[i32]) -> i32 {
    existing.iter().copied().max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- RevisionTarget -------------------------------------------------------

    #[test]
    fn missing_param_is_unspecified() {
        assert_eq!(RevisionTarget::from_param(None), None);
    }

    #[test]
    fn zero_param_is_live() {
        assert_eq!(
            RevisionTarget::from_param(Some(0)),
            Some(RevisionTarget::Live)
        );
        assert_eq!(RevisionTarget::Live.as_param(), 0);
    }

    #[test]
    fn positive_param_is_stored() {
        let target = RevisionTarget::from_param(Some(17)).unwrap();
        assert_eq!(target, RevisionTarget::Stored(17));
        assert_eq!(target.as_param(), 17);
    }

    #[test]
    fn target_summary_serializes_with_kind() {
        let json = serde_json::to_value(TargetSummary::Stored {
            revision_id: 4,
            revision_number: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "stored", "revision_id": 4, "revision_number": 2 })
        );
        let live = serde_json::to_value(TargetSummary::Live).unwrap();
        assert_eq!(live, serde_json::json!({ "kind": "live" }));
    }

    // -- RetentionPolicy ------------------------------------------------------

    #[test]
    fn default_limit_applies_without_override() {
        let policy = RetentionPolicy::new(10);
        assert_eq!(policy.limit_for("post"), 10);
        assert_matches!(policy.require_history("post"), Ok(10));
    }

    #[test]
    fn override_wins_over_default() {
        let policy = RetentionPolicy::new(10).with_override("page", 3);
        assert_eq!(policy.limit_for("page"), 3);
        assert_eq!(policy.limit_for("post"), 10);
    }

    #[test]
    fn negative_limit_clamps_to_zero_and_disables() {
        let policy = RetentionPolicy::new(-5);
        assert_eq!(policy.limit_for("post"), 0);
        assert_matches!(
            policy.require_history("post"),
            Err(CoreError::FeatureUnavailable(_))
        );
    }

    #[test]
    fn zero_override_disables_one_type() {
        let policy = RetentionPolicy::default().with_override("page", 0);
        assert_matches!(
            policy.require_history("page"),
            Err(CoreError::FeatureUnavailable(msg)) if msg.contains("page")
        );
        assert_matches!(policy.require_history("post"), Ok(25));
    }

    #[test]
    fn parse_overrides_accepts_pairs() {
        let parsed = parse_overrides(" post=25, page = 10 ,,article=-1").unwrap();
        assert_eq!(parsed.get("post"), Some(&25));
        assert_eq!(parsed.get("page"), Some(&10));
        assert_eq!(parsed.get("article"), Some(&-1));
    }

    #[test]
    fn parse_overrides_empty_string_is_empty() {
        assert!(parse_overrides("").unwrap().is_empty());
    }

    #[test]
    fn parse_overrides_rejects_malformed() {
        assert_matches!(parse_overrides("post"), Err(CoreError::Validation(_)));
        assert_matches!(parse_overrides("=4"), Err(CoreError::Validation(_)));
        assert_matches!(parse_overrides("post=many"), Err(CoreError::Validation(_)));
    }

    // -- Pruning --------------------------------------------------------------

    #[test]
    fn prune_keeps_most_recent() {
        assert_eq!(plan_prune(&[1, 2, 3], 2), vec![1]);
    }

    #[test]
    fn prune_nothing_when_under_limit() {
        assert!(plan_prune(&[1, 2], 5).is_empty());
    }

    #[test]
    fn prune_to_zero_removes_everything() {
        assert_eq!(plan_prune(&[3, 1, 2], 0), vec![1, 2, 3]);
    }

    #[test]
    fn prune_handles_gaps_and_order() {
        assert_eq!(plan_prune(&[9, 2, 7, 4], 2), vec![2, 4]);
    }

    #[test]
    fn prune_after_n_records_leaves_min_n_r() {
        for retention in 1..6usize {
            let mut kept: Vec<i32> = Vec::new();
            for _ in 0..8 {
                let next = next_revision_number(&kept);
                kept.push(next);
                let doomed = plan_prune(&kept, retention);
                kept.retain(|n| !doomed.contains(n));
            }
            assert_eq!(kept.len(), retention.min(8));
            assert_eq!(*kept.iter().max().unwrap(), 8, "newest must survive");
        }
    }

    #[test]
    fn next_number_starts_at_one() {
        assert_eq!(next_revision_number(&[]), 1);
        assert_eq!(next_revision_number(&[4, 2]), 5);
    }
}
