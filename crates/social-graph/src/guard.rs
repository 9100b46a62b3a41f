//! Set-backed uniqueness guards for directed user pairs.
//!
//! Likes, blocks and reports all forbid self-reference and allow each
//! ordered pair at most once. Every stage routes its "skip if present"
//! decision through a [`PairGuard`] instead of ad hoc membership checks.

use std::collections::HashSet;
use std::marker::PhantomData;

use crate::model::UserId;

/// Relation kind a guard protects; only used as a type-level tag.
pub trait PairRelation {
    /// Human-readable relation name for diagnostics.
    const NAME: &'static str;
}

/// Marker for like edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikeRelation;

/// Marker for block pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRelation;

/// Marker for report pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRelation;

impl PairRelation for LikeRelation {
    const NAME: &'static str = "like";
}

impl PairRelation for BlockRelation {
    const NAME: &'static str = "block";
}

impl PairRelation for ReportRelation {
    const NAME: &'static str = "report";
}

/// Verdict returned when offering a pair to a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAdmission {
    /// The pair is new and has been recorded.
    Admitted,
    /// The ordered pair was recorded earlier.
    Duplicate,
    /// Actor and target are the same user.
    SelfReference,
}

impl PairAdmission {
    /// Returns `true` for [`PairAdmission::Admitted`].
    #[must_use]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Records ordered `(actor, target)` pairs for one relation kind.
#[derive(Debug, Clone)]
pub struct PairGuard<K> {
    seen: HashSet<(UserId, UserId)>,
    relation: PhantomData<K>,
}

impl<K> Default for PairGuard<K> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
            relation: PhantomData,
        }
    }
}

impl<K: PairRelation> PairGuard<K> {
    /// Creates an empty guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty guard sized for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            relation: PhantomData,
        }
    }

    /// Offers a pair, recording it when admissible.
    pub fn insert(&mut self, actor: UserId, target: UserId) -> PairAdmission {
        if actor == target {
            return PairAdmission::SelfReference;
        }
        if self.seen.insert((actor, target)) {
            PairAdmission::Admitted
        } else {
            PairAdmission::Duplicate
        }
    }

    /// Returns `true` when the ordered pair has been admitted.
    #[must_use]
    pub fn contains(&self, actor: UserId, target: UserId) -> bool {
        self.seen.contains(&(actor, target))
    }

    /// Forgets a pair, returning `true` when it was present.
    pub fn remove(&mut self, actor: UserId, target: UserId) -> bool {
        self.seen.remove(&(actor, target))
    }

    /// Number of admitted pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` when nothing has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Relation name for diagnostics.
    #[must_use]
    pub const fn relation_name(&self) -> &'static str {
        K::NAME
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    #[test]
    fn admits_new_pairs_once() {
        let mut guard = PairGuard::<LikeRelation>::new();

        assert_eq!(guard.insert(user(1), user(2)), PairAdmission::Admitted);
        assert_eq!(guard.insert(user(1), user(2)), PairAdmission::Duplicate);
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn direction_matters() {
        let mut guard = PairGuard::<BlockRelation>::new();

        assert!(guard.insert(user(1), user(2)).is_admitted());
        assert!(guard.insert(user(2), user(1)).is_admitted());
        assert!(guard.contains(user(2), user(1)));
    }

    #[test]
    fn rejects_self_reference() {
        let mut guard = PairGuard::<ReportRelation>::new();

        assert_eq!(guard.insert(user(3), user(3)), PairAdmission::SelfReference);
        assert!(guard.is_empty());
        assert_eq!(guard.relation_name(), "report");
    }

    #[test]
    fn removed_pairs_can_be_readmitted() {
        let mut guard = PairGuard::<LikeRelation>::new();
        guard.insert(user(1), user(2));

        assert!(guard.remove(user(1), user(2)));
        assert!(guard.insert(user(1), user(2)).is_admitted());
    }
}
