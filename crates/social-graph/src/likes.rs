//! Directed like edges between users.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::seq::index;

use crate::config::CountRange;
use crate::guard::{LikeRelation, PairAdmission, PairGuard};
use crate::model::{LikeEdge, UserId};

/// Oldest like, in days before the reference instant.
const LIKE_MAX_AGE_DAYS: i64 = 30;

/// The set of like edges, kept in insertion order.
///
/// Every insertion goes through a [`PairGuard`], so the graph never holds a
/// self-like or the same ordered pair twice.
#[derive(Debug, Clone, Default)]
pub struct LikeGraph {
    edges: Vec<LikeEdge>,
    guard: PairGuard<LikeRelation>,
}

impl LikeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge unless the guard rejects it.
    pub fn insert(&mut self, edge: LikeEdge) -> PairAdmission {
        let admission = self.guard.insert(edge.actor, edge.target);
        if admission.is_admitted() {
            self.edges.push(edge);
        }
        admission
    }

    /// Removes the `actor -> target` edge, returning it when present.
    pub fn remove(&mut self, actor: UserId, target: UserId) -> Option<LikeEdge> {
        if !self.guard.remove(actor, target) {
            return None;
        }
        let position = self
            .edges
            .iter()
            .position(|edge| edge.actor == actor && edge.target == target)?;
        Some(self.edges.remove(position))
    }

    /// Returns `true` when `actor` likes `target`.
    #[must_use]
    pub fn contains(&self, actor: UserId, target: UserId) -> bool {
        self.guard.contains(actor, target)
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[LikeEdge] {
        &self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl PartialEq for LikeGraph {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl Eq for LikeGraph {}

/// Generates outgoing likes for every user.
///
/// Each user draws a like count from `per_user`, clamped to the `N - 1`
/// other users, then samples that many distinct targets. Sampling runs over
/// the `N - 1` slots that exclude the actor, so no candidate list is built.
pub fn generate_likes<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[UserId],
    per_user: CountRange,
    now: DateTime<Utc>,
) -> LikeGraph {
    let others = users.len().saturating_sub(1);
    let mut graph = LikeGraph::new();
    for (actor_index, &actor) in users.iter().enumerate() {
        let count = per_user.sample_clamped(rng, others);
        for slot in index::sample(rng, others, count) {
            let target_index = if slot >= actor_index { slot + 1 } else { slot };
            let Some(&target) = users.get(target_index) else {
                continue;
            };
            let created_at = now - TimeDelta::days(rng.random_range(0..=LIKE_MAX_AGE_DAYS));
            graph.insert(LikeEdge {
                actor,
                target,
                created_at,
            });
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;
    use crate::entity_pool::create_users;

    fn pair() -> (UserId, UserId) {
        (
            UserId::from_uuid(Uuid::from_u128(1)),
            UserId::from_uuid(Uuid::from_u128(2)),
        )
    }

    #[fixture]
    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0)
            .single()
            .expect("valid instant")
    }

    #[rstest]
    fn edges_are_never_self_or_duplicate(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let users = create_users(&mut rng, 60);
        let graph = generate_likes(&mut rng, &users, CountRange::exactly(30), now);

        let mut seen = HashSet::new();
        for edge in graph.edges() {
            assert_ne!(edge.actor, edge.target);
            assert!(seen.insert((edge.actor, edge.target)));
        }
        assert_eq!(graph.len(), 60 * 30);
    }

    #[rstest]
    fn like_count_is_clamped_to_other_users(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let users = create_users(&mut rng, 4);
        let graph = generate_likes(&mut rng, &users, CountRange::exactly(30), now);

        assert_eq!(graph.len(), 4 * 3);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn tiny_populations_produce_no_likes(
        mut rng: ChaCha8Rng,
        now: DateTime<Utc>,
        #[case] population: usize,
    ) {
        let users = create_users(&mut rng, population);
        let graph = generate_likes(&mut rng, &users, CountRange::exactly(5), now);

        assert!(graph.is_empty());
    }

    #[rstest]
    fn timestamps_fall_within_the_last_month(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let users = create_users(&mut rng, 20);
        let graph = generate_likes(&mut rng, &users, CountRange::exactly(5), now);

        assert!(graph.edges().iter().all(|edge| {
            edge.created_at <= now && now - edge.created_at <= TimeDelta::days(LIKE_MAX_AGE_DAYS)
        }));
    }

    #[rstest]
    fn guard_rejects_repeated_insertions(now: DateTime<Utc>) {
        let (first, second) = pair();
        let mut graph = LikeGraph::new();
        let edge = LikeEdge {
            actor: first,
            target: second,
            created_at: now,
        };

        assert_eq!(graph.insert(edge), PairAdmission::Admitted);
        assert_eq!(graph.insert(edge), PairAdmission::Duplicate);
        assert_eq!(
            graph.insert(LikeEdge {
                target: first,
                ..edge
            }),
            PairAdmission::SelfReference
        );
        assert_eq!(graph.len(), 1);
    }

    #[rstest]
    fn removed_edges_disappear(now: DateTime<Utc>) {
        let (first, second) = pair();
        let mut graph = LikeGraph::new();
        graph.insert(LikeEdge {
            actor: first,
            target: second,
            created_at: now,
        });

        assert!(graph.remove(first, second).is_some());
        assert!(!graph.contains(first, second));
        assert!(graph.is_empty());
        assert!(graph.remove(first, second).is_none());
    }
}
