//! Mutual likes resolved into matches.
//!
//! A match is never stored independently of the likes that imply it. The
//! [`MatchSet`] is recomputed from a [`LikeGraph`] whenever it is needed, so
//! removing a like and resolving again always yields a consistent view.

use serde::{Deserialize, Serialize};

use crate::likes::LikeGraph;
use crate::model::UserId;

/// Unordered pair of users who like each other, stored low id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    first: UserId,
    second: UserId,
}

impl MatchPair {
    /// Builds the canonical pair for two distinct users.
    ///
    /// Returns `None` when both identifiers are the same user.
    #[must_use]
    pub fn new(a: UserId, b: UserId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The member with the lower identifier.
    #[must_use]
    pub const fn first(&self) -> UserId {
        self.first
    }

    /// The member with the higher identifier.
    #[must_use]
    pub const fn second(&self) -> UserId {
        self.second
    }

    /// Returns the other member, or `None` if `user` is not in the pair.
    #[must_use]
    pub fn partner_of(&self, user: UserId) -> Option<UserId> {
        if user == self.first {
            Some(self.second)
        } else if user == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Every match implied by a like graph, in ascending pair order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    pairs: Vec<MatchPair>,
}

impl MatchSet {
    /// Resolves matches from the current like edges.
    ///
    /// Each edge `A -> B` with `A < B` is checked for the reverse edge with a
    /// hash lookup; the canonical direction alone emits the pair, so each
    /// match appears exactly once.
    #[must_use]
    pub fn resolve(likes: &LikeGraph) -> Self {
        let mut pairs: Vec<MatchPair> = likes
            .edges()
            .iter()
            .filter(|edge| edge.actor < edge.target && likes.contains(edge.target, edge.actor))
            .filter_map(|edge| MatchPair::new(edge.actor, edge.target))
            .collect();
        pairs.sort_unstable();
        Self { pairs }
    }

    /// Matches in ascending order.
    #[must_use]
    pub fn pairs(&self) -> &[MatchPair] {
        &self.pairs
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when nobody matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;
    use crate::model::LikeEdge;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 18, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn like(graph: &mut LikeGraph, actor: u128, target: u128, now: DateTime<Utc>) {
        graph.insert(LikeEdge {
            actor: user(actor),
            target: user(target),
            created_at: now,
        });
    }

    #[rstest]
    fn complete_graph_of_ten_yields_forty_five_matches(now: DateTime<Utc>) {
        let mut graph = LikeGraph::new();
        for actor in 0..10 {
            for target in 0..10 {
                like(&mut graph, actor, target, now);
            }
        }

        let matches = MatchSet::resolve(&graph);

        assert_eq!(matches.len(), 45);
        assert!(
            matches
                .pairs()
                .iter()
                .all(|pair| pair.first() < pair.second())
        );
    }

    #[rstest]
    fn one_way_like_is_not_a_match(now: DateTime<Utc>) {
        let mut graph = LikeGraph::new();
        like(&mut graph, 1, 2, now);

        assert!(MatchSet::resolve(&graph).is_empty());
    }

    #[rstest]
    fn every_match_is_backed_by_both_likes(now: DateTime<Utc>) {
        let mut graph = LikeGraph::new();
        like(&mut graph, 5, 3, now);
        like(&mut graph, 3, 5, now);
        like(&mut graph, 3, 7, now);
        like(&mut graph, 9, 1, now);
        like(&mut graph, 1, 9, now);

        let matches = MatchSet::resolve(&graph);

        assert_eq!(matches.len(), 2);
        for pair in matches.pairs() {
            assert!(graph.contains(pair.first(), pair.second()));
            assert!(graph.contains(pair.second(), pair.first()));
        }
        let partners_of_three: Vec<UserId> = matches
            .pairs()
            .iter()
            .filter_map(|pair| pair.partner_of(user(3)))
            .collect();
        assert_eq!(partners_of_three, vec![user(5)]);
    }

    #[rstest]
    fn removing_a_like_dissolves_the_match(now: DateTime<Utc>) {
        let mut graph = LikeGraph::new();
        like(&mut graph, 1, 2, now);
        like(&mut graph, 2, 1, now);
        assert_eq!(MatchSet::resolve(&graph).len(), 1);

        graph.remove(user(2), user(1));

        assert!(MatchSet::resolve(&graph).is_empty());
    }

    #[rstest]
    #[case(1, 2)]
    #[case(2, 1)]
    fn pairs_are_canonical_regardless_of_argument_order(#[case] a: u128, #[case] b: u128) {
        let pair = MatchPair::new(user(a), user(b)).expect("distinct users");

        assert_eq!(pair.first(), user(1));
        assert_eq!(pair.second(), user(2));
        assert_eq!(pair.partner_of(user(1)), Some(user(2)));
        assert_eq!(pair.partner_of(user(3)), None);
    }

    #[test]
    fn a_user_cannot_match_themselves() {
        assert_eq!(MatchPair::new(user(4), user(4)), None);
    }
}
