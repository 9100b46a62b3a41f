//! Notifications, blocks and reports.
//!
//! Blocks and reports are a small share of the population. Each attempt
//! picks a random actor and a random other user; repeated pairs are dropped
//! by the relation's [`PairGuard`], so the final count never exceeds the
//! nominal attempt count.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::{BASIS_POINTS_WHOLE, CountRange};
use crate::guard::{BlockRelation, PairGuard, ReportRelation};
use crate::model::{Block, Notification, NotificationKind, Report, UserId};

/// Oldest notification, in hours before the reference instant.
const NOTIFICATION_MAX_AGE_HOURS: i64 = 168;

/// Parameters for the notification stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPlan {
    /// Notifications per user.
    pub per_user: CountRange,
    /// Chance a notification is read, in percent.
    pub read_percent: u32,
}

/// Generates notifications for every user.
///
/// Each notification refers to a random other user, so populations smaller
/// than two produce none.
pub fn generate_notifications<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[UserId],
    plan: NotificationPlan,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    if users.len() < 2 {
        return Vec::new();
    }
    let mut notifications = Vec::new();
    for (index, &user_id) in users.iter().enumerate() {
        for _ in 0..plan.per_user.sample(rng) {
            let Some(other_id) = pick_other(rng, users, index) else {
                continue;
            };
            let kind = *NotificationKind::ALL
                .choose(rng)
                .unwrap_or(&NotificationKind::Like);
            let is_read = rng.random_ratio(plan.read_percent, 100);
            let age = TimeDelta::hours(rng.random_range(0..=NOTIFICATION_MAX_AGE_HOURS));
            notifications.push(Notification {
                user_id,
                other_id,
                kind,
                is_read,
                sent_at: now - age,
            });
        }
    }
    notifications
}

/// Number of attempts for a share of `population` given in basis points.
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "the nominal amount is floor(population x share)"
)]
pub fn nominal_count(population: usize, basis_points: u32) -> usize {
    let share = usize::try_from(basis_points).unwrap_or(usize::MAX);
    population.saturating_mul(share) / usize::try_from(BASIS_POINTS_WHOLE).unwrap_or(1)
}

/// Generates up to `floor(N x share)` distinct blocks.
pub fn generate_blocks<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[UserId],
    basis_points: u32,
) -> Vec<Block> {
    let pairs = random_pairs(rng, users, nominal_count(users.len(), basis_points));
    let mut guard = PairGuard::<BlockRelation>::with_capacity(pairs.len());
    pairs
        .into_iter()
        .filter(|&(actor, target)| guard.insert(actor, target).is_admitted())
        .map(|(user_id, blocked_id)| Block {
            user_id,
            blocked_id,
        })
        .collect()
}

/// Generates up to `floor(N x share)` distinct reports.
pub fn generate_reports<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[UserId],
    basis_points: u32,
) -> Vec<Report> {
    let pairs = random_pairs(rng, users, nominal_count(users.len(), basis_points));
    let mut guard = PairGuard::<ReportRelation>::with_capacity(pairs.len());
    pairs
        .into_iter()
        .filter(|&(actor, target)| guard.insert(actor, target).is_admitted())
        .map(|(user_id, reported_id)| Report {
            user_id,
            reported_id,
        })
        .collect()
}

/// Draws `attempts` random `(actor, other)` pairs.
fn random_pairs<R: Rng + ?Sized>(
    rng: &mut R,
    users: &[UserId],
    attempts: usize,
) -> Vec<(UserId, UserId)> {
    if users.len() < 2 {
        return Vec::new();
    }
    (0..attempts)
        .filter_map(|_| {
            let actor_index = rng.random_range(0..users.len());
            let actor = *users.get(actor_index)?;
            let target = pick_other(rng, users, actor_index)?;
            Some((actor, target))
        })
        .collect()
}

/// Picks a user other than the one at `exclude`, uniformly.
fn pick_other<R: Rng + ?Sized>(rng: &mut R, users: &[UserId], exclude: usize) -> Option<UserId> {
    let others = users.len().checked_sub(1).filter(|&count| count > 0)?;
    let slot = rng.random_range(0..others);
    let index = if slot >= exclude { slot + 1 } else { slot };
    users.get(index).copied()
}
