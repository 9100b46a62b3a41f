//! Chat messages exchanged inside matches.

use chrono::{DateTime, TimeDelta, Utc};
use fake::Fake;
use fake::faker::lorem::raw::Sentence;
use fake::locales::FR_FR;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::CountRange;
use crate::matches::{MatchPair, MatchSet};
use crate::model::Message;

/// Fixed openers every run can draw from.
const BASE_PHRASES: [&str; 10] = [
    "Salut! Comment ça va? 😊",
    "Ton profil m'a beaucoup plu!",
    "On a les mêmes centres d'intérêt apparemment!",
    "Tu fais quoi dans la vie?",
    "Je suis dispo ce weekend si tu veux qu'on se voit!",
    "Haha, c'est marrant ça!",
    "Tu habites où exactement?",
    "J'adore ta photo de profil!",
    "On pourrait aller boire un verre?",
    "Tu connais un bon resto par ici?",
];

/// Filler sentences added to the fixed phrases for each run.
const SYNTHESIZED_PHRASES: usize = 3;

const MESSAGE_MAX_AGE_DAYS: i64 = 14;
const MESSAGE_MAX_HOURS: i64 = 23;
const MESSAGE_MAX_MINUTES: i64 = 59;

/// Message bodies available to one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseBook {
    phrases: Vec<String>,
}

impl PhraseBook {
    /// Builds the run's phrase set: the fixed openers plus three sentences
    /// synthesized from `rng`.
    pub fn synthesize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut phrases: Vec<String> = BASE_PHRASES
            .iter()
            .map(|&phrase| phrase.to_owned())
            .collect();
        for _ in 0..SYNTHESIZED_PHRASES {
            phrases.push(Sentence(FR_FR, 3..8).fake_with_rng(rng));
        }
        Self { phrases }
    }

    /// Every phrase in the book.
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.phrases
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| BASE_PHRASES[0].to_owned())
    }
}

/// Messages exchanged by the two members of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// The match the conversation belongs to.
    pub pair: MatchPair,
    /// Messages in generation order, which is not chronological.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Messages ordered by send time, oldest first.
    #[must_use]
    pub fn sorted_by_time(&self) -> Vec<&Message> {
        let mut ordered: Vec<&Message> = self.messages.iter().collect();
        ordered.sort_by_key(|message| message.sent_at);
        ordered
    }
}

/// Generates a conversation for every match.
///
/// Each message picks its sender uniformly between the two members and is
/// addressed to the other one. Timestamps are drawn independently.
pub fn generate_conversations<R: Rng + ?Sized>(
    rng: &mut R,
    matches: &MatchSet,
    phrases: &PhraseBook,
    per_match: CountRange,
    read_percent: u32,
    now: DateTime<Utc>,
) -> Vec<Conversation> {
    matches
        .pairs()
        .iter()
        .map(|&pair| {
            let messages = (0..per_match.sample(rng))
                .map(|_| synthesize_message(rng, pair, phrases, read_percent, now))
                .collect();
            Conversation { pair, messages }
        })
        .collect()
}

fn synthesize_message<R: Rng + ?Sized>(
    rng: &mut R,
    pair: MatchPair,
    phrases: &PhraseBook,
    read_percent: u32,
    now: DateTime<Utc>,
) -> Message {
    let (sender, recipient) = if rng.random_bool(0.5) {
        (pair.first(), pair.second())
    } else {
        (pair.second(), pair.first())
    };
    let content = phrases.pick(rng);
    let age = TimeDelta::days(rng.random_range(0..=MESSAGE_MAX_AGE_DAYS))
        + TimeDelta::hours(rng.random_range(0..=MESSAGE_MAX_HOURS))
        + TimeDelta::minutes(rng.random_range(0..=MESSAGE_MAX_MINUTES));
    let is_read = rng.random_ratio(read_percent, 100);
    Message {
        sender,
        recipient,
        content,
        is_read,
        sent_at: now - age,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;
    use crate::likes::LikeGraph;
    use crate::model::{LikeEdge, UserId};

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    #[fixture]
    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(314)
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 14, 20, 15, 0)
            .single()
            .expect("valid instant")
    }

    fn mutual_matches(count: u128, now: DateTime<Utc>) -> MatchSet {
        let mut graph = LikeGraph::new();
        for n in 0..count {
            let (a, b) = (user(2 * n), user(2 * n + 1));
            graph.insert(LikeEdge {
                actor: a,
                target: b,
                created_at: now,
            });
            graph.insert(LikeEdge {
                actor: b,
                target: a,
                created_at: now,
            });
        }
        MatchSet::resolve(&graph)
    }

    #[rstest]
    fn messages_stay_between_match_members(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let matches = mutual_matches(12, now);
        let phrases = PhraseBook::synthesize(&mut rng);
        let per_match = CountRange::new("messagesPerMatch", 1, 20).expect("valid range");

        let conversations = generate_conversations(&mut rng, &matches, &phrases, per_match, 70, now);

        assert_eq!(conversations.len(), 12);
        for conversation in &conversations {
            assert!((1..=20).contains(&conversation.messages.len()));
            for message in &conversation.messages {
                assert_eq!(
                    conversation.pair.partner_of(message.sender),
                    Some(message.recipient)
                );
                assert!(phrases.phrases().contains(&message.content));
            }
        }
    }

    #[rstest]
    fn timestamps_fall_within_two_weeks(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let matches = mutual_matches(5, now);
        let phrases = PhraseBook::synthesize(&mut rng);

        let conversations =
            generate_conversations(&mut rng, &matches, &phrases, CountRange::exactly(20), 70, now);

        let limit = TimeDelta::days(14) + TimeDelta::hours(23) + TimeDelta::minutes(59);
        for message in conversations.iter().flat_map(|c| &c.messages) {
            assert!(message.sent_at <= now);
            assert!(now - message.sent_at <= limit);
        }
    }

    #[rstest]
    fn no_matches_means_no_messages(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let phrases = PhraseBook::synthesize(&mut rng);

        let conversations = generate_conversations(
            &mut rng,
            &MatchSet::default(),
            &phrases,
            CountRange::exactly(5),
            70,
            now,
        );

        assert!(conversations.is_empty());
    }

    #[rstest]
    fn read_ratio_extremes_are_honoured(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let matches = mutual_matches(3, now);
        let phrases = PhraseBook::synthesize(&mut rng);

        let all_read =
            generate_conversations(&mut rng, &matches, &phrases, CountRange::exactly(10), 100, now);
        let none_read =
            generate_conversations(&mut rng, &matches, &phrases, CountRange::exactly(10), 0, now);

        assert!(all_read.iter().flat_map(|c| &c.messages).all(|m| m.is_read));
        assert!(none_read.iter().flat_map(|c| &c.messages).all(|m| !m.is_read));
    }

    #[rstest]
    fn sorted_view_is_chronological(mut rng: ChaCha8Rng, now: DateTime<Utc>) {
        let matches = mutual_matches(1, now);
        let phrases = PhraseBook::synthesize(&mut rng);

        let conversations =
            generate_conversations(&mut rng, &matches, &phrases, CountRange::exactly(20), 70, now);
        let conversation = conversations.first().expect("one conversation");
        let ordered = conversation.sorted_by_time();

        assert_eq!(ordered.len(), 20);
        assert!(
            ordered
                .windows(2)
                .all(|window| matches!(window, [earlier, later] if earlier.sent_at <= later.sent_at))
        );
    }

    #[rstest]
    fn phrase_book_holds_fixed_and_synthesized_phrases(mut rng: ChaCha8Rng) {
        let phrases = PhraseBook::synthesize(&mut rng);

        assert_eq!(phrases.phrases().len(), BASE_PHRASES.len() + SYNTHESIZED_PHRASES);
        assert!(phrases.phrases().iter().any(|p| p == "Tu habites où exactement?"));
    }
}
