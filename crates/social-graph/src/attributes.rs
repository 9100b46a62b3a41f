//! Per-user demographic and profile attributes.
//!
//! Each user is synthesized independently from the run's RNG and a fixed
//! reference instant, so profiles never depend on one another.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, Utc};
use fake::Fake;
use fake::faker::company::raw::CatchPhrase;
use fake::faker::internet::raw::FreeEmailProvider;
use fake::faker::lorem::raw::Word;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::FR_FR;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::{CountRange, GenerationConfig};
use crate::error::GenerationError;
use crate::model::{
    Gender, Location, MicroDegrees, Photo, PresenceStatus, SexPreference, UserId, UserProfile,
};
use crate::validation::{BIO_MAX_CHARS, USERNAME_MAX_CHARS, truncate_chars, username_fragment};

/// Largest coordinate offset applied around a city centre (0.05°).
pub const COORDINATE_JITTER: MicroDegrees = MicroDegrees::new(50_000);

/// Maximum hours since a user was last seen.
const LAST_SEEN_MAX_HOURS: i64 = 72;

/// Highest username suffix.
const USERNAME_SUFFIX_MAX: u32 = 9_999;

/// Letters taken from each of the first and last names for a username.
const USERNAME_NAME_PREFIX: usize = 3;

/// Highest popularity score.
const POPULARITY_MAX: u8 = 100;

/// Largest birthday offset inside the age year, in days.
const BIRTHDAY_JITTER_MAX_DAYS: u64 = 364;

/// A named place users can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    /// Display name.
    pub name: &'static str,
    /// Centre latitude.
    pub latitude: MicroDegrees,
    /// Centre longitude.
    pub longitude: MicroDegrees,
}

const fn city(name: &'static str, latitude: i32, longitude: i32) -> City {
    City {
        name,
        latitude: MicroDegrees::new(latitude),
        longitude: MicroDegrees::new(longitude),
    }
}

/// French cities users are spread across.
pub const GAZETTEER: [City; 12] = [
    city("Paris", 48_856_600, 2_352_200),
    city("Lyon", 45_764_000, 4_835_700),
    city("Marseille", 43_296_500, 5_369_800),
    city("Toulouse", 43_604_700, 1_444_200),
    city("Nice", 43_710_200, 7_262_000),
    city("Nantes", 47_218_400, -1_553_600),
    city("Bordeaux", 44_837_800, -579_200),
    city("Lille", 50_629_200, 3_057_300),
    city("Strasbourg", 48_573_400, 7_752_100),
    city("Montpellier", 43_610_800, 3_876_700),
    city("Rennes", 48_117_300, -1_677_800),
    city("Grenoble", 45_188_500, 5_724_500),
];

/// French first names given to men; `fake` has no gendered name faker.
const MALE_FIRST_NAMES: [&str; 20] = [
    "Antoine",
    "Baptiste",
    "Benoît",
    "Clément",
    "Damien",
    "Étienne",
    "François",
    "Guillaume",
    "Hugo",
    "Julien",
    "Laurent",
    "Louis",
    "Mathieu",
    "Maxime",
    "Nicolas",
    "Olivier",
    "Pierre",
    "Romain",
    "Théo",
    "Vincent",
];

/// French first names given to women.
const FEMALE_FIRST_NAMES: [&str; 20] = [
    "Amélie",
    "Anaïs",
    "Camille",
    "Céline",
    "Chloé",
    "Claire",
    "Élodie",
    "Émilie",
    "Hélène",
    "Inès",
    "Juliette",
    "Léa",
    "Lucie",
    "Manon",
    "Marine",
    "Mathilde",
    "Nathalie",
    "Pauline",
    "Sophie",
    "Zoé",
];

/// Number of bio templates.
const BIO_TEMPLATE_COUNT: usize = 10;

/// Synthesizes the full profile for one user.
///
/// # Errors
///
/// Returns [`GenerationError::BirthdateOutOfRange`] when the configured age
/// cannot be represented as a calendar date.
pub fn synthesize_profile<R: Rng + ?Sized>(
    rng: &mut R,
    id: UserId,
    config: &GenerationConfig,
    now: DateTime<Utc>,
) -> Result<UserProfile, GenerationError> {
    let gender = *Gender::ALL.choose(rng).unwrap_or(&Gender::NonBinary);
    let sex_preference = *SexPreference::ALL
        .choose(rng)
        .unwrap_or(&SexPreference::Bisexual);
    let first_name = synthesize_first_name(rng, gender);
    let last_name: String = LastName(FR_FR).fake_with_rng(rng);
    let username = synthesize_username(rng, &first_name, &last_name);
    let provider: String = FreeEmailProvider(FR_FR).fake_with_rng(rng);
    let email = format!("{username}@{provider}");
    let location = synthesize_location(rng);
    let birthdate = synthesize_birthdate(rng, config.age_years, now.date_naive())?;
    let bio = synthesize_bio(rng);
    let popularity = rng.random_range(0..=POPULARITY_MAX);
    let is_verified = rng.random_ratio(config.verified_percent, 100);
    let status = *PresenceStatus::ALL
        .choose(rng)
        .unwrap_or(&PresenceStatus::Offline);
    let last_seen = now - TimeDelta::hours(rng.random_range(0..=LAST_SEEN_MAX_HOURS));

    Ok(UserProfile {
        id,
        first_name,
        last_name,
        username,
        email,
        gender,
        sex_preference,
        bio,
        birthdate,
        popularity,
        is_verified,
        status,
        last_seen,
        location,
    })
}

/// Picks a French first name matching `gender`.
pub fn synthesize_first_name<R: Rng + ?Sized>(rng: &mut R, gender: Gender) -> String {
    let names: &[&str] = match gender {
        Gender::Male => &MALE_FIRST_NAMES,
        Gender::Female => &FEMALE_FIRST_NAMES,
        Gender::NonBinary => return FirstName(FR_FR).fake_with_rng(rng),
    };
    names
        .choose(rng)
        .map_or_else(|| FirstName(FR_FR).fake_with_rng(rng), |name| (*name).to_owned())
}

/// Builds a username from name prefixes and a numeric suffix.
fn synthesize_username<R: Rng + ?Sized>(rng: &mut R, first_name: &str, last_name: &str) -> String {
    let suffix = rng.random_range(1..=USERNAME_SUFFIX_MAX);
    let candidate = format!(
        "{}{}{suffix}",
        username_fragment(first_name, USERNAME_NAME_PREFIX),
        username_fragment(last_name, USERNAME_NAME_PREFIX),
    );
    truncate_chars(&candidate, USERNAME_MAX_CHARS)
}

/// Picks a gazetteer city and jitters its centre on both axes.
pub fn synthesize_location<R: Rng + ?Sized>(rng: &mut R) -> Location {
    let centre = GAZETTEER.choose(rng).copied().unwrap_or(GAZETTEER[0]);
    let bound = COORDINATE_JITTER.get();
    let latitude = centre.latitude.get() + rng.random_range(-bound..=bound);
    let longitude = centre.longitude.get() + rng.random_range(-bound..=bound);
    Location {
        city: centre.name.to_owned(),
        latitude: MicroDegrees::new(latitude),
        longitude: MicroDegrees::new(longitude),
    }
}

/// Draws a birthdate whose age on `today` lies inside `age_years`.
///
/// The date is `today` minus the drawn number of calendar years, minus up to
/// 364 extra days, so the whole-year age equals the drawn age exactly.
///
/// # Errors
///
/// Returns [`GenerationError::BirthdateOutOfRange`] when the subtraction
/// leaves chrono's supported date range.
pub fn synthesize_birthdate<R: Rng + ?Sized>(
    rng: &mut R,
    age_years: CountRange,
    today: NaiveDate,
) -> Result<NaiveDate, GenerationError> {
    let age = age_years.sample(rng);
    let jitter = rng.random_range(0..=BIRTHDAY_JITTER_MAX_DAYS);
    u32::try_from(age)
        .ok()
        .and_then(|years| years.checked_mul(12))
        .and_then(|months| today.checked_sub_months(Months::new(months)))
        .and_then(|anniversary| anniversary.checked_sub_days(Days::new(jitter)))
        .ok_or(GenerationError::BirthdateOutOfRange { years: age })
}

/// Whole years elapsed between `birthdate` and `today`.
#[must_use]
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let years = today.year() - birthdate.year();
    let had_birthday = (today.month(), today.day()) >= (birthdate.month(), birthdate.day());
    let whole = if had_birthday { years } else { years - 1 };
    u32::try_from(whole).unwrap_or(0)
}

/// Selects a bio template, fills it, and caps it at the stored length.
pub fn synthesize_bio<R: Rng + ?Sized>(rng: &mut R) -> String {
    let template = rng.random_range(0..BIO_TEMPLATE_COUNT);
    let raw = match template {
        0 => format!(
            "Passionné(e) de {} et de {}. 🌟",
            filler(rng),
            filler(rng)
        ),
        1 => "J'adore voyager et découvrir de nouvelles cultures. ✈️".to_owned(),
        2 => format!("Amateur de bonne bouffe et de {}. 🍷", filler(rng)),
        3 => CatchPhrase(FR_FR).fake_with_rng(rng),
        4 => "La vie est belle quand on la partage. 💕".to_owned(),
        5 => "Développeur le jour, gamer la nuit. 🎮".to_owned(),
        6 => format!("Yoga, méditation et {}. 🧘", filler(rng)),
        7 => "En quête d'aventures et de belles rencontres.".to_owned(),
        8 => format!("Fan de {}, {} et {}.", filler(rng), filler(rng), filler(rng)),
        _ => "Ici pour faire de belles rencontres! 😊".to_owned(),
    };
    finalize_bio(&raw)
}

/// Caps a rendered bio at [`BIO_MAX_CHARS`] without splitting characters.
#[must_use]
pub fn finalize_bio(raw: &str) -> String {
    truncate_chars(raw, BIO_MAX_CHARS)
}

fn filler<R: Rng + ?Sized>(rng: &mut R) -> String {
    Word(FR_FR).fake_with_rng(rng)
}

/// Creates placeholder photos for one user; the first is the profile picture.
pub fn synthesize_photos<R: Rng + ?Sized>(
    rng: &mut R,
    user_id: UserId,
    per_user: CountRange,
) -> Vec<Photo> {
    let seed_prefix: String = user_id.to_string().chars().take(8).collect();
    (0..per_user.sample(rng))
        .map(|index| Photo {
            user_id,
            url: format!("https://picsum.photos/seed/{seed_prefix}{index}/400/500"),
            is_profile_picture: index == 0,
        })
        .collect()
}
