//! Field constraints mirrored from the profile schema.
//!
//! The store caps bios at 255 characters and usernames at 16. Both limits
//! count `char`s, and truncation never splits a multi-byte character.

/// Maximum stored length of a bio, in characters.
pub const BIO_MAX_CHARS: usize = 255;

/// Maximum stored length of a username, in characters.
pub const USERNAME_MAX_CHARS: usize = 16;

/// Truncates `value` to at most `max_chars` characters.
///
/// The cut always lands on a character boundary, so multi-byte characters
/// are either kept whole or dropped whole.
///
/// # Examples
///
/// ```
/// use social_graph::truncate_chars;
///
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("short", 255), "short");
/// ```
#[must_use]
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => value.get(..byte_index).unwrap_or(value).to_owned(),
        None => value.to_owned(),
    }
}

/// Returns `true` when `value` is a valid tag slug.
///
/// Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
/// letters, digits, and hyphens.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Returns `true` when `value` is an acceptable generated username.
///
/// Usernames are 1 to [`USERNAME_MAX_CHARS`] lowercase ASCII alphanumerics.
#[must_use]
pub fn is_valid_username(value: &str) -> bool {
    let length = value.chars().count();
    (1..=USERNAME_MAX_CHARS).contains(&length)
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
}

/// Reduces a name to the lowercase ASCII alphanumerics it contains.
pub(crate) fn username_fragment(name: &str, max_chars: usize) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn truncates_to_exact_cap() {
        let long = "a".repeat(BIO_MAX_CHARS + 40);
        assert_eq!(truncate_chars(&long, BIO_MAX_CHARS).chars().count(), 255);
    }

    #[test]
    fn truncation_keeps_multibyte_characters_whole() {
        let long = "é🌟".repeat(200);
        let truncated = truncate_chars(&long, BIO_MAX_CHARS);

        assert_eq!(truncated.chars().count(), BIO_MAX_CHARS);
        assert!(long.starts_with(&truncated));
        assert!(truncated.ends_with('é'));
    }

    #[test]
    fn short_values_are_untouched() {
        let bio = "Ici pour faire de belles rencontres! 😊";
        assert_eq!(truncate_chars(bio, BIO_MAX_CHARS), bio);
    }

    #[rstest]
    #[case("vegan", true)]
    #[case("rock-climbing", true)]
    #[case("web3", true)]
    #[case("", false)]
    #[case(" geek", false)]
    #[case("Music", false)]
    #[case("café", false)]
    fn slug_validation(#[case] slug: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(slug), expected);
    }

    #[rstest]
    #[case("adalov1234", true)]
    #[case("a", true)]
    #[case("", false)]
    #[case("ada lov", false)]
    #[case("abcdefghijklmnopq", false)]
    fn username_validation(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_username(name), expected);
    }

    #[test]
    fn username_fragment_drops_accents_and_punctuation() {
        assert_eq!(username_fragment("Éloïse", 3), "los");
        assert_eq!(username_fragment("O'Brien", 3), "obr");
    }
}
