//! Quality gate applied to review content before it is stored.
//!
//! The verifier is a pure predicate. Services depend on the
//! [`ReviewVerifier`] trait so tests can substitute a mock.

use std::collections::HashMap;

/// Words that disqualify a review outright.
const BANNED_WORDS: &[&str] = &[
    "shit", "crap", "damn", "idiot", "stupid", "sucks", "trash", "garbage", "spam",
];

/// Placeholder phrases that indicate filler rather than a genuine review.
const BOILERPLATE_PHRASES: &[&str] = &[
    "lorem ipsum",
    "dolor sit amet",
    "insert review here",
    "test test",
    "asdf",
];

/// Minimum number of words a review must contain.
pub const MIN_WORD_COUNT: usize = 10;

/// Predicate deciding whether review content is fit to publish.
#[cfg_attr(test, mockall::automock)]
pub trait ReviewVerifier: Send + Sync {
    /// Return `true` when `review` meets the quality bar.
    fn does_meet_quality_standards(&self, review: &str) -> bool;
}

/// Keyword and heuristic based verifier.
///
/// A review fails when it contains a banned word or boilerplate phrase, is
/// shorter than [`MIN_WORD_COUNT`] words, or repeats one word for more than
/// half of its length.
///
/// # Examples
/// ```
/// use book_reviews::domain::{KeywordReviewVerifier, ReviewVerifier};
///
/// let verifier = KeywordReviewVerifier;
/// assert!(verifier.does_meet_quality_standards(
///     "I really recommend this book to whoever is interested in advancing their carrier",
/// ));
/// assert!(!verifier.does_meet_quality_standards("lorem ipsum this is a good book"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordReviewVerifier;

impl ReviewVerifier for KeywordReviewVerifier {
    fn does_meet_quality_standards(&self, review: &str) -> bool {
        let lowered = review.to_lowercase();
        if BOILERPLATE_PHRASES
            .iter()
            .any(|phrase| lowered.contains(phrase))
        {
            return false;
        }

        let words = normalised_words(&lowered);
        if words.iter().any(|word| BANNED_WORDS.contains(word)) {
            return false;
        }
        if words.len() < MIN_WORD_COUNT {
            return false;
        }
        !is_repetitive(&words)
    }
}

fn normalised_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|ch: char| !ch.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .collect()
}

fn is_repetitive(words: &[&str]) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words {
        *counts.entry(word).or_default() += 1;
    }
    counts
        .values()
        .max()
        .is_some_and(|most| most * 2 > words.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
    use rstest::{fixture, rstest};

    const BAD_REVIEWS: &[&str] = &[
        "This book is shit",
        "lorem ipsum this is a good book",
        "Lorem Ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor",
        "A complete waste of paper, the plot is garbage and the characters are flat too",
        "asdf asdf asdf",
        "Too short to say anything",
        "good good good good good good good good book overall really",
    ];

    #[fixture]
    fn verifier() -> KeywordReviewVerifier {
        KeywordReviewVerifier
    }

    #[rstest]
    #[case("I really recommend this book to whoever is interested in advancing their carrier")]
    #[case(
        "The chapters on concurrency are clear and the exercises at the end of each one \
         helped me practise what I had just read."
    )]
    fn accepts_substantive_reviews(verifier: KeywordReviewVerifier, #[case] review: &str) {
        assert!(verifier.does_meet_quality_standards(review));
    }

    #[rstest]
    #[case::banned_word("This book is shit")]
    #[case::banned_word_with_punctuation(
        "Honestly the editing was careless and the whole thing is CRAP! Avoid it please."
    )]
    #[case::lorem_ipsum("lorem ipsum this is a good book")]
    #[case::placeholder("insert review here and then add some more words to pass length")]
    #[case::too_short("Nice book, would read again")]
    #[case::repetitive("great great great great great great book with nice cover")]
    #[case::empty("")]
    fn rejects_low_quality_reviews(verifier: KeywordReviewVerifier, #[case] review: &str) {
        assert!(!verifier.does_meet_quality_standards(review));
    }

    #[rstest]
    fn rejects_randomly_chosen_bad_reviews(verifier: KeywordReviewVerifier) {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..5 {
            let review = BAD_REVIEWS.choose(&mut rng).expect("non-empty list");
            assert!(
                !verifier.does_meet_quality_standards(review),
                "expected rejection for {review:?}"
            );
        }
    }

    #[rstest]
    fn banned_words_match_whole_words_only(verifier: KeywordReviewVerifier) {
        // "scrap" contains "crap" but is a legitimate word.
        assert!(verifier.does_meet_quality_standards(
            "I keep a scrap of paper with notes from every chapter because the advice is useful"
        ));
    }
}
