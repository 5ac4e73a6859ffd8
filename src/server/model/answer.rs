//! Accepted answers and guess matching.
//!
//! Answers and guesses go through the same normalization (whitespace trimmed and
//! collapsed, lowercased) so that `" The  Matrix "` and `"the matrix"` compare equal.

/// Normalizes an answer or a guess for comparison.
///
/// Trims surrounding whitespace, collapses inner whitespace runs to a single space and
/// lowercases the result.
///
/// # Arguments
/// - `text` - Raw answer or guess text
///
/// # Returns
/// - `String` - Normalized text, empty if `text` only contained whitespace
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// How a guess is compared against the accepted answers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MatchPolicy {
    /// The normalized guess must equal one of the normalized answers.
    #[default]
    Exact,
    /// Exact matches, plus guesses whose normalized Levenshtein similarity to an accepted
    /// answer reaches `threshold` (between 0 and 1).
    Fuzzy { threshold: f64 },
}

/// Non-empty, ordered set of accepted answers for a round.
///
/// Keeps the title as it should be revealed alongside the normalized variants that are
/// accepted as guesses. Variants are de-duplicated and keep insertion order: the title
/// first, then alternative titles.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSet {
    /// Title shown when the answer is revealed.
    title: String,
    /// Normalized accepted answers, never empty.
    accepted: Vec<String>,
}

impl AnswerSet {
    /// Builds the answer set for a title and its alternative titles.
    ///
    /// Every candidate contributes its normalized form and, when it contains `:`, the
    /// normalized form of each non-empty colon-separated segment, so "Alien: Resurrection"
    /// also accepts "alien" and "resurrection".
    ///
    /// # Arguments
    /// - `title` - Main title; used for reveals unless blank
    /// - `alternatives` - Other accepted titles (translations, alternate names)
    ///
    /// # Returns
    /// - `Some(AnswerSet)` - At least one non-blank answer
    /// - `None` - Every candidate was blank
    pub fn new<S: AsRef<str>>(title: &str, alternatives: &[S]) -> Option<Self> {
        let candidates: Vec<&str> = std::iter::once(title)
            .chain(alternatives.iter().map(|a| a.as_ref()))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();

        let display = candidates.first()?.to_string();

        let mut accepted: Vec<String> = Vec::new();
        for candidate in &candidates {
            let whole = normalize(candidate);
            let segments = candidate
                .split(':')
                .map(normalize)
                .filter(|_| candidate.contains(':'));

            for variant in std::iter::once(whole).chain(segments) {
                if !variant.is_empty() && !accepted.contains(&variant) {
                    accepted.push(variant);
                }
            }
        }

        Some(Self {
            title: display,
            accepted,
        })
    }

    /// Title to show when revealing the answer.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalized accepted answers in insertion order.
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    /// Checks a guess against the accepted answers.
    ///
    /// # Arguments
    /// - `guess` - Raw guess text as typed in chat
    /// - `policy` - Exact or fuzzy comparison
    ///
    /// # Returns
    /// - `true` - The guess is accepted
    /// - `false` - No accepted answer matches, or the guess is blank
    pub fn matches(&self, guess: &str, policy: MatchPolicy) -> bool {
        let guess = normalize(guess);
        if guess.is_empty() {
            return false;
        }

        if self.accepted.contains(&guess) {
            return true;
        }

        match policy {
            MatchPolicy::Exact => false,
            MatchPolicy::Fuzzy { threshold } => self
                .accepted
                .iter()
                .any(|answer| strsim::normalized_levenshtein(answer, &guess) >= threshold),
        }
    }
}
