use super::*;

/// Tests the guess-then-end scenario.
///
/// Round with answer "inception"; guess "Inception" matches and ends the round; a
/// following "inception" finds no active round.
///
/// Expected: Some on the first guess, None on the second
#[tokio::test]
async fn correct_guess_ends_round() {
    let tracker = RoundTracker::new();
    tracker
        .start_round(channel(), &RoundContent::fixture("inception", None))
        .await;

    let guessed = tracker
        .take_if_matches(channel(), "Inception", MatchPolicy::Exact)
        .await;
    assert!(guessed.is_some());

    let again = tracker
        .take_if_matches(channel(), "inception", MatchPolicy::Exact)
        .await;
    assert!(again.is_none());
    assert!(!tracker.check_guess(channel(), "inception", MatchPolicy::Exact).await);
}

/// Tests that a wrong guess leaves the round alone.
///
/// Expected: None, round still active
#[tokio::test]
async fn wrong_guess_keeps_round() {
    let tracker = RoundTracker::new();
    tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;

    let result = tracker
        .take_if_matches(channel(), "Interstellar", MatchPolicy::Exact)
        .await;

    assert!(result.is_none());
    assert_eq!(tracker.state(channel()).await, RoundState::RoundActive);
}

/// Tests fuzzy matching through the tracker.
///
/// Expected: a one-letter typo ends the round under a fuzzy policy
#[tokio::test]
async fn fuzzy_policy_accepts_typo() {
    let tracker = RoundTracker::new();
    tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;

    let result = tracker
        .take_if_matches(channel(), "Inceptoin", MatchPolicy::Fuzzy { threshold: 0.7 })
        .await;

    assert!(result.is_some());
}
