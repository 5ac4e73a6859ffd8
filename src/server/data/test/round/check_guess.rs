use super::*;

/// Tests that guesses ignore case and surrounding whitespace.
///
/// Expected: true for " The Matrix " against "The Matrix"
#[tokio::test]
async fn matches_case_and_whitespace_insensitively() {
    let tracker = RoundTracker::new();
    tracker
        .start_round(channel(), &RoundContent::fixture("The Matrix", None))
        .await;

    assert!(
        tracker
            .check_guess(channel(), " The Matrix ", MatchPolicy::Exact)
            .await
    );
}

/// Tests that checking a guess never changes state.
///
/// Expected: round still active after a matching check
#[tokio::test]
async fn check_does_not_end_round() {
    let tracker = RoundTracker::new();
    tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;

    assert!(tracker.check_guess(channel(), "inception", MatchPolicy::Exact).await);
    assert!(!tracker.check_guess(channel(), "memento", MatchPolicy::Exact).await);
    assert_eq!(tracker.state(channel()).await, RoundState::RoundActive);
}

/// Tests guessing in a channel without a round.
///
/// Expected: false, channel stays idle
#[tokio::test]
async fn never_matches_without_round() {
    let tracker = RoundTracker::new();

    assert!(!tracker.check_guess(channel(), "inception", MatchPolicy::Exact).await);
    assert_eq!(tracker.state(channel()).await, RoundState::Idle);
}

/// Tests guessing while a start is still loading.
///
/// Expected: false
#[tokio::test]
async fn never_matches_while_loading() {
    let tracker = RoundTracker::new();
    tracker.reserve(channel()).await;

    assert!(!tracker.check_guess(channel(), "inception", MatchPolicy::Exact).await);
}
