use super::*;

/// Tests ending the round a timer was started for.
///
/// Expected: the round is ended and returned
#[tokio::test]
async fn ends_matching_round() {
    let tracker = RoundTracker::new();
    let round = tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;

    assert_eq!(tracker.end_round_if(channel(), round.id).await, Some(round));
    assert_eq!(tracker.state(channel()).await, RoundState::Idle);
}

/// Tests that a stale timer does not end a newer round.
///
/// Expected: None, newer round still active
#[tokio::test]
async fn ignores_replaced_round() {
    let tracker = RoundTracker::new();
    let old = tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;
    let new = tracker
        .start_round(channel(), &RoundContent::fixture("Memento", None))
        .await;

    assert!(tracker.end_round_if(channel(), old.id).await.is_none());
    assert_eq!(tracker.get_active_round(channel()).await, Some(new));
}
