use super::*;

/// Tests ending an active round.
///
/// Expected: the ended round is returned and the channel is idle
#[tokio::test]
async fn ends_active_round() {
    let tracker = RoundTracker::new();
    let round = tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;

    assert_eq!(tracker.end_round(channel()).await, Some(round));
    assert_eq!(tracker.state(channel()).await, RoundState::Idle);
    assert!(tracker.get_active_round(channel()).await.is_none());
}

/// Tests that ending twice in a row is safe.
///
/// Expected: second call returns None and changes nothing
#[tokio::test]
async fn ending_twice_is_a_no_op() {
    let tracker = RoundTracker::new();
    tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;

    assert!(tracker.end_round(channel()).await.is_some());
    assert!(tracker.end_round(channel()).await.is_none());
    assert_eq!(tracker.state(channel()).await, RoundState::Idle);
}

/// Tests ending a channel that never had a round.
///
/// Expected: None
#[tokio::test]
async fn ending_idle_channel_is_a_no_op() {
    let tracker = RoundTracker::new();

    assert!(tracker.end_round(channel()).await.is_none());
}

/// Tests that ending a loading channel cancels the pending start.
///
/// Expected: the late content is discarded
#[tokio::test]
async fn ending_cancels_loading_start() {
    let tracker = RoundTracker::new();
    let (ticket, _) = tracker.reserve(channel()).await;

    assert!(tracker.end_round(channel()).await.is_none());

    let late = tracker
        .start_reserved(ticket, &RoundContent::fixture("Inception", None))
        .await;
    assert!(late.is_none());
    assert_eq!(tracker.state(channel()).await, RoundState::Idle);
}

/// Tests what `end_channel` reports for each state.
///
/// Expected: the active round, a pending start, then nothing
#[tokio::test]
async fn end_channel_reports_what_ended() {
    let tracker = RoundTracker::new();
    let round = tracker
        .start_round(channel(), &RoundContent::fixture("Inception", None))
        .await;
    assert_eq!(
        tracker.end_channel(channel()).await,
        EndedRound::Active(round)
    );

    tracker.reserve(channel()).await;
    assert_eq!(tracker.end_channel(channel()).await, EndedRound::PendingStart);

    assert_eq!(tracker.end_channel(channel()).await, EndedRound::Nothing);
    assert_eq!(tracker.state(channel()).await, RoundState::Idle);
}
