use super::*;

/// Tests stopping an active round.
///
/// Expected: nothing posted, channel idle, guesses ignored afterwards
#[tokio::test]
async fn stop_ends_round_silently() {
    let harness = Harness::new(None);
    harness.start_with("Inception", None).await;

    harness.send("!wtm stop").await;
    harness.send("Inception").await;

    assert_eq!(harness.state().await, RoundState::Idle);
    assert_eq!(harness.chat.posts().len(), 1);
}

/// Tests stopping with no round.
///
/// Expected: nothing posted
#[tokio::test]
async fn stop_without_round_is_silent() {
    let harness = Harness::new(None);

    harness.send("!wtm stop").await;

    assert!(harness.chat.posts().is_empty());
}
