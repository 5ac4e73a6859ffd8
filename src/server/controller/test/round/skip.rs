use super::*;

/// Tests skipping an active round.
///
/// Expected: answer revealed, channel idle
#[tokio::test]
async fn skip_reveals_answer() {
    let harness = Harness::new(None);
    harness.start_with("Inception", Some(2010)).await;

    harness.send("!wtm skip").await;

    assert_eq!(harness.state().await, RoundState::Idle);
    assert_eq!(
        harness.chat.texts(),
        vec!["Shot skipped. It was **Inception** (2010).".to_string()]
    );
}

/// Tests skipping with no round.
///
/// Expected: a short notice pointing at the start command
#[tokio::test]
async fn skip_without_round_posts_notice() {
    let harness = Harness::new(None);

    harness.send("!wtm skip").await;

    let texts = harness.chat.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("no shot to skip"));
    assert!(texts[0].contains("!wtm start"));
}

/// Tests skipping while the shot is still loading.
///
/// Expected: the start is cancelled and reported as such, the late shot is discarded
#[tokio::test]
async fn skip_while_loading_cancels_start() {
    let harness = Harness::new(None);
    let gate = harness
        .fetcher
        .push_gated(Ok(RoundContent::fixture("Inception", None)));

    let start = harness.controller.route(message("!wtm start")).await.unwrap();
    harness.fetcher.wait_for_fetches(1).await;

    harness.send("!wtm skip").await;
    gate.notify_one();
    start.await.unwrap();

    assert_eq!(harness.state().await, RoundState::Idle);
    assert_eq!(harness.chat.images(), 0);
    assert_eq!(harness.chat.texts(), vec![START_CANCELLED.to_string()]);
}
