use super::*;

/// Tests a successful start.
///
/// Expected: still posted with the caption, round active, default difficulty requested
#[tokio::test]
async fn posts_still_and_activates_round() {
    let harness = Harness::new(None);

    harness.start_with("Inception", Some(2010)).await;

    assert_eq!(harness.state().await, RoundState::RoundActive);
    assert_eq!(harness.fetcher.requested(), vec![Difficulty::Easy]);
    match harness.chat.posts().as_slice() {
        [Post::Image {
            channel: posted_to,
            filename,
            caption,
        }] => {
            assert_eq!(*posted_to, channel());
            assert_eq!(filename, "12345.jpg");
            assert!(!caption.is_empty());
        }
        other => panic!("expected a single image post, got {other:?}"),
    }
}

/// Tests starting through a mention with a difficulty.
///
/// Expected: requested difficulty passed to the fetcher
#[tokio::test]
async fn passes_requested_difficulty() {
    let harness = Harness::new(None);
    harness.fetcher.push(Ok(RoundContent::fixture("Inception", None)));

    harness.send("<@4242> start hard").await;

    assert_eq!(harness.fetcher.requested(), vec![Difficulty::Hard]);
}

/// Tests a start whose fetch fails on changed markup.
///
/// Expected: an error notice, no still, channel idle
#[tokio::test]
async fn fetch_failure_posts_notice_and_stays_idle() {
    let harness = Harness::new(None);
    harness.fetcher.push(Err(FetchError::missing("still image (img#still_shot)")));

    harness.send("!wtm start").await;

    assert_eq!(harness.state().await, RoundState::Idle);
    assert_eq!(harness.chat.images(), 0);
    let texts = harness.chat.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("can't read"));
}

/// Tests starting while a round is active.
///
/// Expected: old answer revealed, new round active
#[tokio::test]
async fn restart_reveals_previous_answer() {
    let harness = Harness::new(None);
    harness.start_with("Inception", Some(2010)).await;

    harness.start_with("Memento", None).await;

    assert_eq!(
        harness.chat.texts(),
        vec!["Shot skipped. It was **Inception** (2010).".to_string()]
    );
    assert_eq!(harness.chat.images(), 2);
    let active = harness.tracker.get_active_round(channel()).await.unwrap();
    assert_eq!(active.answers.title(), "Memento");
}

/// Tests a stop while the shot is still loading.
///
/// Expected: the late shot is discarded, nothing posted, channel idle
#[tokio::test]
async fn stop_while_loading_discards_shot() {
    let harness = Harness::new(None);
    let gate = harness
        .fetcher
        .push_gated(Ok(RoundContent::fixture("Inception", None)));

    let start = harness.controller.route(message("!wtm start")).await.unwrap();
    assert_eq!(harness.state().await, RoundState::Loading);

    harness.send("!wtm stop").await;
    gate.notify_one();
    start.await.unwrap();

    assert_eq!(harness.state().await, RoundState::Idle);
    assert!(harness.chat.posts().is_empty());
}

/// Tests two starts whose fetches complete out of order.
///
/// Expected: the second start's round stays active; the first shot is never posted
#[tokio::test]
async fn late_fetch_does_not_replace_newer_round() {
    let harness = Harness::new(None);
    let gate = harness
        .fetcher
        .push_gated(Ok(RoundContent::fixture("Inception", None)));
    harness.fetcher.push(Ok(RoundContent::fixture("Memento", None)));

    let first = harness.controller.route(message("!wtm start")).await.unwrap();
    harness.fetcher.wait_for_fetches(1).await;
    harness.send("!wtm start").await;

    gate.notify_one();
    first.await.unwrap();

    let active = harness.tracker.get_active_round(channel()).await.unwrap();
    assert_eq!(active.answers.title(), "Memento");
    assert_eq!(harness.chat.images(), 1);
    assert!(harness.chat.texts().is_empty());
}

/// Tests a still that cannot be posted.
///
/// Expected: the round stays active so the channel can still skip or guess
#[tokio::test]
async fn posting_failure_keeps_round() {
    let harness = Harness::new(None);
    harness.chat.fail.store(true, Ordering::SeqCst);

    harness.start_with("Inception", None).await;

    assert_eq!(harness.state().await, RoundState::RoundActive);
}

/// Tests a correct guess sent while the still is being uploaded.
///
/// Expected: the guess is ignored and the round becomes active once the still is up
#[tokio::test]
async fn guess_before_still_is_posted_is_ignored() {
    let harness = Harness::new(None);
    let upload = harness.chat.hold_images();
    harness
        .fetcher
        .push(Ok(RoundContent::fixture("Inception", None)));

    let start = harness.controller.route(message("!wtm start")).await.unwrap();
    harness.chat.wait_for_image_posts(1).await;

    harness.send("Inception").await;
    assert_eq!(harness.state().await, RoundState::Loading);

    upload.notify_one();
    start.await.unwrap();

    assert_eq!(harness.state().await, RoundState::RoundActive);
    assert_eq!(harness.chat.images(), 1);
    assert!(harness.chat.texts().is_empty());
}
