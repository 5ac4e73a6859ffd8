use super::*;

/// Tests a round nobody guesses.
///
/// Expected: answer revealed after the timeout, channel idle
#[tokio::test(start_paused = true)]
async fn reveals_answer_after_timeout() {
    let harness = Harness::new(Some(TIMEOUT));
    harness.start_with("Inception", Some(2010)).await;

    tokio::time::sleep(TIMEOUT - Duration::from_secs(1)).await;
    assert_eq!(harness.state().await, RoundState::RoundActive);

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(harness.state().await, RoundState::Idle);
    assert_eq!(
        harness.chat.texts(),
        vec!["Time's up! ⌛ The movie was **Inception** (2010).".to_string()]
    );
}

/// Tests that a timer only ends the round it was started for.
///
/// Expected: the replacement round survives the first timer and times out on its own
#[tokio::test(start_paused = true)]
async fn timer_ignores_replacement_round() {
    let harness = Harness::new(Some(TIMEOUT));
    harness.start_with("Inception", Some(2010)).await;

    tokio::time::sleep(Duration::from_secs(20)).await;
    harness.start_with("Memento", None).await;

    tokio::time::sleep(Duration::from_secs(15)).await;
    assert_eq!(harness.state().await, RoundState::RoundActive);

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(harness.state().await, RoundState::Idle);
    assert_eq!(
        harness.chat.texts(),
        vec![
            "Shot skipped. It was **Inception** (2010).".to_string(),
            "Time's up! ⌛ The movie was **Memento**.".to_string(),
        ]
    );
}

/// Tests a correct guess before the timeout.
///
/// Expected: no timeout message afterwards
#[tokio::test(start_paused = true)]
async fn guessed_round_does_not_time_out() {
    let harness = Harness::new(Some(TIMEOUT));
    harness.start_with("Inception", None).await;

    harness.send("inception").await;
    tokio::time::sleep(TIMEOUT * 2).await;

    let texts = harness.chat.texts();
    assert_eq!(texts.len(), 1);
    assert!(!texts[0].starts_with("Time's up"));
}

/// Tests a disabled timeout.
///
/// Expected: the round stays active indefinitely
#[tokio::test(start_paused = true)]
async fn disabled_timeout_keeps_round() {
    let harness = Harness::new(None);
    harness.start_with("Inception", None).await;

    tokio::time::sleep(Duration::from_secs(3600)).await;

    assert_eq!(harness.state().await, RoundState::RoundActive);
}
