use super::*;

/// Tests the help command and a bare prefix.
///
/// Expected: usage text listing every command
#[tokio::test]
async fn help_lists_commands() {
    let harness = Harness::new(None);

    harness.send("!wtm help").await;
    harness.send("!wtm").await;

    let texts = harness.chat.texts();
    assert_eq!(texts.len(), 2);
    for command in ["!wtm start", "!wtm skip", "!wtm stop", "!wtm help"] {
        assert!(texts[0].contains(command), "help does not mention {command}");
    }
    assert_eq!(texts[0], texts[1]);
}

/// Tests an unknown command.
///
/// Expected: the error followed by usage text; no round started
#[tokio::test]
async fn unknown_command_posts_usage() {
    let harness = Harness::new(None);

    harness.send("!wtm dance").await;

    let texts = harness.chat.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Unknown command 'dance'."));
    assert!(texts[0].contains("!wtm start"));
    assert_eq!(harness.state().await, RoundState::Idle);
}

/// Tests a start with an unknown difficulty.
///
/// Expected: usage text, nothing fetched
#[tokio::test]
async fn invalid_difficulty_posts_usage() {
    let harness = Harness::new(None);

    harness.send("!wtm start insane").await;

    assert!(harness.fetcher.requested().is_empty());
    let texts = harness.chat.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Unknown difficulty 'insane'."));
}
