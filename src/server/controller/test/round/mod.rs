use serenity::all::{ChannelId, MessageId, UserId};
use serenity::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::server::{
    bot::chat::ChatAdapter,
    controller::round::{RoundController, START_CANCELLED},
    data::round::RoundTracker,
    error::{fetch::FetchError, platform::PlatformError},
    model::{
        answer::MatchPolicy,
        command::MessageKind,
        difficulty::Difficulty,
        message::IncomingMessage,
        round::RoundState,
        shot::{RoundContent, ShotImage},
    },
    service::wtm::ShotFetcher,
    state::{AppState, RoundSettings},
};

mod help;
mod skip;
mod start;
mod stop;
mod timeout;

const BOT_ID: u64 = 4242;
const PREFIX: &str = "!wtm";
const TIMEOUT: Duration = Duration::from_secs(30);

fn channel() -> ChannelId {
    ChannelId::new(100)
}

/// One scripted fetch result, optionally held back until its gate is notified.
struct FakeFetch {
    gate: Option<Arc<Notify>>,
    result: Result<RoundContent, FetchError>,
}

/// Fetcher returning scripted results in order.
///
/// Returns `NoUsableShot` once the script runs out.
#[derive(Default)]
struct FakeFetcher {
    script: Mutex<VecDeque<FakeFetch>>,
    requested: Mutex<Vec<Difficulty>>,
}

impl FakeFetcher {
    fn push(&self, result: Result<RoundContent, FetchError>) {
        self.script
            .lock()
            .unwrap()
            .push_back(FakeFetch { gate: None, result });
    }

    /// Scripts a result that is only returned after the returned gate is notified.
    fn push_gated(&self, result: Result<RoundContent, FetchError>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script.lock().unwrap().push_back(FakeFetch {
            gate: Some(gate.clone()),
            result,
        });
        gate
    }

    fn requested(&self) -> Vec<Difficulty> {
        self.requested.lock().unwrap().clone()
    }

    /// Yields until at least `count` fetches have begun.
    async fn wait_for_fetches(&self, count: usize) {
        while self.requested.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ShotFetcher for FakeFetcher {
    async fn fetch_random_shot(&self, difficulty: Difficulty) -> Result<RoundContent, FetchError> {
        self.requested.lock().unwrap().push(difficulty);
        let next = self.script.lock().unwrap().pop_front();

        let Some(fetch) = next else {
            return Err(FetchError::NoUsableShot { attempts: 0 });
        };
        if let Some(gate) = fetch.gate {
            gate.notified().await;
        }
        fetch.result
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Post {
    Image {
        channel: ChannelId,
        filename: String,
        caption: String,
    },
    Text {
        channel: ChannelId,
        text: String,
    },
    Reaction {
        channel: ChannelId,
        message: MessageId,
        emoji: String,
    },
}

/// Chat adapter recording everything posted.
///
/// With `fail` set every call is rejected and nothing is recorded. Image posts can be held
/// back with `hold_images`.
#[derive(Default)]
struct RecordingChat {
    posts: Mutex<Vec<Post>>,
    fail: AtomicBool,
    image_gate: Mutex<Option<Arc<Notify>>>,
    image_attempts: AtomicUsize,
}

impl RecordingChat {
    fn record(&self, post: Post) -> Result<(), PlatformError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformError::Rejected("missing permissions".to_string()));
        }
        self.posts.lock().unwrap().push(post);
        Ok(())
    }

    /// Makes the next image posts wait until the returned gate is notified.
    fn hold_images(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.image_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Yields until at least `count` image posts have begun.
    async fn wait_for_image_posts(&self, count: usize) {
        while self.image_attempts.load(Ordering::SeqCst) < count {
            tokio::task::yield_now().await;
        }
    }

    fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    fn texts(&self) -> Vec<String> {
        self.posts()
            .into_iter()
            .filter_map(|post| match post {
                Post::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn images(&self) -> usize {
        self.posts()
            .iter()
            .filter(|post| matches!(post, Post::Image { .. }))
            .count()
    }
}

#[async_trait]
impl ChatAdapter for RecordingChat {
    async fn post_image(
        &self,
        channel_id: ChannelId,
        image: &ShotImage,
        caption: &str,
    ) -> Result<(), PlatformError> {
        self.image_attempts.fetch_add(1, Ordering::SeqCst);
        let gate = self.image_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.record(Post::Image {
            channel: channel_id,
            filename: image.filename.clone(),
            caption: caption.to_string(),
        })
    }

    async fn post_text(&self, channel_id: ChannelId, text: &str) -> Result<(), PlatformError> {
        self.record(Post::Text {
            channel: channel_id,
            text: text.to_string(),
        })
    }

    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), PlatformError> {
        self.record(Post::Reaction {
            channel: channel_id,
            message: message_id,
            emoji: emoji.to_string(),
        })
    }
}

/// Controller wired to fakes, with handles on every dependency.
struct Harness {
    controller: RoundController,
    tracker: RoundTracker,
    fetcher: Arc<FakeFetcher>,
    chat: Arc<RecordingChat>,
}

impl Harness {
    fn new(guess_timeout: Option<Duration>) -> Self {
        let tracker = RoundTracker::new();
        let fetcher = Arc::new(FakeFetcher::default());
        let chat = Arc::new(RecordingChat::default());

        let state = AppState::new(
            tracker.clone(),
            fetcher.clone(),
            chat.clone(),
            RoundSettings {
                default_difficulty: Difficulty::Easy,
                guess_timeout,
                match_policy: MatchPolicy::Exact,
                command_prefix: PREFIX.to_string(),
            },
        );

        Self {
            controller: RoundController::new(state),
            tracker,
            fetcher,
            chat,
        }
    }

    /// Routes a message and waits for any start it triggered to finish.
    async fn send(&self, content: &str) {
        if let Some(start) = self.controller.route(message(content)).await {
            start.await.unwrap();
        }
    }

    /// Starts a round for `title` and waits until it is posted.
    async fn start_with(&self, title: &str, year: Option<i32>) {
        self.fetcher.push(Ok(RoundContent::fixture(title, year)));
        self.send("!wtm start").await;
    }

    async fn state(&self) -> RoundState {
        self.tracker.state(channel()).await
    }
}

/// Message from the default user in the default channel, classified like the bot does.
fn message(content: &str) -> IncomingMessage {
    IncomingMessage {
        channel_id: channel(),
        message_id: MessageId::new(555),
        author_id: UserId::new(7),
        author_name: "alice".to_string(),
        content: content.to_string(),
        kind: MessageKind::classify(content, PREFIX, Some(BOT_ID)),
    }
}
