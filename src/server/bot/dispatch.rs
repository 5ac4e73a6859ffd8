//! In-order delivery of messages per channel.
//!
//! Serenity runs every gateway event in its own task, so two messages from the same
//! channel may be handled concurrently and finish in any order. The dispatcher gives each
//! channel a worker task fed through an unbounded queue: a channel's messages are handled
//! one after another, while different channels proceed independently. A worker whose
//! queue stays empty for `WORKER_IDLE_TIMEOUT` removes itself; the next message for its
//! channel starts a new one.

use serenity::all::ChannelId;
use serenity::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

use crate::server::model::message::IncomingMessage;

/// How long a worker waits for its next message before exiting.
pub const WORKER_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

type Workers = Arc<Mutex<HashMap<ChannelId, mpsc::UnboundedSender<IncomingMessage>>>>;

/// Receiver of classified chat messages.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn on_message(&self, message: IncomingMessage);
}

pub struct ChannelDispatcher {
    handler: Arc<dyn MessageHandler>,
    workers: Workers,
}

impl ChannelDispatcher {
    pub fn new(handler: Arc<dyn MessageHandler>) -> Self {
        Self {
            handler,
            workers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Queues a message for its channel's worker, starting the worker if there is none.
    ///
    /// Returns once the message is queued, not once it is handled.
    pub async fn dispatch(&self, message: IncomingMessage) {
        let channel_id = message.channel_id;
        let mut workers = self.workers.lock().await;

        let sender = workers
            .entry(channel_id)
            .or_insert_with(|| self.spawn_worker(channel_id));

        if let Err(mpsc::error::SendError(message)) = sender.send(message) {
            // worker ended, e.g. after a panic in the handler
            tracing::warn!("Restarting message worker for channel {}", channel_id);
            let sender = self.spawn_worker(channel_id);
            if sender.send(message).is_err() {
                tracing::error!("Dropped message for channel {}", channel_id);
            }
            workers.insert(channel_id, sender);
        }
    }

    /// Number of channels with a running worker.
    #[cfg(test)]
    pub async fn worker_count(&self) -> usize {
        self.workers.lock().await.len()
    }

    fn spawn_worker(&self, channel_id: ChannelId) -> mpsc::UnboundedSender<IncomingMessage> {
        let (sender, receiver) = mpsc::unbounded_channel::<IncomingMessage>();

        tokio::spawn(run_worker(
            channel_id,
            receiver,
            sender.clone(),
            self.handler.clone(),
            self.workers.clone(),
        ));

        sender
    }
}

async fn run_worker(
    channel_id: ChannelId,
    mut receiver: mpsc::UnboundedReceiver<IncomingMessage>,
    own_sender: mpsc::UnboundedSender<IncomingMessage>,
    handler: Arc<dyn MessageHandler>,
    workers: Workers,
) {
    tracing::debug!("Message worker started for channel {}", channel_id);

    loop {
        let message = match tokio::time::timeout(WORKER_IDLE_TIMEOUT, receiver.recv()).await {
            Ok(Some(message)) => message,
            Ok(None) => break,
            Err(_) => {
                // messages are only queued while the map is locked
                let mut workers = workers.lock().await;
                match receiver.try_recv() {
                    Ok(message) => message,
                    Err(_) => {
                        if workers
                            .get(&channel_id)
                            .is_some_and(|sender| sender.same_channel(&own_sender))
                        {
                            workers.remove(&channel_id);
                        }
                        break;
                    }
                }
            }
        };

        handler.on_message(message).await;
    }

    tracing::debug!("Message worker stopped for channel {}", channel_id);
}
