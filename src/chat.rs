//! Scripted mentor chat.
//!
//! Each user message schedules one deferred reply. Replies come from a
//! [`ResponseProvider`]; the default one picks a canned sentence at random and
//! ignores what the user wrote.

use crate::errors::ValidationError;
use crate::models::{ChatMessage, Sender};
use async_trait::async_trait;
use chrono::Local;
use rand::seq::SliceRandom;
use std::sync::{
    Arc, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

pub const MENTOR_REPLIES: [&str; 6] = [
    "Отличный вопрос! Маленькие шаги каждый день дают большие результаты.",
    "Ты уже на правильном пути. Главное сейчас не останавливаться.",
    "Попробуй разбить цель на три простых действия и начни с самого лёгкого.",
    "Не забывай отдыхать: восстановление тоже часть прогресса.",
    "Запиши, чего ты достиг за неделю. Это отлично мотивирует.",
    "Сосредоточься на привычке, а не на результате. Результат придёт сам.",
];

pub const QUICK_PROMPTS: [&str; 2] = ["Как повысить мотивацию?", "Дай совет на сегодня"];

/// Source of mentor replies.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    async fn reply(&self, prompt: &str) -> String;
}

/// Uniform random pick from [`MENTOR_REPLIES`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedMentor;

#[async_trait]
impl ResponseProvider for ScriptedMentor {
    async fn reply(&self, _prompt: &str) -> String {
        let reply = MENTOR_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(MENTOR_REPLIES[0]);
        reply.to_string()
    }
}

pub struct MentorChat {
    log: Arc<Mutex<Vec<ChatMessage>>>,
    next_id: Arc<AtomicU64>,
    provider: Arc<dyn ResponseProvider>,
    delay: Duration,
    pending: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl MentorChat {
    pub fn new(delay: Duration) -> Self {
        Self::with_provider(Arc::new(ScriptedMentor), delay)
    }

    pub fn with_provider(provider: Arc<dyn ResponseProvider>, delay: Duration) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            provider,
            delay,
            pending: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.log.lock().await.clone()
    }

    /// Appends the user message now and schedules the mentor reply.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let message = new_message(&self.next_id, Sender::User, text.to_string());
        self.log.lock().await.push(message.clone());
        debug!(id = message.id, "user message appended");

        self.schedule_reply(text.to_string());
        Ok(message)
    }

    /// Sends one of the fixed shortcut prompts; `None` for an unknown index.
    pub async fn quick_action(&self, index: usize) -> Option<Result<ChatMessage, ValidationError>> {
        let prompt = QUICK_PROMPTS.get(index)?;
        Some(self.send(prompt).await)
    }

    fn schedule_reply(&self, prompt: String) {
        let log = Arc::clone(&self.log);
        let next_id = Arc::clone(&self.next_id);
        let provider = Arc::clone(&self.provider);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let text = provider.reply(&prompt).await;
            let message = new_message(&next_id, Sender::Ai, text);
            debug!(id = message.id, "mentor reply appended");
            log.lock().await.push(message);
        });

        let mut pending = self.pending();
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }

    /// Number of replies still waiting on their delay.
    pub fn pending_replies(&self) -> usize {
        self.pending()
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    fn pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels every reply that has not been delivered yet.
    pub fn shutdown(&self) {
        let mut pending = self.pending();
        let cancelled = pending.iter().filter(|handle| !handle.is_finished()).count();
        for handle in pending.drain(..) {
            handle.abort();
        }
        if cancelled > 0 {
            info!(cancelled, "cancelled pending mentor replies");
        }
    }
}

impl Drop for MentorChat {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn new_message(next_id: &AtomicU64, sender: Sender, text: String) -> ChatMessage {
    ChatMessage {
        id: next_id.fetch_add(1, Ordering::Relaxed),
        sender,
        text,
        timestamp: Local::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl ResponseProvider for Echo {
        async fn reply(&self, prompt: &str) -> String {
            format!("echo: {prompt}")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_only_after_delay() {
        let chat = MentorChat::new(DEFAULT_REPLY_DELAY);
        let sent = chat.send("Привет").await.unwrap();
        assert_eq!(sent.sender, Sender::User);

        let messages = chat.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Привет");
        assert_eq!(chat.pending_replies(), 1);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(chat.messages().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        let messages = chat.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::Ai);
        assert!(MENTOR_REPLIES.contains(&messages[1].text.as_str()));
        assert!(messages[1].id > messages[0].id);
        assert_eq!(chat.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_message_is_rejected() {
        let chat = MentorChat::new(DEFAULT_REPLY_DELAY);
        assert_eq!(chat.send("   ").await.unwrap_err(), ValidationError::EmptyMessage);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(chat.messages().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn user_text_is_stored_as_written() {
        let chat = MentorChat::with_provider(Arc::new(Echo), Duration::from_millis(10));
        let sent = chat.send("  Как начать?\n").await.unwrap();
        assert_eq!(sent.text, "  Как начать?\n");

        tokio::time::sleep(Duration::from_millis(20)).await;
        tokio::task::yield_now().await;
        let messages = chat.messages().await;
        assert_eq!(messages[0].text, "  Как начать?\n");
        assert_eq!(messages[1].text, "echo:   Как начать?\n");
    }

    #[tokio::test(start_paused = true)]
    async fn every_send_gets_its_own_reply() {
        let chat = MentorChat::with_provider(Arc::new(Echo), Duration::from_millis(50));
        chat.send("один").await.unwrap();
        chat.send("два").await.unwrap();
        assert_eq!(chat.pending_replies(), 2);

        tokio::time::sleep(Duration::from_millis(60)).await;
        tokio::task::yield_now().await;
        let messages = chat.messages().await;
        assert_eq!(messages.len(), 4);
        let replies: Vec<&str> = messages
            .iter()
            .filter(|message| message.sender == Sender::Ai)
            .map(|message| message.text.as_str())
            .collect();
        assert_eq!(replies.len(), 2);
        assert!(replies.contains(&"echo: один"));
        assert!(replies.contains(&"echo: два"));
    }

    #[tokio::test(start_paused = true)]
    async fn quick_actions_send_fixed_prompts() {
        let chat = MentorChat::with_provider(Arc::new(Echo), Duration::from_millis(10));
        chat.quick_action(1).await.unwrap().unwrap();
        assert!(chat.quick_action(2).await.is_none());

        tokio::time::sleep(Duration::from_millis(20)).await;
        tokio::task::yield_now().await;
        let messages = chat.messages().await;
        assert_eq!(messages[0].text, QUICK_PROMPTS[1]);
        assert_eq!(messages[1].text, format!("echo: {}", QUICK_PROMPTS[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_replies() {
        let chat = MentorChat::new(DEFAULT_REPLY_DELAY);
        chat.send("Пока").await.unwrap();
        chat.shutdown();
        assert_eq!(chat.pending_replies(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(chat.messages().await.len(), 1);
    }
}
