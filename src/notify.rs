//! Outbound notification channel.
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("telegram send failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Delivers one plain-text message per call. Callers own retry cadence;
/// implementations must not retry inline.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(bot_token),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), DeliveryError> {
        self.bot.send_message(self.chat_id, text.to_owned()).await?;
        info!("message delivered to telegram");
        Ok(())
    }
}
