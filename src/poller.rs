//! The polling loop: fetch, validate, translate, notify, sleep, repeat.
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::model::NotificationState;
use crate::notify::{DeliveryError, Notifier};
use crate::review::{extract_homeworks, ExtractError, FetchError, ReviewService};
use crate::status::{compose_notification, UnknownStatus};

/// Everything that can go wrong inside one poll cycle. All variants are
/// recoverable: the loop reports them and keeps going.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Translate(#[from] UnknownStatus),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub struct Poller<S, N> {
    service: S,
    notifier: N,
    interval: Duration,
    cursor: i64,
    state: NotificationState,
}

impl<S: ReviewService, N: Notifier> Poller<S, N> {
    pub fn new(service: S, notifier: N, interval: Duration, cursor: i64) -> Self {
        Self {
            service,
            notifier,
            interval,
            cursor,
            state: NotificationState::default(),
        }
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    pub async fn run(mut self) {
        info!(
            interval_secs = self.interval.as_secs(),
            cursor = self.cursor,
            "starting poll loop"
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One full cycle, error handling included. Never fails: a failed cycle
    /// is reported through the notifier, deduplicated against the previous
    /// failure report.
    pub async fn run_cycle(&mut self) {
        if let Err(err) = self.poll_once().await {
            error!(%err, "poll cycle failed");
            let diagnostic = diagnostic_for(&err);
            if self.state.last_error.as_deref() == Some(diagnostic.as_str()) {
                debug!("failure already reported, suppressing");
                return;
            }
            if let Err(delivery) = self.notifier.notify(&diagnostic).await {
                warn!(%delivery, "could not deliver failure report");
            }
            self.state.last_error = Some(diagnostic);
        }
    }

    async fn poll_once(&mut self) -> Result<(), CycleError> {
        let response = self.service.fetch_statuses(self.cursor).await?;
        let homeworks = extract_homeworks(&response)?;
        // Most recent submission comes first.
        let latest = match homeworks.first() {
            Some(homework) => homework,
            None => {
                debug!("no homeworks in the polling window");
                return Ok(());
            }
        };
        let message = compose_notification(latest)?;
        if self.state.last_message.as_deref() == Some(message.as_str()) {
            debug!("status unchanged, skipping notification");
            return Ok(());
        }
        self.notifier.notify(&message).await?;
        info!(homework = %latest.homework_name, "status change reported");
        self.state.last_message = Some(message);
        Ok(())
    }
}

fn diagnostic_for(err: &CycleError) -> String {
    match err {
        CycleError::Fetch(err) => format!("Failed to query the review API: {}", err),
        CycleError::Extract(err) => format!("Review API returned an unusable response: {}", err),
        CycleError::Translate(err) => format!("Could not compose a status report: {}", err),
        CycleError::Delivery(err) => format!("Could not deliver a status report: {}", err),
    }
}
