//! Turns a homework record into the outgoing notification text.
use thiserror::Error;

use crate::model::{Homework, ReviewStatus};

/// The API reported a status outside the documented set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review status {0:?}")]
pub struct UnknownStatus(pub String);

/// Compose the notification for a reviewed work.
pub fn compose_notification(homework: &Homework) -> Result<String, UnknownStatus> {
    let status = ReviewStatus::parse(&homework.status)
        .ok_or_else(|| UnknownStatus(homework.status.clone()))?;
    Ok(format!(
        "Changed review status of \"{}\". {}",
        homework.homework_name,
        status.verdict()
    ))
}
