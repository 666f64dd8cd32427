use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::mutation::Mutation;
use crate::usecase::ports::source::MutationPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The owning view must refetch.
    Invalidate,
    /// Nothing changed locally; show this to the user.
    Notify(Notification),
}

pub struct MutationService {
    port: Arc<dyn MutationPort>,
}

impl MutationService {
    pub fn new(port: Arc<dyn MutationPort>) -> Self {
        Self { port }
    }

    pub async fn run(&self, mutation: &Mutation) -> MutationOutcome {
        let action = mutation.describe();
        match self.port.apply(mutation).await {
            Ok(()) => {
                info!(%action, "mutation applied");
                MutationOutcome::Invalidate
            }
            Err(err) => {
                warn!(%action, error = %err, "mutation failed");
                MutationOutcome::Notify(Notification::error(format!(
                    "Could not {action}: {err}"
                )))
            }
        }
    }
}
