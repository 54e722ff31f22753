use serde::{Deserialize, Serialize};

use crate::domain::{Trainer, TrainerId, Webinar, WebinarId};

/// Change notifications published by the entity store after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreEvent {
    WebinarAdded { webinar: Webinar },
    WebinarUpdated { webinar: Webinar },
    WebinarDeleted { webinar_id: WebinarId },
    TrainerAdded { trainer: Trainer },
    TrainerUpdated { trainer: Trainer },
    TrainerDeleted { trainer_id: TrainerId },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
}

/// A transient toast shown after an action completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Result of a form action: where to go next and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub redirect: String,
    pub notice: Notice,
}

impl Outcome {
    pub fn new(redirect: impl Into<String>, notice: Notice) -> Self {
        Self {
            redirect: redirect.into(),
            notice,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub confirm: bool,
}
