use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(WebinarId);
id_newtype!(TrainerId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalId(pub Uuid);

impl ModalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ModalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WebinarStatus {
    #[default]
    Draft,
    Upcoming,
    Live,
    Completed,
}

impl WebinarStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WebinarStatus::Draft => "Draft",
            WebinarStatus::Upcoming => "Upcoming",
            WebinarStatus::Live => "Live",
            WebinarStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Zoom,
    #[serde(rename = "Google Meet")]
    GoogleMeet,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Zoom => "Zoom",
            Platform::GoogleMeet => "Google Meet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrainerStatus {
    #[default]
    Active,
    Inactive,
}

/// A scheduled online session managed from the admin console.
///
/// `trainer` is the display name of whoever runs the session. It is not a
/// reference to a [`Trainer`] record and is never checked against one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webinar {
    pub id: WebinarId,
    pub title: String,
    pub description: String,
    pub trainer: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub platform: Platform,
    pub link: String,
    pub status: WebinarStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWebinar {
    pub title: String,
    pub description: String,
    pub trainer: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub platform: Platform,
    pub link: String,
    pub status: WebinarStatus,
}

impl NewWebinar {
    pub fn into_webinar(self, id: WebinarId) -> Webinar {
        Webinar {
            id,
            title: self.title,
            description: self.description,
            trainer: self.trainer,
            date: self.date,
            time: self.time,
            duration: self.duration,
            platform: self.platform,
            link: self.link,
            status: self.status,
        }
    }
}

/// Fields to overwrite on an existing webinar. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebinarPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trainer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<WebinarStatus>,
}

impl WebinarPatch {
    pub fn status(status: WebinarStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, webinar: &mut Webinar) {
        if let Some(v) = self.title {
            webinar.title = v;
        }
        if let Some(v) = self.description {
            webinar.description = v;
        }
        if let Some(v) = self.trainer {
            webinar.trainer = v;
        }
        if let Some(v) = self.date {
            webinar.date = v;
        }
        if let Some(v) = self.time {
            webinar.time = v;
        }
        if let Some(v) = self.duration {
            webinar.duration = v;
        }
        if let Some(v) = self.platform {
            webinar.platform = v;
        }
        if let Some(v) = self.link {
            webinar.link = v;
        }
        if let Some(v) = self.status {
            webinar.status = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub status: TrainerStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrainer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub status: TrainerStatus,
}

impl NewTrainer {
    pub fn into_trainer(self, id: TrainerId) -> Trainer {
        Trainer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<TrainerStatus>,
}

impl TrainerPatch {
    pub fn apply_to(self, trainer: &mut Trainer) {
        if let Some(v) = self.name {
            trainer.name = v;
        }
        if let Some(v) = self.email {
            trainer.email = v;
        }
        if let Some(v) = self.phone {
            trainer.phone = v;
        }
        if let Some(v) = self.role {
            trainer.role = v;
        }
        if let Some(v) = self.status {
            trainer.status = v;
        }
    }
}
