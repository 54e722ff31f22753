use std::{sync::Arc, time::Duration};

use parking_lot::RwLock;
use storage::EntityStore;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod forms;
pub mod modal;

use admin::AdminSettings;
use catalog::WebinarSignups;
use modal::ModalTimings;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "916302458752";

/// Site-wide knobs that are not part of the admin-editable settings.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub whatsapp_number: String,
    pub login_delay: Duration,
    pub webinar_signup_delay: Duration,
    pub registration_timings: ModalTimings,
    pub payment_timings: ModalTimings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.into(),
            login_delay: Duration::from_millis(800),
            webinar_signup_delay: Duration::from_millis(500),
            registration_timings: ModalTimings::REGISTRATION,
            payment_timings: ModalTimings::PAYMENT,
        }
    }
}

impl SiteConfig {
    /// Same site, but with every simulated delay removed.
    pub fn instant() -> Self {
        Self {
            login_delay: Duration::ZERO,
            webinar_signup_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct ApiContext {
    pub store: EntityStore,
    pub site: SiteConfig,
    pub settings: Arc<RwLock<AdminSettings>>,
    pub signups: WebinarSignups,
}

impl ApiContext {
    pub fn new(store: EntityStore, site: SiteConfig) -> Self {
        Self {
            store,
            site,
            settings: Arc::new(RwLock::new(AdminSettings::default())),
            signups: WebinarSignups::default(),
        }
    }
}
