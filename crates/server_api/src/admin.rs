//! Admin console: dashboard, webinar and trainer CRUD, live-session control,
//! registrations and settings.

use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        Platform, Trainer, TrainerId, TrainerPatch, Webinar, WebinarId, WebinarPatch,
        WebinarStatus,
    },
    error::{ApiError, ErrorCode},
    protocol::{Confirmation, Notice, Outcome},
};
use tracing::{info, warn};

use crate::{
    catalog::layout::{AdminShell, NavLink},
    forms::{
        is_valid_email, validate_trainer_patch, validate_webinar_patch, FieldErrors, TrainerForm,
        WebinarForm,
    },
    ApiContext,
};

pub const WEBINARS_PATH: &str = "/admin/webinars";
pub const TRAINERS_PATH: &str = "/admin/trainers";
pub const LIVE_SESSIONS_PATH: &str = "/admin/live-sessions";
pub const SETTINGS_PATH: &str = "/admin/settings";

/// Shown in place of real numbers until registrations are tracked per webinar.
pub const MOCK_REGISTRATION_TOTAL: &str = "1,234";

fn confirmed(confirmation: Confirmation, prompt: &str) -> Result<(), ApiError> {
    if confirmation.confirm {
        Ok(())
    } else {
        Err(ApiError::confirmation_required(prompt))
    }
}

fn webinar_not_found(id: WebinarId, back_to: &str) -> ApiError {
    warn!(webinar_id = id.0, "webinar not found");
    ApiError::not_found("Webinar not found", back_to)
}

fn trainer_not_found(id: TrainerId) -> ApiError {
    warn!(trainer_id = id.0, "trainer not found");
    ApiError::not_found("Trainer not found", TRAINERS_PATH)
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub shell: AdminShell,
    pub stats: Vec<DashboardStat>,
    pub recent_webinars: Vec<Webinar>,
    pub quick_actions: &'static [NavLink],
}

const QUICK_ACTIONS: &[NavLink] = &[
    NavLink {
        name: "+ Schedule New Webinar",
        path: "/admin/webinars/new",
    },
    NavLink {
        name: "View Recent Registrations",
        path: "/admin/registrations",
    },
    NavLink {
        name: "Manage Trainers",
        path: TRAINERS_PATH,
    },
];

pub fn dashboard(ctx: &ApiContext) -> DashboardPage {
    let webinars = ctx.store.list_webinars();
    let count = |status: WebinarStatus| {
        webinars
            .iter()
            .filter(|webinar| webinar.status == status)
            .count()
            .to_string()
    };
    let stats = vec![
        DashboardStat {
            label: "Total Webinars",
            value: webinars.len().to_string(),
        },
        DashboardStat {
            label: "Upcoming",
            value: count(WebinarStatus::Upcoming),
        },
        DashboardStat {
            label: "Registrations",
            value: MOCK_REGISTRATION_TOTAL.into(),
        },
        DashboardStat {
            label: "Live Now",
            value: count(WebinarStatus::Live),
        },
    ];
    DashboardPage {
        shell: AdminShell::new(
            "Dashboard",
            Some("Overview of your webinar performance and upcoming sessions."),
        ),
        stats,
        recent_webinars: webinars.into_iter().take(3).collect(),
        quick_actions: QUICK_ACTIONS,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebinarListPage {
    pub shell: AdminShell,
    pub webinars: Vec<Webinar>,
}

pub fn webinar_list(ctx: &ApiContext) -> WebinarListPage {
    WebinarListPage {
        shell: AdminShell::new("Webinars", Some("Manage your webinars efficiently.")),
        webinars: ctx.store.list_webinars(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormPage<T> {
    pub shell: AdminShell,
    pub mode: FormMode,
    pub submit_to: String,
    pub cancel_to: &'static str,
    pub values: T,
}

pub fn new_webinar_form(ctx: &ApiContext) -> FormPage<WebinarForm> {
    let settings = ctx.settings.read();
    FormPage {
        shell: AdminShell::new("Webinars", Some("Create a new webinar session")),
        mode: FormMode::Create,
        submit_to: WEBINARS_PATH.into(),
        cancel_to: WEBINARS_PATH,
        values: WebinarForm {
            platform: settings.default_platform,
            duration: settings.default_duration.clone(),
            ..WebinarForm::default()
        },
    }
}

pub fn edit_webinar_form(
    ctx: &ApiContext,
    id: WebinarId,
) -> Result<FormPage<WebinarForm>, ApiError> {
    let webinar = ctx
        .store
        .get_webinar(id)
        .ok_or_else(|| webinar_not_found(id, WEBINARS_PATH))?;
    Ok(FormPage {
        shell: AdminShell::new("Webinars", Some("Edit webinar details")),
        mode: FormMode::Edit,
        submit_to: format!("/admin/webinars/edit/{id}"),
        cancel_to: WEBINARS_PATH,
        values: WebinarForm::from(&webinar),
    })
}

pub fn create_webinar(ctx: &ApiContext, form: WebinarForm) -> Result<Outcome, ApiError> {
    let new = form.validate()?;
    let id = ctx.store.add_webinar(new);
    info!(webinar_id = id.0, "webinar created");
    Ok(Outcome::new(
        WEBINARS_PATH,
        Notice::success("Webinar created successfully"),
    ))
}

pub fn update_webinar(
    ctx: &ApiContext,
    id: WebinarId,
    patch: WebinarPatch,
) -> Result<Outcome, ApiError> {
    if ctx.store.get_webinar(id).is_none() {
        return Err(webinar_not_found(id, WEBINARS_PATH));
    }
    let patch = validate_webinar_patch(patch)?;
    if !ctx.store.update_webinar(id, patch) {
        return Err(webinar_not_found(id, WEBINARS_PATH));
    }
    info!(webinar_id = id.0, "webinar updated");
    Ok(Outcome::new(
        WEBINARS_PATH,
        Notice::success("Webinar updated successfully"),
    ))
}

pub fn delete_webinar(
    ctx: &ApiContext,
    id: WebinarId,
    confirmation: Confirmation,
) -> Result<Outcome, ApiError> {
    confirmed(confirmation, "Are you sure you want to delete this webinar?")?;
    if !ctx.store.delete_webinar(id) {
        return Err(webinar_not_found(id, WEBINARS_PATH));
    }
    info!(webinar_id = id.0, "webinar deleted");
    Ok(Outcome::new(
        WEBINARS_PATH,
        Notice::success("Webinar deleted successfully"),
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainerListPage {
    pub shell: AdminShell,
    pub trainers: Vec<Trainer>,
}

pub fn trainer_list(ctx: &ApiContext) -> TrainerListPage {
    TrainerListPage {
        shell: AdminShell::new("Trainers", Some("Create and manage trainers for webinars")),
        trainers: ctx.store.list_trainers(),
    }
}

pub fn new_trainer_form() -> FormPage<TrainerForm> {
    FormPage {
        shell: AdminShell::new("Trainers", Some("Add a new trainer")),
        mode: FormMode::Create,
        submit_to: TRAINERS_PATH.into(),
        cancel_to: TRAINERS_PATH,
        values: TrainerForm::default(),
    }
}

pub fn edit_trainer_form(
    ctx: &ApiContext,
    id: TrainerId,
) -> Result<FormPage<TrainerForm>, ApiError> {
    let trainer = ctx.store.get_trainer(id).ok_or_else(|| trainer_not_found(id))?;
    Ok(FormPage {
        shell: AdminShell::new("Trainers", Some("Edit trainer details")),
        mode: FormMode::Edit,
        submit_to: format!("/admin/trainers/edit/{id}"),
        cancel_to: TRAINERS_PATH,
        values: TrainerForm::from(&trainer),
    })
}

pub fn create_trainer(ctx: &ApiContext, form: TrainerForm) -> Result<Outcome, ApiError> {
    let new = form.validate()?;
    let id = ctx.store.add_trainer(new);
    info!(trainer_id = id.0, "trainer added");
    Ok(Outcome::new(
        TRAINERS_PATH,
        Notice::success("Trainer added successfully"),
    ))
}

pub fn update_trainer(
    ctx: &ApiContext,
    id: TrainerId,
    patch: TrainerPatch,
) -> Result<Outcome, ApiError> {
    if ctx.store.get_trainer(id).is_none() {
        return Err(trainer_not_found(id));
    }
    let patch = validate_trainer_patch(patch)?;
    if !ctx.store.update_trainer(id, patch) {
        return Err(trainer_not_found(id));
    }
    info!(trainer_id = id.0, "trainer updated");
    Ok(Outcome::new(
        TRAINERS_PATH,
        Notice::success("Trainer updated successfully"),
    ))
}

pub fn delete_trainer(
    ctx: &ApiContext,
    id: TrainerId,
    confirmation: Confirmation,
) -> Result<Outcome, ApiError> {
    confirmed(confirmation, "Are you sure you want to delete this trainer?")?;
    if !ctx.store.delete_trainer(id) {
        return Err(trainer_not_found(id));
    }
    info!(trainer_id = id.0, "trainer removed");
    Ok(Outcome::new(
        TRAINERS_PATH,
        Notice::success("Trainer removed successfully"),
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveSessionsPage {
    pub shell: AdminShell,
    pub sessions: Vec<Webinar>,
}

/// Webinars that can still be started or are running right now.
pub fn live_sessions(ctx: &ApiContext) -> LiveSessionsPage {
    LiveSessionsPage {
        shell: AdminShell::new(
            "Live Sessions",
            Some("Manage and control live webinar sessions."),
        ),
        sessions: ctx
            .store
            .list_webinars()
            .into_iter()
            .filter(|webinar| {
                matches!(webinar.status, WebinarStatus::Upcoming | WebinarStatus::Live)
            })
            .collect(),
    }
}

fn transition(
    ctx: &ApiContext,
    id: WebinarId,
    from: WebinarStatus,
    to: WebinarStatus,
    message: &str,
) -> Result<Outcome, ApiError> {
    let webinar = ctx
        .store
        .get_webinar(id)
        .ok_or_else(|| webinar_not_found(id, LIVE_SESSIONS_PATH))?;
    if webinar.status != from {
        return Err(ApiError::new(
            ErrorCode::Conflict,
            format!(
                "webinar is {} and cannot become {}",
                webinar.status.as_str(),
                to.as_str()
            ),
        ));
    }
    ctx.store.update_webinar(id, WebinarPatch::status(to));
    info!(webinar_id = id.0, status = to.as_str(), "session status changed");
    Ok(Outcome::new(LIVE_SESSIONS_PATH, Notice::success(message)))
}

pub fn go_live(ctx: &ApiContext, id: WebinarId) -> Result<Outcome, ApiError> {
    transition(
        ctx,
        id,
        WebinarStatus::Upcoming,
        WebinarStatus::Live,
        "Webinar is now Live!",
    )
}

pub fn complete_session(ctx: &ApiContext, id: WebinarId) -> Result<Outcome, ApiError> {
    transition(
        ctx,
        id,
        WebinarStatus::Live,
        WebinarStatus::Completed,
        "Webinar marked as Completed",
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRow {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub webinar: &'static str,
    pub date: &'static str,
}

pub const MOCK_REGISTRATIONS: &[RegistrationRow] = &[
    RegistrationRow {
        id: 1,
        name: "Priya Sharma",
        email: "priya@example.com",
        phone: "+91 98765 43210",
        webinar: "Basics of Fashion Design",
        date: "2026-01-14",
    },
    RegistrationRow {
        id: 2,
        name: "Anitha Reddy",
        email: "anitha@example.com",
        phone: "+91 98765 43211",
        webinar: "Saree Blouse Masterclass",
        date: "2026-01-15",
    },
    RegistrationRow {
        id: 3,
        name: "Sunitha Kumari",
        email: "sunitha@example.com",
        phone: "+91 98765 43212",
        webinar: "Basics of Fashion Design",
        date: "2026-01-16",
    },
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationsPage {
    pub shell: AdminShell,
    pub query: String,
    pub rows: Vec<RegistrationRow>,
}

/// Case-insensitive substring search over name, email and webinar title.
pub fn registrations(query: &RegistrationQuery) -> RegistrationsPage {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();
    let rows = MOCK_REGISTRATIONS
        .iter()
        .filter(|row| {
            needle.is_empty()
                || [row.name, row.email, row.webinar]
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    RegistrationsPage {
        shell: AdminShell::new("Registrations", Some("View and manage student registrations.")),
        query: needle,
        rows,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timezone {
    #[default]
    #[serde(rename = "IST")]
    Ist,
    #[serde(rename = "UTC")]
    Utc,
    #[serde(rename = "EST")]
    Est,
}

impl Timezone {
    pub fn label(self) -> &'static str {
        match self {
            Timezone::Ist => "India Standard Time (IST) - UTC+05:30",
            Timezone::Utc => "UTC",
            Timezone::Est => "Eastern Standard Time (EST)",
        }
    }
}

pub const INSTITUTE_NAME: &str = "Prassanna Fashion Designs and Institute Pvt. Ltd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSettings {
    pub institute_name: &'static str,
    pub admin_email: String,
    pub timezone: Timezone,
    pub default_platform: Platform,
    pub default_duration: String,
    pub registration_message: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            institute_name: INSTITUTE_NAME,
            admin_email: "admin@prassanna.com".into(),
            timezone: Timezone::Ist,
            default_platform: Platform::Zoom,
            default_duration: "1 Hour".into(),
            registration_message: "Thank you for registering! The link will be sent to your \
                                   email."
                .into(),
        }
    }
}

/// Editable part of the settings page. The institute name is read-only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    pub admin_email: Option<String>,
    pub timezone: Option<Timezone>,
    pub default_platform: Option<Platform>,
    pub default_duration: Option<String>,
    pub registration_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimezoneOption {
    pub value: Timezone,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsPage {
    pub shell: AdminShell,
    pub settings: AdminSettings,
    pub timezones: Vec<TimezoneOption>,
    pub platforms: [Platform; 2],
}

pub fn settings_page(ctx: &ApiContext) -> SettingsPage {
    SettingsPage {
        shell: AdminShell::new("Settings", Some("Manage your dashboard configurations")),
        settings: ctx.settings.read().clone(),
        timezones: [Timezone::Ist, Timezone::Utc, Timezone::Est]
            .into_iter()
            .map(|value| TimezoneOption {
                value,
                label: value.label(),
            })
            .collect(),
        platforms: [Platform::Zoom, Platform::GoogleMeet],
    }
}

pub fn save_settings(ctx: &ApiContext, form: SettingsForm) -> Result<Outcome, ApiError> {
    let mut errors = FieldErrors::default();
    if let Some(email) = &form.admin_email {
        if !is_valid_email(email) {
            errors.insert("admin_email", "Please enter a valid email");
        }
    }
    if form
        .default_duration
        .as_deref()
        .is_some_and(|value| value.trim().is_empty())
    {
        errors.insert("default_duration", "Default duration is required");
    }
    errors.into_result(())?;

    let mut settings = ctx.settings.write();
    if let Some(email) = form.admin_email {
        settings.admin_email = email;
    }
    if let Some(timezone) = form.timezone {
        settings.timezone = timezone;
    }
    if let Some(platform) = form.default_platform {
        settings.default_platform = platform;
    }
    if let Some(duration) = form.default_duration {
        settings.default_duration = duration;
    }
    if let Some(message) = form.registration_message {
        settings.registration_message = message;
    }
    info!("admin settings saved");
    Ok(Outcome::new(
        SETTINGS_PATH,
        Notice::success("Settings saved successfully!"),
    ))
}

/// Reverts the store, the settings and visitor sign-ups to their initial state.
pub fn reset_system(ctx: &ApiContext, confirmation: Confirmation) -> Result<Outcome, ApiError> {
    confirmed(
        confirmation,
        "Are you sure you want to reset all data? This cannot be undone.",
    )?;
    ctx.store.reset();
    *ctx.settings.write() = AdminSettings::default();
    ctx.signups.clear();
    warn!("system data reset to seed");
    Ok(Outcome::new(
        SETTINGS_PATH,
        Notice::success("System reset successfully"),
    ))
}

pub fn logout(confirmation: Confirmation) -> Result<Outcome, ApiError> {
    confirmed(confirmation, "Are you sure you want to logout?")?;
    Ok(Outcome::new("/", Notice::info("You have been logged out")))
}

#[cfg(test)]
#[path = "tests/admin_tests.rs"]
mod tests;
