//! Field validation and live input masking for the site's forms.
//!
//! Validators never fail hard: they collect human readable messages per
//! field into [`FieldErrors`] and leave it to the caller to decide whether
//! the submission goes ahead.

use std::{collections::BTreeMap, fmt};

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        NewTrainer, NewWebinar, Platform, Trainer, TrainerPatch, TrainerStatus, Webinar,
        WebinarPatch, WebinarStatus,
    },
    error::{ApiError, FieldMessages},
};
use url::Url;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static EXPIRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").expect("expiry pattern"));

pub const CARD_DIGITS: usize = 16;
pub const EXPIRY_DIGITS: usize = 4;
pub const CVV_MAX_DIGITS: usize = 4;
pub const CVV_MIN_DIGITS: usize = 3;
pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    CardNumber,
    Expiry,
    Cvv,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::CardNumber => "card_number",
            Field::Expiry => "expiry",
            Field::Cvv => "cvv",
        }
    }

    pub fn is_contact(self) -> bool {
        matches!(self, Field::Name | Field::Email | Field::Phone)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Drops the message for one field, e.g. once the user edits it again.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn into_messages(self) -> FieldMessages {
        self.0
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::validation(errors.into_messages())
    }
}

/// Current values of a modal form. Registration only uses the contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl FormValues {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::CardNumber => self.card_number = value,
            Field::Expiry => self.expiry = value,
            Field::Cvv => self.cvv = value,
        }
    }
}

/// Wording differs slightly between the registration and payment modals.
#[derive(Debug, Clone, Copy)]
pub struct ContactMessages {
    pub name_required: &'static str,
    pub email_required: &'static str,
    pub email_invalid: &'static str,
    pub phone_required: &'static str,
    pub phone_invalid: &'static str,
}

pub const REGISTRATION_MESSAGES: ContactMessages = ContactMessages {
    name_required: "Name is required",
    email_required: "Email is required",
    email_invalid: "Please enter a valid email",
    phone_required: "Phone number is required",
    phone_invalid: "Please enter a valid 10-digit phone number",
};

pub const PAYMENT_MESSAGES: ContactMessages = ContactMessages {
    name_required: "Name is required",
    email_required: "Email is required",
    email_invalid: "Please enter a valid email",
    phone_required: "Phone is required",
    phone_invalid: "Enter valid 10-digit phone",
};

pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn validate_contact(values: &FormValues, messages: &ContactMessages) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if values.name.trim().is_empty() {
        errors.insert(Field::Name.as_str(), messages.name_required);
    }

    if values.email.trim().is_empty() {
        errors.insert(Field::Email.as_str(), messages.email_required);
    } else if !is_valid_email(&values.email) {
        errors.insert(Field::Email.as_str(), messages.email_invalid);
    }

    if values.phone.trim().is_empty() {
        errors.insert(Field::Phone.as_str(), messages.phone_required);
    } else if digits(&values.phone).len() != PHONE_DIGITS {
        errors.insert(Field::Phone.as_str(), messages.phone_invalid);
    }

    errors
}

pub fn validate_card(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let card_len = values
        .card_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .count();
    if values.card_number.trim().is_empty() || card_len < CARD_DIGITS {
        errors.insert(Field::CardNumber.as_str(), "Enter valid card number");
    }
    if values.expiry.trim().is_empty() || !EXPIRY.is_match(&values.expiry) {
        errors.insert(Field::Expiry.as_str(), "Enter valid expiry (MM/YY)");
    }
    if values.cvv.trim().is_empty() || values.cvv.chars().count() < CVV_MIN_DIGITS {
        errors.insert(Field::Cvv.as_str(), "Enter valid CVV");
    }

    errors
}

/// Digits only, at most sixteen, grouped in blocks of four.
pub fn mask_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(CARD_DIGITS)
        .collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits only, at most four, with `/` after the month once it is complete.
pub fn mask_expiry(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(EXPIRY_DIGITS)
        .collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn mask_cvv(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CVV_MAX_DIGITS)
        .collect()
}

pub fn mask(field: Field, raw: &str) -> String {
    match field {
        Field::CardNumber => mask_card_number(raw),
        Field::Expiry => mask_expiry(raw),
        Field::Cvv => mask_cvv(raw),
        Field::Name | Field::Email | Field::Phone => raw.to_string(),
    }
}

fn require(errors: &mut FieldErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
    }
}

fn check_date(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("date", "Date is required");
    } else if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        errors.insert("date", "Enter a valid date (YYYY-MM-DD)");
    }
}

fn check_time(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("time", "Time is required");
    } else if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        errors.insert("time", "Enter a valid time (HH:MM)");
    }
}

fn check_link(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("link", "Meeting link is required");
        return;
    }
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false);
    if !valid {
        errors.insert("link", "Enter a valid URL");
    }
}

fn check_email(errors: &mut FieldErrors, value: &str) {
    if value.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(value) {
        errors.insert("email", "Please enter a valid email");
    }
}

/// Admin "new webinar" form. Platform and status come from select boxes
/// with Zoom and Draft preselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebinarForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trainer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: WebinarStatus,
}

impl WebinarForm {
    pub fn validate(self) -> Result<NewWebinar, FieldErrors> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "title", "Title", &self.title);
        require(&mut errors, "description", "Description", &self.description);
        require(&mut errors, "trainer", "Trainer", &self.trainer);
        require(&mut errors, "duration", "Duration", &self.duration);
        check_date(&mut errors, &self.date);
        check_time(&mut errors, &self.time);
        check_link(&mut errors, &self.link);

        errors.into_result(NewWebinar {
            title: self.title,
            description: self.description,
            trainer: self.trainer,
            date: self.date,
            time: self.time,
            duration: self.duration,
            platform: self.platform,
            link: self.link,
            status: self.status,
        })
    }
}

impl From<&Webinar> for WebinarForm {
    fn from(webinar: &Webinar) -> Self {
        Self {
            title: webinar.title.clone(),
            description: webinar.description.clone(),
            trainer: webinar.trainer.clone(),
            date: webinar.date.clone(),
            time: webinar.time.clone(),
            duration: webinar.duration.clone(),
            platform: webinar.platform,
            link: webinar.link.clone(),
            status: webinar.status,
        }
    }
}

/// Checks the fields present in an edit. Absent fields are not looked at.
pub fn validate_webinar_patch(patch: WebinarPatch) -> Result<WebinarPatch, FieldErrors> {
    let mut errors = FieldErrors::default();
    if let Some(v) = &patch.title {
        require(&mut errors, "title", "Title", v);
    }
    if let Some(v) = &patch.description {
        require(&mut errors, "description", "Description", v);
    }
    if let Some(v) = &patch.trainer {
        require(&mut errors, "trainer", "Trainer", v);
    }
    if let Some(v) = &patch.duration {
        require(&mut errors, "duration", "Duration", v);
    }
    if let Some(v) = &patch.date {
        check_date(&mut errors, v);
    }
    if let Some(v) = &patch.time {
        check_time(&mut errors, v);
    }
    if let Some(v) = &patch.link {
        check_link(&mut errors, v);
    }
    errors.into_result(patch)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: TrainerStatus,
}

impl TrainerForm {
    pub fn validate(self) -> Result<NewTrainer, FieldErrors> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", "Name", &self.name);
        check_email(&mut errors, &self.email);
        require(&mut errors, "phone", "Phone", &self.phone);
        require(&mut errors, "role", "Role", &self.role);

        errors.into_result(NewTrainer {
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            status: self.status,
        })
    }
}

impl From<&Trainer> for TrainerForm {
    fn from(trainer: &Trainer) -> Self {
        Self {
            name: trainer.name.clone(),
            email: trainer.email.clone(),
            phone: trainer.phone.clone(),
            role: trainer.role.clone(),
            status: trainer.status,
        }
    }
}

pub fn validate_trainer_patch(patch: TrainerPatch) -> Result<TrainerPatch, FieldErrors> {
    let mut errors = FieldErrors::default();
    if let Some(v) = &patch.name {
        require(&mut errors, "name", "Name", v);
    }
    if let Some(v) = &patch.email {
        check_email(&mut errors, v);
    }
    if let Some(v) = &patch.phone {
        require(&mut errors, "phone", "Phone", v);
    }
    if let Some(v) = &patch.role {
        require(&mut errors, "role", "Role", v);
    }
    errors.into_result(patch)
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
