use shared::domain::TrainerStatus;
use storage::EntityStore;

use super::*;
use crate::{catalog::Board, SiteConfig};

fn ctx() -> ApiContext {
    ApiContext::new(EntityStore::seeded(), SiteConfig::instant())
}

fn confirm() -> Confirmation {
    Confirmation { confirm: true }
}

fn webinar_form() -> WebinarForm {
    WebinarForm {
        title: "Summer Fashion Trends 2026".into(),
        description: "What is on the runway this season.".into(),
        trainer: "Lakshmi Prassanna".into(),
        date: "2026-05-02".into(),
        time: "17:00".into(),
        duration: "2 Hours".into(),
        platform: Platform::Zoom,
        link: "https://zoom.us/j/987654321".into(),
        status: WebinarStatus::Upcoming,
    }
}

#[test]
fn dashboard_counts_statuses_and_shows_mock_registrations() {
    let ctx = ctx();
    ctx.store
        .update_webinar(WebinarId(2), WebinarPatch::status(WebinarStatus::Live));

    let page = dashboard(&ctx);
    let stats: Vec<_> = page
        .stats
        .iter()
        .map(|stat| (stat.label, stat.value.as_str()))
        .collect();
    assert_eq!(
        stats,
        vec![
            ("Total Webinars", "2"),
            ("Upcoming", "1"),
            ("Registrations", "1,234"),
            ("Live Now", "1"),
        ]
    );
    assert_eq!(page.recent_webinars.len(), 2);
}

#[test]
fn dashboard_lists_at_most_three_recent_webinars() {
    let ctx = ctx();
    create_webinar(&ctx, webinar_form()).unwrap();
    create_webinar(&ctx, webinar_form()).unwrap();
    let page = dashboard(&ctx);
    assert_eq!(page.recent_webinars.len(), 3);
    assert_eq!(page.recent_webinars[0].id, WebinarId(1));
}

#[test]
fn create_webinar_redirects_to_the_list() {
    let ctx = ctx();
    let outcome = create_webinar(&ctx, webinar_form()).unwrap();
    assert_eq!(outcome.redirect, "/admin/webinars");
    assert_eq!(outcome.notice, Notice::success("Webinar created successfully"));
    assert_eq!(webinar_list(&ctx).webinars.len(), 3);
}

#[test]
fn invalid_webinar_form_is_a_validation_error() {
    let ctx = ctx();
    let err = create_webinar(
        &ctx,
        WebinarForm {
            link: "zoom".into(),
            ..webinar_form()
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(err.fields.contains_key("link"));
    assert_eq!(ctx.store.list_webinars().len(), 2);
}

#[test]
fn new_webinar_form_uses_the_configured_defaults() {
    let ctx = ctx();
    save_settings(
        &ctx,
        SettingsForm {
            default_platform: Some(Platform::GoogleMeet),
            default_duration: Some("90 Minutes".into()),
            ..SettingsForm::default()
        },
    )
    .unwrap();
    let page = new_webinar_form(&ctx);
    assert_eq!(page.mode, FormMode::Create);
    assert_eq!(page.values.platform, Platform::GoogleMeet);
    assert_eq!(page.values.duration, "90 Minutes");
    assert_eq!(page.values.status, WebinarStatus::Draft);
}

#[test]
fn edit_form_is_prefilled_from_the_record() {
    let page = edit_webinar_form(&ctx(), WebinarId(1)).unwrap();
    assert_eq!(page.mode, FormMode::Edit);
    assert_eq!(page.submit_to, "/admin/webinars/edit/1");
    assert_eq!(page.values.title, "Basics of Fashion Design & Tailoring");
}

#[test]
fn editing_a_missing_webinar_redirects_with_an_error() {
    let ctx = ctx();
    let err = edit_webinar_form(&ctx, WebinarId(404)).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "Webinar not found");
    assert_eq!(err.redirect.as_deref(), Some("/admin/webinars"));

    let before = ctx.store.list_webinars();
    let err = update_webinar(&ctx, WebinarId(404), WebinarPatch::status(WebinarStatus::Live))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(ctx.store.list_webinars(), before);
}

#[test]
fn update_webinar_merges_the_patch() {
    let ctx = ctx();
    let outcome = update_webinar(
        &ctx,
        WebinarId(2),
        WebinarPatch {
            title: Some("Blouse Masterclass".into()),
            ..WebinarPatch::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.notice.message, "Webinar updated successfully");
    let webinar = ctx.store.get_webinar(WebinarId(2)).unwrap();
    assert_eq!(webinar.title, "Blouse Masterclass");
    assert_eq!(webinar.platform, Platform::GoogleMeet);
}

#[test]
fn delete_requires_confirmation() {
    let ctx = ctx();
    let err = delete_webinar(&ctx, WebinarId(1), Confirmation::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfirmationRequired);
    assert_eq!(ctx.store.list_webinars().len(), 2);

    let outcome = delete_webinar(&ctx, WebinarId(1), confirm()).unwrap();
    assert_eq!(outcome.notice.message, "Webinar deleted successfully");
    assert!(ctx.store.get_webinar(WebinarId(1)).is_none());
}

#[test]
fn trainer_crud_round() {
    let ctx = ctx();
    let outcome = create_trainer(
        &ctx,
        TrainerForm {
            name: "Meera Rao".into(),
            email: "meera@prassanna.com".into(),
            phone: "+91 90000 11111".into(),
            role: "Embroidery Specialist".into(),
            status: TrainerStatus::Active,
        },
    )
    .unwrap();
    assert_eq!(outcome.redirect, "/admin/trainers");
    assert_eq!(outcome.notice.message, "Trainer added successfully");

    let added = trainer_list(&ctx).trainers.pop().unwrap();
    let outcome = update_trainer(
        &ctx,
        added.id,
        TrainerPatch {
            status: Some(TrainerStatus::Inactive),
            ..TrainerPatch::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.notice.message, "Trainer updated successfully");
    assert_eq!(
        edit_trainer_form(&ctx, added.id).unwrap().values.status,
        TrainerStatus::Inactive
    );

    let outcome = delete_trainer(&ctx, added.id, confirm()).unwrap();
    assert_eq!(outcome.notice.message, "Trainer removed successfully");
    assert_eq!(ctx.store.list_trainers().len(), 2);
}

#[test]
fn missing_trainer_is_reported() {
    let err = edit_trainer_form(&ctx(), TrainerId(77)).unwrap_err();
    assert_eq!(err.message, "Trainer not found");
    assert_eq!(err.redirect.as_deref(), Some("/admin/trainers"));
}

#[test]
fn live_session_lifecycle() {
    let ctx = ctx();
    let sessions: Vec<_> = live_sessions(&ctx).sessions.iter().map(|w| w.id).collect();
    assert_eq!(sessions, vec![WebinarId(1)]);

    let outcome = go_live(&ctx, WebinarId(1)).unwrap();
    assert_eq!(outcome.notice.message, "Webinar is now Live!");
    assert_eq!(
        ctx.store.get_webinar(WebinarId(1)).unwrap().status,
        WebinarStatus::Live
    );

    let outcome = complete_session(&ctx, WebinarId(1)).unwrap();
    assert_eq!(outcome.notice.message, "Webinar marked as Completed");
    assert!(live_sessions(&ctx).sessions.is_empty());
}

#[test]
fn drafts_cannot_go_live() {
    let err = go_live(&ctx(), WebinarId(2)).unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);
    let err = complete_session(&ctx(), WebinarId(1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[test]
fn registrations_search_is_case_insensitive() {
    let all = registrations(&RegistrationQuery::default());
    assert_eq!(all.rows.len(), 3);

    let by_webinar = registrations(&RegistrationQuery {
        q: Some("basics".into()),
    });
    assert_eq!(by_webinar.rows.len(), 2);

    let by_email = registrations(&RegistrationQuery {
        q: Some(" ANITHA@".into()),
    });
    assert_eq!(by_email.rows.len(), 1);
    assert_eq!(by_email.rows[0].name, "Anitha Reddy");
}

#[test]
fn settings_defaults_and_save() {
    let ctx = ctx();
    let page = settings_page(&ctx);
    assert_eq!(page.settings.institute_name, INSTITUTE_NAME);
    assert_eq!(page.settings.timezone, Timezone::Ist);
    assert_eq!(page.settings.default_duration, "1 Hour");

    let outcome = save_settings(
        &ctx,
        SettingsForm {
            admin_email: Some("office@prassanna.com".into()),
            timezone: Some(Timezone::Utc),
            ..SettingsForm::default()
        },
    )
    .unwrap();
    assert_eq!(outcome.notice.message, "Settings saved successfully!");
    let settings = settings_page(&ctx).settings;
    assert_eq!(settings.admin_email, "office@prassanna.com");
    assert_eq!(settings.timezone, Timezone::Utc);
}

#[test]
fn settings_reject_a_bad_admin_email() {
    let ctx = ctx();
    let err = save_settings(
        &ctx,
        SettingsForm {
            admin_email: Some("admin".into()),
            ..SettingsForm::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(settings_page(&ctx).settings.admin_email, "admin@prassanna.com");
}

#[test]
fn reset_restores_seed_and_settings() {
    let ctx = ctx();
    create_webinar(&ctx, webinar_form()).unwrap();
    ctx.signups.register(Board::Listing, "visitor-a", 1);
    save_settings(
        &ctx,
        SettingsForm {
            timezone: Some(Timezone::Est),
            ..SettingsForm::default()
        },
    )
    .unwrap();

    let err = reset_system(&ctx, Confirmation::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfirmationRequired);
    assert_eq!(ctx.store.list_webinars().len(), 3);

    let outcome = reset_system(&ctx, confirm()).unwrap();
    assert_eq!(outcome.notice.message, "System reset successfully");
    assert_eq!(ctx.store.list_webinars().len(), 2);
    assert_eq!(settings_page(&ctx).settings, AdminSettings::default());
    assert!(ctx.signups.registered(Board::Listing, "visitor-a").is_empty());
}

#[test]
fn logout_needs_confirmation() {
    assert!(logout(Confirmation::default()).is_err());
    assert_eq!(logout(confirm()).unwrap().redirect, "/");
}
