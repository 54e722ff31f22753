use super::*;
use shared::domain::{Platform, TrainerStatus, WebinarStatus};

struct FrozenClock(i64);

impl Clock for FrozenClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

fn new_webinar(title: &str) -> NewWebinar {
    NewWebinar {
        title: title.to_string(),
        description: "Draping basics".to_string(),
        trainer: "Guest Designer".to_string(),
        date: "2026-03-10".to_string(),
        time: "18:30".to_string(),
        duration: "1 Hour".to_string(),
        platform: Platform::Zoom,
        link: "https://zoom.us/j/555".to_string(),
        status: WebinarStatus::Draft,
    }
}

fn new_trainer(name: &str) -> NewTrainer {
    NewTrainer {
        name: name.to_string(),
        email: "meera@prassanna.com".to_string(),
        phone: "+91 90000 00000".to_string(),
        role: "Embroidery Specialist".to_string(),
        status: TrainerStatus::Active,
    }
}

#[test]
fn id_sequence_follows_clock_and_never_repeats() {
    let mut ids = IdSequence::starting_after(2);
    assert_eq!(ids.next(1_000), 1_000);
    assert_eq!(ids.next(1_000), 1_001);
    assert_eq!(ids.next(999), 1_002);
    assert_eq!(ids.next(5_000), 5_000);
}

#[test]
fn seeded_store_starts_with_mock_data() {
    let store = EntityStore::seeded();
    let webinars = store.list_webinars();
    assert_eq!(webinars.len(), 2);
    assert_eq!(webinars[0].title, "Basics of Fashion Design & Tailoring");
    assert_eq!(webinars[1].platform, Platform::GoogleMeet);
    assert_eq!(store.list_trainers().len(), 2);
}

#[test]
fn adds_with_frozen_clock_still_get_unique_ids() {
    let store = EntityStore::with_clock(
        seed_webinars(),
        seed_trainers(),
        Arc::new(FrozenClock(1_700_000_000_000)),
    );
    let first = store.add_webinar(new_webinar("Pattern Drafting"));
    let second = store.add_webinar(new_webinar("Fabric Science"));
    assert_ne!(first, second);
    assert_eq!(first.0, 1_700_000_000_000);
    assert_eq!(second.0, 1_700_000_000_001);
    assert_eq!(store.list_webinars().len(), 4);
}

#[test]
fn clock_behind_seed_ids_does_not_collide() {
    let store = EntityStore::with_clock(seed_webinars(), seed_trainers(), Arc::new(FrozenClock(0)));
    let id = store.add_trainer(new_trainer("Meera"));
    assert_eq!(id, TrainerId(3));
}

#[test]
fn update_merges_only_patched_fields() {
    let store = EntityStore::seeded();
    let before = store.get_webinar(WebinarId(2)).expect("seed webinar");
    let applied = store.update_webinar(
        WebinarId(2),
        WebinarPatch {
            title: Some("Blouse Masterclass".into()),
            status: Some(WebinarStatus::Upcoming),
            ..WebinarPatch::default()
        },
    );
    assert!(applied);

    let after = store.get_webinar(WebinarId(2)).expect("webinar");
    assert_eq!(after.title, "Blouse Masterclass");
    assert_eq!(after.status, WebinarStatus::Upcoming);
    assert_eq!(
        Webinar {
            title: before.title.clone(),
            status: before.status,
            ..after
        },
        before
    );
}

#[test]
fn update_of_missing_id_leaves_collection_untouched() {
    let store = EntityStore::seeded();
    let before = store.list_trainers();
    let applied = store.update_trainer(
        TrainerId(404),
        TrainerPatch {
            name: Some("Nobody".into()),
            ..TrainerPatch::default()
        },
    );
    assert!(!applied);
    assert_eq!(store.list_trainers(), before);
}

#[test]
fn delete_removes_exactly_one_record() {
    let store = EntityStore::seeded();
    assert!(store.delete_webinar(WebinarId(1)));
    let remaining = store.list_webinars();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, WebinarId(2));

    assert!(!store.delete_webinar(WebinarId(1)));
    assert_eq!(store.list_webinars(), remaining);
}

#[test]
fn webinar_trainer_name_is_not_tied_to_trainer_records() {
    let store = EntityStore::seeded();
    assert!(store.delete_trainer(TrainerId(1)));
    let webinar = store.get_webinar(WebinarId(1)).expect("webinar");
    assert_eq!(webinar.trainer, "Smt. Lakshmi Prassanna");
}

#[test]
fn reset_restores_seed_collections() {
    let store = EntityStore::seeded();
    store.add_webinar(new_webinar("Extra"));
    store.delete_trainer(TrainerId(2));
    store.reset();
    assert_eq!(store.list_webinars(), seed_webinars());
    assert_eq!(store.list_trainers(), seed_trainers());
}

#[test]
fn clones_share_collections() {
    let store = EntityStore::empty();
    let other = store.clone();
    other.add_trainer(new_trainer("Meera"));
    assert_eq!(store.list_trainers().len(), 1);
}

#[tokio::test]
async fn mutations_publish_store_events() {
    let store = EntityStore::seeded();
    let mut events = store.subscribe();

    let id = store.add_webinar(new_webinar("Pattern Drafting"));
    store.update_webinar(WebinarId(999), WebinarPatch::status(WebinarStatus::Live));
    store.delete_webinar(id);

    match events.recv().await.expect("added") {
        StoreEvent::WebinarAdded { webinar } => assert_eq!(webinar.id, id),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        events.recv().await.expect("deleted"),
        StoreEvent::WebinarDeleted { webinar_id: id }
    );
}
