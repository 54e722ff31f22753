use std::time::Duration;

use tokio::time::advance;

use super::*;

fn workshop() -> Modal {
    Modal::open(ModalContext::Registration {
        offering: Offering::Workshop,
        title: "Embroidery Basics".into(),
        is_paid: false,
        price: 0,
    })
}

#[tokio::test(start_paused = true)]
async fn abandoned_modals_are_swept_after_idle_timeout() {
    let registry = ModalRegistry::with_limits(Duration::from_secs(60), 1000);
    for _ in 0..500 {
        registry.open(workshop());
    }
    assert_eq!(registry.len(), 500);

    advance(Duration::from_secs(61)).await;
    let view = registry.open(workshop());
    assert_eq!(registry.len(), 1);
    assert!(registry.with_modal(view.id, |_| Ok(())).is_ok());
}

#[tokio::test(start_paused = true)]
async fn touching_a_modal_keeps_it_alive() {
    let registry = ModalRegistry::with_limits(Duration::from_secs(60), 1000);
    let kept = registry.open(workshop());
    let idle = registry.open(workshop());

    advance(Duration::from_secs(40)).await;
    registry
        .with_modal(kept.id, |modal| modal.set_field(Field::Name, "Kavya"))
        .expect("edit");

    advance(Duration::from_secs(30)).await;
    registry.open(workshop());

    assert_eq!(registry.len(), 2);
    assert!(registry.with_modal(kept.id, |_| Ok(())).is_ok());
    let err = registry.with_modal(idle.id, |_| Ok(())).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test(start_paused = true)]
async fn registry_never_exceeds_capacity() {
    let registry = ModalRegistry::with_limits(Duration::from_secs(3600), 3);
    let first = registry.open(workshop());
    advance(Duration::from_millis(1)).await;
    let mut latest = first.id;
    for _ in 0..10 {
        latest = registry.open(workshop()).id;
        advance(Duration::from_millis(1)).await;
        assert!(registry.len() <= 3);
    }

    assert_eq!(registry.len(), 3);
    assert!(registry.with_modal(first.id, |_| Ok(())).is_err());
    assert!(registry.with_modal(latest, |_| Ok(())).is_ok());
}

#[tokio::test(start_paused = true)]
async fn submission_in_flight_survives_the_idle_sweep() {
    let registry = ModalRegistry::with_limits(Duration::from_millis(100), 1000);
    let view = registry.open(workshop());
    registry
        .with_modal(view.id, |modal| {
            modal.set_field(Field::Name, "Kavya")?;
            modal.set_field(Field::Email, "kavya@example.com")?;
            modal.set_field(Field::Phone, "9876543210")?;
            modal.submit()
        })
        .expect("submit");

    advance(Duration::from_millis(200)).await;
    registry.open(workshop());

    let ((), view) = registry.with_modal(view.id, |_| Ok(())).expect("still open");
    assert_eq!(view.modal.phase, Phase::Submitting);
}
