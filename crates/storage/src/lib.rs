use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use shared::{
    domain::{
        NewTrainer, NewWebinar, Trainer, TrainerId, TrainerPatch, Webinar, WebinarId,
        WebinarPatch,
    },
    protocol::StoreEvent,
};
use tokio::sync::broadcast;
use tracing::debug;

mod seed;

pub use seed::{seed_trainers, seed_webinars};

const EVENT_CAPACITY: usize = 256;

/// A record kept in one of the store's collections.
pub trait Record: Clone {
    type Id: Copy + Eq + From<i64> + Into<i64>;
    type New;
    type Patch;

    fn id(&self) -> Self::Id;
    fn create(id: Self::Id, new: Self::New) -> Self;
    fn apply(&mut self, patch: Self::Patch);
}

impl Record for Webinar {
    type Id = WebinarId;
    type New = NewWebinar;
    type Patch = WebinarPatch;

    fn id(&self) -> WebinarId {
        self.id
    }

    fn create(id: WebinarId, new: NewWebinar) -> Self {
        new.into_webinar(id)
    }

    fn apply(&mut self, patch: WebinarPatch) {
        patch.apply_to(self);
    }
}

impl Record for Trainer {
    type Id = TrainerId;
    type New = NewTrainer;
    type Patch = TrainerPatch;

    fn id(&self) -> TrainerId {
        self.id
    }

    fn create(id: TrainerId, new: NewTrainer) -> Self {
        new.into_trainer(id)
    }

    fn apply(&mut self, patch: TrainerPatch) {
        patch.apply_to(self);
    }
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Hands out ids derived from the creation timestamp.
///
/// Ids are strictly increasing: when the clock has not moved past the last
/// issued id the next one is `last + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    pub fn starting_after(last: i64) -> Self {
        Self { last }
    }

    pub fn next(&mut self, now_millis: i64) -> i64 {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    records: Vec<R>,
    ids: IdSequence,
}

impl<R: Record> Collection<R> {
    pub fn new(records: Vec<R>) -> Self {
        let last = records
            .iter()
            .map(|record| -> i64 { record.id().into() })
            .max()
            .unwrap_or(0);
        Self {
            records,
            ids: IdSequence::starting_after(last),
        }
    }

    pub fn insert(&mut self, new: R::New, now_millis: i64) -> R {
        let id = R::Id::from(self.ids.next(now_millis));
        let record = R::create(id, new);
        self.records.push(record.clone());
        record
    }

    pub fn update(&mut self, id: R::Id, patch: R::Patch) -> Option<R> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        record.apply(patch);
        Some(record.clone())
    }

    pub fn remove(&mut self, id: R::Id) -> Option<R> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }
}

#[derive(Debug, Clone)]
struct Collections {
    webinars: Collection<Webinar>,
    trainers: Collection<Trainer>,
}

struct Inner {
    state: RwLock<Collections>,
    seed: Collections,
    events: broadcast::Sender<StoreEvent>,
    clock: Arc<dyn Clock>,
}

/// In-memory holder of the webinar and trainer collections.
///
/// The handle is cheap to clone; clones share the same collections. Every
/// successful mutation publishes one [`StoreEvent`] to subscribers. Lookups
/// and mutations on ids that do not exist never fail, they report `None` or
/// `false` and leave the collections untouched.
#[derive(Clone)]
pub struct EntityStore {
    inner: Arc<Inner>,
}

impl EntityStore {
    pub fn new(webinars: Vec<Webinar>, trainers: Vec<Trainer>) -> Self {
        Self::with_clock(webinars, trainers, Arc::new(SystemClock))
    }

    pub fn with_clock(
        webinars: Vec<Webinar>,
        trainers: Vec<Trainer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let seed = Collections {
            webinars: Collection::new(webinars),
            trainers: Collection::new(trainers),
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(seed.clone()),
                seed,
                events,
                clock,
            }),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_webinars(), seed_trainers())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    fn publish(&self, event: StoreEvent) {
        let _ = self.inner.events.send(event);
    }

    pub fn list_webinars(&self) -> Vec<Webinar> {
        self.inner.state.read().webinars.records().to_vec()
    }

    pub fn get_webinar(&self, id: WebinarId) -> Option<Webinar> {
        self.inner.state.read().webinars.get(id).cloned()
    }

    pub fn add_webinar(&self, new: NewWebinar) -> WebinarId {
        let now = self.inner.clock.now_millis();
        let webinar = self.inner.state.write().webinars.insert(new, now);
        let id = webinar.id;
        debug!(webinar_id = id.0, "webinar added");
        self.publish(StoreEvent::WebinarAdded { webinar });
        id
    }

    pub fn update_webinar(&self, id: WebinarId, patch: WebinarPatch) -> bool {
        let updated = self.inner.state.write().webinars.update(id, patch);
        match updated {
            Some(webinar) => {
                debug!(webinar_id = id.0, "webinar updated");
                self.publish(StoreEvent::WebinarUpdated { webinar });
                true
            }
            None => {
                debug!(webinar_id = id.0, "update ignored, webinar not found");
                false
            }
        }
    }

    pub fn delete_webinar(&self, id: WebinarId) -> bool {
        let removed = self.inner.state.write().webinars.remove(id);
        if removed.is_some() {
            debug!(webinar_id = id.0, "webinar deleted");
            self.publish(StoreEvent::WebinarDeleted { webinar_id: id });
        }
        removed.is_some()
    }

    pub fn list_trainers(&self) -> Vec<Trainer> {
        self.inner.state.read().trainers.records().to_vec()
    }

    pub fn get_trainer(&self, id: TrainerId) -> Option<Trainer> {
        self.inner.state.read().trainers.get(id).cloned()
    }

    pub fn add_trainer(&self, new: NewTrainer) -> TrainerId {
        let now = self.inner.clock.now_millis();
        let trainer = self.inner.state.write().trainers.insert(new, now);
        let id = trainer.id;
        debug!(trainer_id = id.0, "trainer added");
        self.publish(StoreEvent::TrainerAdded { trainer });
        id
    }

    pub fn update_trainer(&self, id: TrainerId, patch: TrainerPatch) -> bool {
        let updated = self.inner.state.write().trainers.update(id, patch);
        match updated {
            Some(trainer) => {
                debug!(trainer_id = id.0, "trainer updated");
                self.publish(StoreEvent::TrainerUpdated { trainer });
                true
            }
            None => {
                debug!(trainer_id = id.0, "update ignored, trainer not found");
                false
            }
        }
    }

    pub fn delete_trainer(&self, id: TrainerId) -> bool {
        let removed = self.inner.state.write().trainers.remove(id);
        if removed.is_some() {
            debug!(trainer_id = id.0, "trainer deleted");
            self.publish(StoreEvent::TrainerDeleted { trainer_id: id });
        }
        removed.is_some()
    }

    /// Restores both collections to what the store was created with.
    pub fn reset(&self) {
        *self.inner.state.write() = self.inner.seed.clone();
        debug!("entity store reset to seed data");
        self.publish(StoreEvent::Reset);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
