// src/store.rs
//! In-memory CV document store: the single shared aggregate plus its
//! mutation operations and change notification.
//!
//! Execution is single-threaded and event-driven; every mutation is fully
//! applied before subscribers run, so an observer never sees a
//! half-updated document.

use chrono::Utc;
use tracing::{debug, info};

use crate::types::{CvData, EducationDraft, ExperienceDraft, PersonalInfo};

/// Handle for removing a change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Millisecond-timestamp id source, bumped on collision so ids stay unique
/// even for same-millisecond inserts.
#[derive(Debug, Default)]
struct IdSource {
    last: i64,
}

impl IdSource {
    fn next(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last.to_string()
    }
}

type Subscriber = Box<dyn FnMut(&CvData)>;

/// Owned document container scoped to one authoring session. Callers hold
/// the store and pass handles; there is no ambient singleton.
pub struct CvStore {
    data: CvData,
    ids: IdSource,
    revision: u64,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl Default for CvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CvStore {
    /// Empty document for a fresh session.
    pub fn new() -> Self {
        Self {
            data: CvData::default(),
            ids: IdSource::default(),
            revision: 0,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Current committed snapshot.
    pub fn data(&self) -> &CvData {
        &self.data
    }

    /// Monotonic counter, incremented once per applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a change callback. It runs synchronously after every
    /// mutation with the complete post-mutation document.
    pub fn subscribe(&mut self, callback: impl FnMut(&CvData) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn commit(&mut self) {
        self.revision += 1;
        let data = &self.data;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(data);
        }
    }

    /// Replace the personal-info record wholesale. Validation happened
    /// upstream in the form binding.
    pub fn update_personal_info(&mut self, info: PersonalInfo) {
        self.data.personal_info = info;
        info!("personal info updated");
        self.commit();
    }

    /// Append a validated experience; the store mints the id.
    pub fn add_experience(&mut self, draft: ExperienceDraft) -> String {
        let id = self.ids.next();
        self.data.experiences.push(draft.into_experience(id.clone()));
        info!(id = %id, "experience added");
        self.commit();
        id
    }

    /// Remove the experience with the given id. Missing ids are a no-op.
    pub fn delete_experience(&mut self, id: &str) -> bool {
        let before = self.data.experiences.len();
        self.data.experiences.retain(|e| e.id != id);
        if self.data.experiences.len() == before {
            debug!(id = %id, "delete_experience: id not found");
            return false;
        }
        info!(id = %id, "experience deleted");
        self.commit();
        true
    }

    /// Append a validated education entry; the store mints the id.
    pub fn add_education(&mut self, draft: EducationDraft) -> String {
        let id = self.ids.next();
        self.data.education.push(draft.into_education(id.clone()));
        info!(id = %id, "education added");
        self.commit();
        id
    }

    /// Remove the education entry with the given id. Missing ids are a
    /// no-op.
    pub fn delete_education(&mut self, id: &str) -> bool {
        let before = self.data.education.len();
        self.data.education.retain(|e| e.id != id);
        if self.data.education.len() == before {
            debug!(id = %id, "delete_education: id not found");
            return false;
        }
        info!(id = %id, "education deleted");
        self.commit();
        true
    }
}
