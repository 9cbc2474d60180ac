use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::models::EventRecord;
use crate::store::{EventStore, StoreError};

/// In-memory event store; keeps insertion order like a small table scan would.
#[derive(Default)]
pub struct MockEventStore {
    events: Mutex<Vec<EventRecord>>,
    fail: AtomicBool,
}

impl MockEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Backend("simulated failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EventStore for MockEventStore {
    async fn create_event(&self, event: EventRecord) -> Result<EventRecord, StoreError> {
        self.check()?;
        let mut events = self.events.lock().unwrap();
        if events.iter().any(|e| e.event_id == event.event_id) {
            return Err(StoreError::AlreadyExists);
        }
        events.push(event.clone());
        Ok(event)
    }

    async fn list_events(&self, limit: usize) -> Result<Vec<EventRecord>, StoreError> {
        self.check()?;
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.event_id != event_id);
        if events.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
