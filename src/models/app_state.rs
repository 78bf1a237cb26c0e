use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, info};
use uuid::Uuid;

use super::SetupRecord;
use crate::error::SetupError;

/// Application state shared between connections
#[derive(Default)]
pub struct AppState {
    pub setups: SetupStore,
}

/// How long an unclaimed setup waits for its match screen.
pub const SETUP_TTL: Duration = Duration::from_secs(10 * 60);

struct StoredSetup {
    record: SetupRecord,
    stored_at: Instant,
}

/// Handoff records written by the setup screen and waiting for a match
/// screen to pick them up.
///
/// Records older than the store's ttl are dropped on the next `put`.
pub struct SetupStore {
    records: Mutex<HashMap<String, StoredSetup>>,
    ttl: Duration,
}

impl Default for SetupStore {
    fn default() -> Self {
        Self::with_ttl(SETUP_TTL)
    }
}

impl SetupStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, StoredSetup>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a validated record and returns the id the match screen
    /// must present to claim it.
    pub fn put(&self, record: SetupRecord) -> Result<String, SetupError> {
        self.put_at(record, Instant::now())
    }

    pub(crate) fn put_at(&self, record: SetupRecord, now: Instant) -> Result<String, SetupError> {
        record.validate()?;
        let id = Uuid::new_v4().to_string();
        info!(
            "Stored setup {}: {} vs {}",
            id, record.player_a.name, record.player_b.name
        );
        let mut records = self.records();
        let before = records.len();
        records.retain(|_, stored| now.saturating_duration_since(stored.stored_at) <= self.ttl);
        if records.len() < before {
            debug!("Expired {} unclaimed setup(s)", before - records.len());
        }
        records.insert(id.clone(), StoredSetup { record, stored_at: now });
        Ok(id)
    }

    /// Reads a record once. A second `take` with the same id fails.
    pub fn take(&self, id: &str) -> Result<SetupRecord, SetupError> {
        let record = self
            .records()
            .remove(id)
            .map(|stored| stored.record)
            .ok_or_else(|| SetupError::Missing(id.to_string()))?;
        record.validate()?;
        info!("Setup {} handed to the match screen", id);
        Ok(record)
    }

    /// Drops a record that will never be claimed.
    pub fn discard(&self, id: &str) -> bool {
        self.records().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Side};

    fn record() -> SetupRecord {
        SetupRecord {
            player_a: Player::new("Ann", Side::Black, 600),
            player_b: Player::new("Bob", Side::White, 600),
            current_turn: Side::White,
        }
    }

    #[test]
    fn records_are_read_once() {
        let store = SetupStore::default();
        let id = store.put(record()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.take(&id).unwrap(), record());
        assert_eq!(store.take(&id), Err(SetupError::Missing(id.clone())));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_records_are_refused() {
        let store = SetupStore::default();
        let mut bad = record();
        bad.player_b.color = Side::Black;
        assert!(store.put(bad).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn discard_removes_unclaimed_records() {
        let store = SetupStore::default();
        let id = store.put(record()).unwrap();
        assert!(store.discard(&id));
        assert!(!store.discard(&id));
    }

    #[test]
    fn stale_records_expire_on_the_next_put() {
        let store = SetupStore::with_ttl(Duration::from_secs(60));
        let t0 = Instant::now();
        let stale = store.put_at(record(), t0).unwrap();
        let kept = store.put_at(record(), t0 + Duration::from_secs(30)).unwrap();
        assert_eq!(store.len(), 2);

        let fresh = store.put_at(record(), t0 + Duration::from_secs(61)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.take(&stale), Err(SetupError::Missing(stale.clone())));
        assert!(store.take(&kept).is_ok());
        assert!(store.take(&fresh).is_ok());
    }
}
