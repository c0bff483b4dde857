//! Re-entrancy guard for long-running per-session work (export, enhancement).
//!
//! Lives outside the session mutex so a handler can hold its guard across an
//! await without blocking other edits to the same session.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::enhance::EnhanceTarget;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusyKey {
    Export,
    Enhance(EnhanceTarget),
}

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<BusyKey>>>,
}

impl InFlight {
    /// Marks `key` busy. Returns `None` if it already is.
    pub fn try_acquire(&self, key: BusyKey) -> Option<InFlightGuard> {
        if !lock(&self.keys).insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    #[cfg(test)]
    pub fn is_busy(&self, key: &BusyKey) -> bool {
        lock(&self.keys).contains(key)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<BusyKey>>>,
    key: BusyKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.keys).remove(&self.key);
    }
}

// The set is only touched by insert/remove; a poisoned lock still holds a
// consistent set.
fn lock(keys: &Mutex<HashSet<BusyKey>>) -> MutexGuard<'_, HashSet<BusyKey>> {
    keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected_while_held() {
        let in_flight = InFlight::default();
        let guard = in_flight.try_acquire(BusyKey::Export);
        assert!(guard.is_some());
        assert!(in_flight.try_acquire(BusyKey::Export).is_none());
    }

    #[test]
    fn test_drop_releases_key() {
        let in_flight = InFlight::default();
        {
            let _guard = in_flight.try_acquire(BusyKey::Export);
            assert!(in_flight.is_busy(&BusyKey::Export));
        }
        assert!(!in_flight.is_busy(&BusyKey::Export));
        assert!(in_flight.try_acquire(BusyKey::Export).is_some());
    }

    #[test]
    fn test_distinct_targets_do_not_block_each_other() {
        let in_flight = InFlight::default();
        let a = BusyKey::Enhance(EnhanceTarget::ExperienceDescription {
            item_id: "a".to_string(),
        });
        let b = BusyKey::Enhance(EnhanceTarget::ExperienceDescription {
            item_id: "b".to_string(),
        });
        let _ga = in_flight.try_acquire(a).unwrap();
        assert!(in_flight.try_acquire(b).is_some());
        assert!(in_flight.try_acquire(BusyKey::Enhance(EnhanceTarget::Summary)).is_some());
    }
}
