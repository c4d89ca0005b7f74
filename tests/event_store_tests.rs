//! Event Store Integration Tests
//!
//! Properties of the bounded store:
//! - Accounting identity across ingests and clears
//! - Capacity bound and FIFO eviction
//! - Consistency under concurrent writers and readers

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use edgequota_events::event_store::{EventStore, EventStoreConfig, MAX_RETAINED};
use edgequota_events::types::UsageEvent;
use proptest::prelude::*;

fn batch(tag: &str, allowed: usize, denied: usize) -> Vec<UsageEvent> {
    let mut events = Vec::with_capacity(allowed + denied);
    for i in 0..allowed {
        events.push(UsageEvent::new(format!("{}-a{}", tag, i), true).with_tenant(tag));
    }
    for i in 0..denied {
        events.push(UsageEvent::new(format!("{}-d{}", tag, i), false).with_tenant(tag));
    }
    events
}

#[test]
fn test_publish_list_stats_clear_flow() {
    let store = EventStore::new();
    store.ingest(batch("t", 3, 2));

    let stats = store.stats();
    assert_eq!(stats.total_received, 5);
    assert_eq!(stats.total_allowed, 3);
    assert_eq!(stats.total_denied, 2);
    assert_eq!(stats.stored_events, 5);

    let listed = store.list(None, 10);
    let keys: Vec<&str> = listed.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["t-d1", "t-d0", "t-a2", "t-a1", "t-a0"]);

    store.clear();
    assert_eq!(store.stats().total_received, 0);
    assert_eq!(store.stats().stored_events, 0);
    assert!(store.list(None, 100).is_empty());
}

#[test]
fn test_default_capacity_fifo_eviction() {
    let store = EventStore::new();
    let total = MAX_RETAINED + 250;
    let events: Vec<UsageEvent> = (0..total)
        .map(|i| UsageEvent::new(format!("k{}", i), i % 2 == 0))
        .collect();

    for chunk in events.chunks(1000) {
        store.ingest(chunk.to_vec());
    }

    let stats = store.stats();
    assert_eq!(stats.total_received, total as u64);
    assert_eq!(stats.stored_events, MAX_RETAINED);

    let listed = store.list(None, MAX_RETAINED * 2);
    assert_eq!(listed.len(), MAX_RETAINED);
    for (offset, event) in listed.iter().rev().enumerate() {
        assert_eq!(event.key, format!("k{}", 250 + offset));
    }
}

#[test]
fn test_concurrent_ingest_no_lost_updates() {
    const WRITERS: usize = 8;
    const BATCHES: usize = 50;
    const BATCH_SIZE: usize = 7;

    let store = Arc::new(EventStore::new());
    let mut handles = Vec::new();

    for w in 0..WRITERS {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for b in 0..BATCHES {
                store.ingest(batch(&format!("w{}b{}", w, b), 4, 3));
            }
        }));
    }
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                let stats = store.stats();
                assert_eq!(stats.total_received, stats.total_allowed + stats.total_denied);
                let _ = store.list(None, 50);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = store.stats();
    let expected = (WRITERS * BATCHES * BATCH_SIZE) as u64;
    assert_eq!(stats.total_received, expected);
    assert_eq!(stats.total_allowed, (WRITERS * BATCHES * 4) as u64);
    assert_eq!(stats.total_denied, (WRITERS * BATCHES * 3) as u64);
    assert_eq!(stats.stored_events, WRITERS * BATCHES * BATCH_SIZE);
}

#[test]
fn test_concurrent_readers_never_see_torn_batches() {
    const BATCH_SIZE: usize = 5;

    let store = Arc::new(EventStore::with_config(EventStoreConfig::new(1000)));
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for b in 0..500 {
                store.ingest(batch(&format!("b{}", b), 3, 2));
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::SeqCst) {
                    // Capacity is a multiple of the batch size, so every
                    // batch present in the window is present in full.
                    let snapshot = store.list(None, usize::MAX);
                    let mut per_batch: HashMap<String, usize> = HashMap::new();
                    for event in &snapshot {
                        *per_batch.entry(event.tenant_key.clone()).or_insert(0) += 1;
                    }
                    assert!(per_batch.values().all(|&n| n == BATCH_SIZE));

                    let stats = store.stats();
                    assert!(stats.stored_events <= 1000);
                    assert_eq!(stats.stored_events % BATCH_SIZE, 0);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(store.stats().total_received, 2500);
    assert_eq!(store.len(), 1000);
}

#[test]
fn test_concurrent_clear_keeps_counters_consistent() {
    let store = Arc::new(EventStore::with_config(EventStoreConfig::new(100)));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    if t == 0 && i % 10 == 0 {
                        store.clear();
                    } else {
                        store.ingest(batch("c", 2, 1));
                    }
                    let stats = store.stats();
                    assert_eq!(stats.total_received, stats.total_allowed + stats.total_denied);
                    assert!(stats.stored_events as u64 <= stats.total_received);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

proptest! {
    #[test]
    fn accounting_identity_holds(
        batches in proptest::collection::vec((0usize..20, 0usize..20, any::<bool>()), 0..30)
    ) {
        let store = EventStore::with_config(EventStoreConfig::new(25));
        let mut allowed = 0u64;
        let mut denied = 0u64;

        for (i, (a, d, clear_first)) in batches.into_iter().enumerate() {
            if clear_first {
                store.clear();
                allowed = 0;
                denied = 0;
            }
            let summary = store.ingest(batch(&format!("b{}", i), a, d));
            prop_assert_eq!(summary.accepted, a + d);
            allowed += a as u64;
            denied += d as u64;

            let stats = store.stats();
            prop_assert_eq!(stats.total_allowed, allowed);
            prop_assert_eq!(stats.total_denied, denied);
            prop_assert_eq!(stats.total_received, allowed + denied);
            prop_assert!(stats.stored_events <= 25);
            prop_assert_eq!(stats.stored_events as u64, (allowed + denied).min(25));
        }
    }

    #[test]
    fn list_returns_newest_matching_first(
        tenants in proptest::collection::vec(prop_oneof![Just(""), Just("a"), Just("b")], 0..60),
        limit in 1usize..80
    ) {
        let store = EventStore::with_config(EventStoreConfig::new(40));
        let events: Vec<UsageEvent> = tenants
            .iter()
            .enumerate()
            .map(|(i, t)| UsageEvent::new(i.to_string(), true).with_tenant(*t))
            .collect();
        store.ingest(events);

        let retained_from = tenants.len().saturating_sub(40);
        let expected: Vec<String> = (retained_from..tenants.len())
            .rev()
            .filter(|&i| tenants[i] == "a")
            .take(limit)
            .map(|i| i.to_string())
            .collect();

        let listed: Vec<String> = store
            .list(Some("a"), limit)
            .iter()
            .map(|e| e.key.clone())
            .collect();
        prop_assert_eq!(listed, expected);
    }
}
