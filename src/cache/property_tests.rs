//! Property-Based Tests for Cache Module
//!
//! Checks the storage engine against a plain HashMap model and exercises the
//! capacity and concurrency guarantees of the in-process cache.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::{CacheLayer, CacheStore, KeyTtl, MemoryCache};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const DAY_SECS: u64 = 86_400;

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}".prop_map(|id| format!("turbo-kit:post:{id}"))
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    SetEx { key: String, value: String },
    Get { key: String },
    Expire { key: String },
    Invalidate { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::SetEx { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Expire { key }),
        key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Below capacity and within a day, the store behaves like a map whose
    // EXPIRE 0 deletes and whose other operations never lose values.
    #[test]
    fn prop_store_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let mut model: HashMap<String, (String, bool)> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(&key, value.clone(), None).unwrap();
                    model.insert(key, (value, false));
                }
                CacheOp::SetEx { key, value } => {
                    store.set(&key, value.clone(), Some(DAY_SECS)).unwrap();
                    model.insert(key, (value, true));
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).map(|(v, _)| v.clone());
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Expire { key } => {
                    let existed = model.contains_key(&key);
                    prop_assert_eq!(store.expire(&key, DAY_SECS), existed);
                    if let Some(entry) = model.get_mut(&key) {
                        entry.1 = true;
                    }
                }
                CacheOp::Invalidate { key } => {
                    let existed = model.remove(&key).is_some();
                    prop_assert_eq!(store.expire(&key, 0), existed);
                }
            }
        }

        prop_assert_eq!(store.len(), model.len());
        for (key, (_, expiring)) in &model {
            match store.ttl(key) {
                KeyTtl::Expires(secs) => {
                    prop_assert!(*expiring, "unexpected deadline on {}", key);
                    prop_assert!(secs <= DAY_SECS && secs >= DAY_SECS - 1);
                }
                KeyTtl::Persistent => prop_assert!(!*expiring, "missing deadline on {}", key),
                KeyTtl::Missing => prop_assert!(false, "key {} vanished", key),
            }
        }
    }

    // The store never holds more than its capacity, and every eviction is counted.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..10,
        keys in prop::collection::vec(key_strategy(), 1..40)
    ) {
        let mut store = CacheStore::new(capacity);
        let mut distinct = std::collections::HashSet::new();

        for key in &keys {
            store.set(key, "v".to_string(), None).unwrap();
            distinct.insert(key.clone());
            prop_assert!(store.len() <= capacity);
        }

        let expected_evictions = distinct.len().saturating_sub(capacity) as u64;
        prop_assert!(store.evictions() >= expected_evictions);
        prop_assert_eq!(store.len(), distinct.len().min(capacity));
    }

    // The most recently written key always survives an eviction.
    #[test]
    fn prop_latest_write_survives(
        keys in prop::collection::vec(key_strategy(), 2..30)
    ) {
        let mut store = CacheStore::new(2);
        for key in &keys {
            store.set(key, key.clone(), None).unwrap();
            prop_assert_eq!(store.get(key), Some(key.clone()));
        }
    }

    // Concurrent writers of the same key leave exactly one complete value.
    #[test]
    fn prop_concurrent_writers_last_write_wins(
        values in prop::collection::vec("[a-z]{1,32}", 2..16)
    ) {
        let final_value = tokio_test::block_on(async {
            let cache = MemoryCache::new(TEST_MAX_ENTRIES);
            let handles: Vec<_> = values
                .iter()
                .cloned()
                .map(|value| {
                    let cache = cache.clone();
                    tokio::spawn(async move {
                        cache.set_ex("turbo-kit:post:shared", value, DAY_SECS).await
                    })
                })
                .collect();

            for handle in handles {
                handle.await.unwrap().unwrap();
            }
            assert_eq!(cache.len().await, 1);
            cache.get("turbo-kit:post:shared").await.unwrap()
        });

        let final_value = final_value.unwrap();
        prop_assert!(values.contains(&final_value));
    }
}
