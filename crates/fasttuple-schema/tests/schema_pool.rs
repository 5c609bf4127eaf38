//! Integration test: schema-owned pools.
//!
//! Pools built by a schema allocate lazily from the schema's storage,
//! honour the pool sizing given to the builder, and can be shared across
//! threads.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use fasttuple_core::{Record, RecordMut};
use fasttuple_pool::{Pool, PoolError};
use fasttuple_schema::{HeapRecord, Storage};
use fasttuple_test_utils::long_int_short;

#[test]
fn direct_pool_checks_out_and_reuses_records() {
    let schema = long_int_short().pool_of_size(3).direct_memory().build().unwrap();
    let pool = schema.pool();

    let mut held: Vec<_> = (0..3).map(|_| pool.checkout().unwrap()).collect();
    for (i, r) in held.iter_mut().enumerate() {
        r.set_long(1, (i as i64 + 1) * 100).unwrap();
    }
    let addresses: Vec<_> = held.iter().map(|r| r.as_ptr()).collect();
    for r in held {
        pool.release(r).unwrap();
    }

    let again = pool.checkout().unwrap();
    assert!(addresses.contains(&again.as_ptr()));
    assert_eq!(pool.size(), 3);
    pool.release(again).unwrap();
    pool.close();
}

#[test]
fn non_expanding_pool_of_two_is_exhausted_by_a_third_checkout() {
    let schema = long_int_short().pool_of_size(2).heap_memory().build().unwrap();
    let pool = schema.pool();
    let a = pool.checkout().unwrap();
    let _b = pool.checkout().unwrap();
    assert_eq!(pool.checkout().unwrap_err(), PoolError::Exhausted { size: 2 });
    pool.release(a).unwrap();
    assert!(pool.checkout().is_ok());
}

#[test]
fn expanding_pool_of_two_grows_to_four() {
    let schema = long_int_short()
        .pool_of_size(2)
        .expanding_pool()
        .direct_memory()
        .build()
        .unwrap();
    let pool = schema.pool();
    let held: Vec<_> = (0..3).map(|_| pool.checkout().unwrap()).collect();
    assert_eq!(pool.size(), 4);
    drop(held);
}

#[test]
fn closed_schema_pool_rejects_checkout() {
    let schema = long_int_short().pool_of_size(2).heap_memory().build().unwrap();
    schema.pool().close();
    assert_eq!(schema.pool().checkout().unwrap_err(), PoolError::Closed);
}

#[test]
fn custom_pool_over_schema_storage_runs_initializer() {
    let schema = long_int_short().heap_memory().build().unwrap();
    let storage = schema.storage().clone();
    let pool: Pool<HeapRecord> = Pool::builder(2)
        .initializer(|r: &mut HeapRecord| {
            r.set_int(2, 999).unwrap();
        })
        .build(
            move |count: usize| storage.allocate_batch(count),
            |_: Vec<HeapRecord>| {},
        );

    let mut r = pool.checkout().unwrap();
    assert_eq!(r.get_int(2), Ok(999));
    r.set_int(2, 123).unwrap();
    pool.release(r).unwrap();

    let r = pool.checkout().unwrap();
    assert_eq!(r.get_int(2), Ok(999));
}

#[test]
fn shared_pool_serves_many_threads() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 50;

    let schema = Arc::new(
        long_int_short()
            .pool_of_size(8)
            .expanding_pool()
            .direct_memory()
            .build()
            .unwrap(),
    );
    let (tx, rx) = bounded(THREADS * PER_THREAD);

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let schema = Arc::clone(&schema);
            let tx = tx.clone();
            thread::spawn(move || {
                for n in 0..PER_THREAD {
                    let mut r = schema.pool().checkout().unwrap();
                    let tag = (t * PER_THREAD + n) as i64;
                    r.set_long(1, tag).unwrap();
                    assert_eq!(r.get_long(1), Ok(tag));
                    tx.send(tag).unwrap();
                    schema.pool().release(r).unwrap();
                }
            })
        })
        .collect();
    drop(tx);
    for w in workers {
        w.join().unwrap();
    }

    let mut tags: Vec<i64> = rx.iter().collect();
    tags.sort_unstable();
    assert_eq!(tags, (0..(THREADS * PER_THREAD) as i64).collect::<Vec<_>>());
    assert_eq!(schema.pool().available(), schema.pool().size());
    assert!(schema.pool().size() <= THREADS.max(8) * 2);
}

#[test]
fn per_worker_pools_are_independent() {
    let schema = long_int_short().pool_of_size(1).heap_memory().build().unwrap();
    let first = schema.new_pool();
    let second = schema.new_pool();
    let _a = first.checkout().unwrap();
    assert!(first.checkout().is_err());
    assert!(second.checkout().is_ok());
    assert_eq!(schema.pool().size(), 0);
}
