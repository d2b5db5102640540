//! Integration tests for the `lifecycle_pool` package.
//!
//! These exercise the pool purely through its public API, the way game-loop clients use it.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "we do not need to worry about these things when writing test code"
)]

use std::cell::RefCell;
use std::rc::Rc;

use lifecycle_pool::{Error, Identity, ObjectPool, PoolConfig};

/// A pooled object with observable lifecycle state.
#[derive(Debug)]
struct Shot {
    serial: u32,
    active: bool,
    age: f32,
}

#[derive(Debug, Default)]
struct Counters {
    created: u32,
    got: u32,
    released: u32,
    destroyed: Vec<u32>,
}

fn shot_pool(counters: &Rc<RefCell<Counters>>, config: PoolConfig) -> ObjectPool<Box<Shot>> {
    let on_create = Rc::clone(counters);
    let on_get = Rc::clone(counters);
    let on_release = Rc::clone(counters);
    let on_destroy = Rc::clone(counters);

    ObjectPool::builder(move || {
        let mut counters = on_create.borrow_mut();
        counters.created += 1;
        Box::new(Shot {
            serial: counters.created,
            active: false,
            age: 0.0,
        })
    })
    .on_get(move |shot| {
        shot.active = true;
        on_get.borrow_mut().got += 1;
    })
    .on_release(move |shot| {
        shot.active = false;
        shot.age = 0.0;
        on_release.borrow_mut().released += 1;
    })
    .on_destroy(move |shot| on_destroy.borrow_mut().destroyed.push(shot.serial))
    .config(config)
    .build()
    .unwrap()
}

fn config(default_capacity: usize, max_size: usize) -> PoolConfig {
    PoolConfig {
        collection_check: true,
        default_capacity,
        max_size,
    }
}

#[test]
fn prewarm_get_and_overflow_scenario() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut pool = shot_pool(&counters, config(2, 2));

    // Client-side pre-warming: release freshly created instances.
    for serial in [101, 102] {
        pool.release(Box::new(Shot {
            serial,
            active: false,
            age: 0.0,
        }))
        .unwrap();
    }
    assert_eq!(pool.count_inactive(), 2);

    let shot = pool.get();
    assert_eq!(pool.count_inactive(), 1);
    assert!(shot.active);
    assert_eq!(shot.serial, 102);
    assert_eq!(counters.borrow().got, 1);

    pool.release(Box::new(Shot {
        serial: 103,
        active: false,
        age: 0.0,
    }))
    .unwrap();
    assert_eq!(pool.count_inactive(), 2);

    // The pool is full now, so the next release is destroyed.
    pool.release(Box::new(Shot {
        serial: 104,
        active: false,
        age: 0.0,
    }))
    .unwrap();
    assert_eq!(pool.count_inactive(), 2);
    assert_eq!(counters.borrow().destroyed, vec![104]);

    drop(shot);
}

#[test]
fn lifo_reuse_order() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut pool = shot_pool(&counters, config(0, 10));

    let a = pool.get();
    let b = pool.get();
    let (a_id, b_id) = (a.identity(), b.identity());

    pool.release(a).unwrap();
    pool.release(b).unwrap();

    assert_eq!(pool.get().identity(), b_id);
    assert_eq!(pool.get().identity(), a_id);
    assert_eq!(counters.borrow().created, 2);
}

#[test]
fn released_instances_are_reset() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut pool = shot_pool(&counters, config(1, 1));

    let mut shot = pool.get();
    shot.age = 9.5;
    pool.release(shot).unwrap();

    let shot = pool.get();
    assert!(shot.age.abs() < f32::EPSILON);
    assert!(shot.active);
}

#[test]
fn overflow_is_destroyed_never_retained() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut pool = shot_pool(&counters, config(0, 3));

    let shots: Vec<_> = (0..5).map(|_| pool.get()).collect();
    for shot in shots {
        pool.release(shot).unwrap();
        assert!(pool.count_inactive() <= pool.max_size());
    }

    let counters = counters.borrow();
    assert_eq!(counters.released, 3);
    assert_eq!(counters.destroyed, vec![4, 5]);
    assert_eq!(pool.count_inactive(), 3);
    assert_eq!(pool.count_active(), 0);
}

#[test]
fn double_release_with_shared_handles() {
    let mut pool = ObjectPool::builder(|| Rc::new(RefCell::new(0_u32)))
        .collection_check(true)
        .build()
        .unwrap();

    let enemy = pool.get();
    let same_enemy = Rc::clone(&enemy);

    pool.release(enemy).unwrap();
    let error = pool.release(same_enemy).unwrap_err();

    assert_eq!(error, Error::DoubleRelease);
    assert_eq!(pool.count_inactive(), 1);
}

#[test]
fn invalid_configuration_is_rejected() {
    let result = ObjectPool::builder(|| Box::new(0_u8))
        .default_capacity(5)
        .max_size(4)
        .build();

    assert!(matches!(
        result,
        Err(Error::InvalidConfiguration {
            default_capacity: 5,
            max_size: 4,
        })
    ));
}

#[test]
fn dropping_pool_destroys_idle_but_not_active() {
    let counters = Rc::new(RefCell::new(Counters::default()));
    let mut pool = shot_pool(&counters, config(4, 4));

    pool.prewarm(4).unwrap();
    let held = pool.get();

    drop(pool);

    assert_eq!(counters.borrow().destroyed.len(), 3);
    assert!(held.active);
}
