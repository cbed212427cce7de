/*!
 * Synchronization Primitives Integration Tests
 *
 * Join barrier behavior from plain threads and from worker pools
 */

use concurrency_playground::core::guard::BarrierGuard;
use concurrency_playground::core::sync::JoinBarrier;
use concurrency_playground::BarrierError;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_zero_barrier_wait_returns_without_reports() {
    let barrier = JoinBarrier::new("empty", 0);
    let start = Instant::now();
    barrier.wait();
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[test]
fn test_concurrent_reports_are_all_counted() {
    let barrier = JoinBarrier::shared("fan-out", 64);

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let barrier = barrier.clone();
            thread::spawn(move || barrier.report_done().unwrap())
        })
        .collect();

    barrier.wait();
    assert_eq!(barrier.completed(), 64);

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_wait_sees_worker_writes() {
    let barrier = JoinBarrier::shared("visibility", 4);
    let slots: Arc<Vec<AtomicUsize>> = Arc::new((0..4).map(|_| AtomicUsize::new(0)).collect());

    for i in 0..4 {
        let barrier = barrier.clone();
        let slots = slots.clone();
        thread::spawn(move || {
            // Relaxed on purpose: the barrier provides the ordering
            slots[i].store(i + 1, Ordering::Relaxed);
            barrier.report_done().unwrap();
        });
    }

    barrier.wait();
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(slot.load(Ordering::Relaxed), i + 1);
    }
}

#[test]
fn test_multiple_waiters_released_together() {
    let barrier = JoinBarrier::shared("many-waiters", 1);

    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                barrier.remaining()
            })
        })
        .collect();

    // Give threads time to wait
    thread::sleep(Duration::from_millis(50));
    barrier.report_done().unwrap();

    for waiter in waiters {
        assert_eq!(waiter.join().unwrap(), 0);
    }
}

#[test]
fn test_over_report_is_loud() {
    let barrier = JoinBarrier::new("pair", 2);
    barrier.report_done().unwrap();
    barrier.report_done().unwrap();

    match barrier.report_done() {
        Err(BarrierError::OverReport { barrier: name, expected }) => {
            assert_eq!(name, "pair");
            assert_eq!(expected, 2);
        }
        other => panic!("expected OverReport, got {:?}", other),
    }
    assert_eq!(barrier.remaining(), 0);
}

#[test]
fn test_panicking_thread_releases_barrier_through_guard() {
    let barrier = JoinBarrier::shared("guarded-threads", 2);

    let ok = {
        let barrier = barrier.clone();
        thread::spawn(move || {
            let done = BarrierGuard::new(barrier, "ok");
            done.complete().unwrap();
        })
    };
    let failing = {
        let barrier = barrier.clone();
        thread::spawn(move || {
            let _done = BarrierGuard::new(barrier, "failing");
            panic!("simulated worker failure");
        })
    };

    barrier.wait();
    assert!(ok.join().is_ok());
    assert!(failing.join().is_err());
    assert_eq!(barrier.completed(), 2);
}

#[test]
fn test_rearm_for_second_batch() {
    let barrier = JoinBarrier::shared("batches", 2);

    for batch in 0..3 {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let barrier = barrier.clone();
                thread::spawn(move || barrier.report_done().unwrap())
            })
            .collect();
        barrier.wait();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(barrier.is_complete(), "batch {} not drained", batch);
        barrier.rearm(2).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_wait_returns_after_exactly_n_reports(n in 0usize..24) {
        let barrier = JoinBarrier::shared("prop", n);

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let barrier = barrier.clone();
                thread::spawn(move || barrier.report_done().unwrap())
            })
            .collect();

        barrier.wait();
        prop_assert_eq!(barrier.completed(), n);
        prop_assert!(barrier.report_done().is_err());

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
