//! Integration tests for concurrent session access
//!
//! Distinct session ids analyzed in parallel must never observe each
//! other's counters.

mod helpers;

use std::sync::Arc;

use fitrep_common::config::SessionConfig;
use tokio::task::JoinSet;

use helpers::{pose_with_angles, test_pipeline};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_sessions_count_independently() {
    let pipeline = Arc::new(test_pipeline(&SessionConfig::default()));
    let mut join_set = JoinSet::new();

    for i in 0..8u32 {
        let pipeline = Arc::clone(&pipeline);
        join_set.spawn(async move {
            let session_id = format!("athlete-{}", i);
            let top = pose_with_angles(170.0, 175.0, 175.0);
            let bottom = pose_with_angles(80.0, 175.0, 175.0);

            // Session i performs i + 1 push-ups
            pipeline.analyze(Some(&top), "push-up", &session_id);
            for _ in 0..=i {
                pipeline.analyze(Some(&bottom), "push-up", &session_id);
                pipeline.analyze(Some(&top), "push-up", &session_id);
                tokio::task::yield_now().await;
            }
            (i, session_id)
        });
    }

    let mut finished = 0;
    while let Some(result) = join_set.join_next().await {
        let (i, session_id) = result.expect("Task panicked");
        let state = pipeline.sessions().peek(&session_id).unwrap();
        assert_eq!(state.counter, i + 1, "{} has wrong count", session_id);
        finished += 1;
    }

    assert_eq!(finished, 8);
    assert_eq!(pipeline.sessions().len(), 8);
}

#[test]
fn test_threads_sharing_store_above_watermark() {
    let config = SessionConfig {
        idle_timeout_secs: 600,
        cleanup_watermark: 2,
    };
    let pipeline = Arc::new(test_pipeline(&config));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || {
                let session_id = format!("walker-{}", i);
                for leg in [150.0, 100.0, 150.0, 100.0] {
                    let pose = pose_with_angles(170.0, leg, 170.0);
                    pipeline.analyze(Some(&pose), "walk", &session_id);
                }
                session_id
            })
        })
        .collect();

    for handle in handles {
        let session_id = handle.join().expect("Thread panicked");
        // Nothing is stale, so sweeps above the watermark keep every session
        assert_eq!(pipeline.sessions().peek(&session_id).unwrap().counter, 2);
    }
    assert_eq!(pipeline.sessions().len(), 6);
}
