//! Test Helper Utilities
//!
//! Shared pose builders and app setup for fitrep-fa integration tests

#![allow(dead_code)]

use std::sync::Arc;

use fitrep_common::config::SessionConfig;
use fitrep_common::{Landmark, PoseLandmark, POSE_LANDMARK_COUNT};
use fitrep_fa::{build_router, AppState, FrameAnalysisPipeline, SessionStore};
use serde_json::Value;

const SEGMENT: f64 = 0.2;
const FOREARM: f64 = 0.15;

fn offset(from: Landmark, length: f64, degrees: f64) -> Landmark {
    let radians = degrees.to_radians();
    Landmark::new(from.x + length * radians.cos(), from.y + length * radians.sin())
}

/// Build a 33-point pose whose joint angles are exactly `arm`, `leg` and
/// `trunk` degrees on both sides
///
/// Angles must lie in [0, 180]. Landmarks not feeding an angle sit at the
/// image centre.
pub fn pose_with_angles(arm: f64, leg: f64, trunk: f64) -> Vec<Landmark> {
    let mut pose = vec![Landmark::new(0.5, 0.5); POSE_LANDMARK_COUNT];

    let hip = Landmark::new(0.5, 0.5);
    let shoulder = offset(hip, SEGMENT, -90.0);
    let knee = offset(hip, SEGMENT, -90.0 + trunk);
    // Direction knee → hip is the hip → knee direction reversed
    let ankle = offset(knee, SEGMENT, 90.0 + trunk + leg);
    let elbow = offset(shoulder, FOREARM, 0.0);
    let wrist = offset(elbow, FOREARM, 180.0 + arm);

    use PoseLandmark::*;
    for (which, point) in [
        (LeftShoulder, shoulder),
        (RightShoulder, shoulder),
        (LeftElbow, elbow),
        (RightElbow, elbow),
        (LeftWrist, wrist),
        (RightWrist, wrist),
        (LeftHip, hip),
        (RightHip, hip),
        (LeftKnee, knee),
        (RightKnee, knee),
        (LeftAnkle, ankle),
        (RightAnkle, ankle),
    ] {
        pose[which.index()] = point;
    }
    pose
}

/// [`pose_with_angles`] in wire form
pub fn pose_json(arm: f64, leg: f64, trunk: f64) -> Value {
    serde_json::to_value(pose_with_angles(arm, leg, trunk)).unwrap()
}

/// Push-up frames: top, bottom, top
pub fn push_up_rep() -> Vec<Vec<Landmark>> {
    vec![
        pose_with_angles(170.0, 175.0, 175.0),
        pose_with_angles(80.0, 175.0, 175.0),
        pose_with_angles(170.0, 175.0, 175.0),
    ]
}

pub fn test_pipeline(config: &SessionConfig) -> FrameAnalysisPipeline {
    let store = SessionStore::new(config).unwrap();
    FrameAnalysisPipeline::new(Arc::new(store))
}

/// Router over a fresh store with default session settings
pub fn setup_app() -> (axum::Router, AppState) {
    let state = AppState::new(test_pipeline(&SessionConfig::default()));
    (build_router(state.clone()), state)
}
