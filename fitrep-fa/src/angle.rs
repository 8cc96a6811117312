//! Joint angle calculation
//!
//! All joint angles come from one primitive: the angle subtended at a vertex
//! by two neighbouring points, measured on the image plane.

use std::collections::BTreeMap;

use fitrep_common::{Landmark, PoseLandmark, POSE_LANDMARK_COUNT};

use crate::error::AnalysisError;

/// A point on the image plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<&Landmark> for Point2 {
    fn from(lm: &Landmark) -> Self {
        Self { x: lm.x, y: lm.y }
    }
}

/// Angle at vertex `b` formed by `a` and `c`, in degrees
///
/// Always within [0, 180]. Coincident or collinear points produce a
/// boundary value (0 or 180) rather than an error.
pub fn angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let degrees = radians.abs().to_degrees();
    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// The six per-side joint angles derived from one pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAngles {
    /// Shoulder-elbow-wrist
    pub left_arm: f64,
    pub right_arm: f64,
    /// Hip-knee-ankle
    pub left_leg: f64,
    pub right_leg: f64,
    /// Shoulder-hip-knee (torso flexion)
    pub left_trunk: f64,
    pub right_trunk: f64,
}

impl JointAngles {
    /// Same angles on both sides
    pub fn uniform(arm: f64, leg: f64, trunk: f64) -> Self {
        Self {
            left_arm: arm,
            right_arm: arm,
            left_leg: leg,
            right_leg: leg,
            left_trunk: trunk,
            right_trunk: trunk,
        }
    }

    /// Derive all six angles from a 33-point pose
    ///
    /// Fails when the sequence does not follow the 33-point layout or when a
    /// landmark feeding an angle has a non-finite coordinate.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, AnalysisError> {
        if landmarks.len() != POSE_LANDMARK_COUNT {
            return Err(AnalysisError::MalformedLandmarks(format!(
                "expected {} landmarks, got {}",
                POSE_LANDMARK_COUNT,
                landmarks.len()
            )));
        }

        let point = |which: PoseLandmark| -> Result<Point2, AnalysisError> {
            let lm = landmarks.get(which.index()).ok_or_else(|| {
                AnalysisError::MalformedLandmarks(format!("missing landmark '{}'", which.name()))
            })?;
            if !lm.is_finite() {
                return Err(AnalysisError::MalformedLandmarks(format!(
                    "non-finite coordinate for '{}'",
                    which.name()
                )));
            }
            Ok(Point2::from(lm))
        };

        use PoseLandmark::*;
        let joint = |a, b, c| -> Result<f64, AnalysisError> {
            Ok(angle(point(a)?, point(b)?, point(c)?))
        };

        Ok(Self {
            left_arm: joint(LeftShoulder, LeftElbow, LeftWrist)?,
            right_arm: joint(RightShoulder, RightElbow, RightWrist)?,
            left_leg: joint(LeftHip, LeftKnee, LeftAnkle)?,
            right_leg: joint(RightHip, RightKnee, RightAnkle)?,
            left_trunk: joint(LeftShoulder, LeftHip, LeftKnee)?,
            right_trunk: joint(RightShoulder, RightHip, RightKnee)?,
        })
    }

    /// Mean of left and right arm angles
    pub fn arm(&self) -> f64 {
        (self.left_arm + self.right_arm) / 2.0
    }

    /// Mean of left and right leg angles
    pub fn leg(&self) -> f64 {
        (self.left_leg + self.right_leg) / 2.0
    }

    /// Mean of left and right trunk angles
    pub fn trunk(&self) -> f64 {
        (self.left_trunk + self.right_trunk) / 2.0
    }

    /// Named angle map as reported in analysis results
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        [
            ("left_arm", self.left_arm),
            ("right_arm", self.right_arm),
            ("left_leg", self.left_leg),
            ("right_leg", self.right_leg),
            ("left_trunk", self.left_trunk),
            ("right_trunk", self.right_trunk),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }
}
