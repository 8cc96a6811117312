//! Pose landmark data model
//!
//! Landmarks arrive from an external pose-estimation model as 33 points in a
//! fixed anatomical order. Coordinates are normalized to the image frame.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Number of landmarks in one pose
pub const POSE_LANDMARK_COUNT: usize = 33;

/// A single tracked body keypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0-1 normalized
    pub x: f64,
    /// Vertical position, 0-1 normalized (grows downward)
    pub y: f64,
    /// Relative depth
    #[serde(default)]
    pub z: f64,
    /// Detection confidence, 0-1
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    /// Create a fully visible landmark on the image plane
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// True when both image-plane coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Decode one landmark from its wire representation
    ///
    /// `x` and `y` are required; `z` defaults to 0.0 and `visibility` to 1.0.
    /// Anything non-numeric is rejected with the offending field named.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::InvalidInput(format!("landmark is not an object: {}", value)))?;

        let field = |name: &str, default: Option<f64>| -> Result<f64> {
            match obj.get(name) {
                Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                    Error::InvalidInput(format!("'{}' is not representable as f64", name))
                }),
                Some(Value::Null) | None => default
                    .ok_or_else(|| Error::InvalidInput(format!("missing coordinate '{}'", name))),
                Some(other) => Err(Error::InvalidInput(format!(
                    "'{}' is not numeric: {}",
                    name, other
                ))),
            }
        };

        Ok(Self {
            x: field("x", None)?,
            y: field("y", None)?,
            z: field("z", Some(0.0))?,
            visibility: field("visibility", Some(1.0))?,
        })
    }
}

/// Anatomical landmark positions in the 33-point layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Position of this landmark in a pose sequence
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PoseLandmark::Nose => "nose",
            PoseLandmark::LeftEyeInner => "left_eye_inner",
            PoseLandmark::LeftEye => "left_eye",
            PoseLandmark::LeftEyeOuter => "left_eye_outer",
            PoseLandmark::RightEyeInner => "right_eye_inner",
            PoseLandmark::RightEye => "right_eye",
            PoseLandmark::RightEyeOuter => "right_eye_outer",
            PoseLandmark::LeftEar => "left_ear",
            PoseLandmark::RightEar => "right_ear",
            PoseLandmark::MouthLeft => "mouth_left",
            PoseLandmark::MouthRight => "mouth_right",
            PoseLandmark::LeftShoulder => "left_shoulder",
            PoseLandmark::RightShoulder => "right_shoulder",
            PoseLandmark::LeftElbow => "left_elbow",
            PoseLandmark::RightElbow => "right_elbow",
            PoseLandmark::LeftWrist => "left_wrist",
            PoseLandmark::RightWrist => "right_wrist",
            PoseLandmark::LeftPinky => "left_pinky",
            PoseLandmark::RightPinky => "right_pinky",
            PoseLandmark::LeftIndex => "left_index",
            PoseLandmark::RightIndex => "right_index",
            PoseLandmark::LeftThumb => "left_thumb",
            PoseLandmark::RightThumb => "right_thumb",
            PoseLandmark::LeftHip => "left_hip",
            PoseLandmark::RightHip => "right_hip",
            PoseLandmark::LeftKnee => "left_knee",
            PoseLandmark::RightKnee => "right_knee",
            PoseLandmark::LeftAnkle => "left_ankle",
            PoseLandmark::RightAnkle => "right_ankle",
            PoseLandmark::LeftHeel => "left_heel",
            PoseLandmark::RightHeel => "right_heel",
            PoseLandmark::LeftFootIndex => "left_foot_index",
            PoseLandmark::RightFootIndex => "right_foot_index",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_indices() {
        assert_eq!(PoseLandmark::Nose.index(), 0);
        assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
        assert_eq!(PoseLandmark::RightWrist.index(), 16);
        assert_eq!(PoseLandmark::LeftHip.index(), 23);
        assert_eq!(PoseLandmark::RightAnkle.index(), 28);
        assert_eq!(PoseLandmark::RightFootIndex.index() + 1, POSE_LANDMARK_COUNT);
    }

    #[test]
    fn test_from_json_full() {
        let value = json!({"x": 0.25, "y": 0.5, "z": -0.1, "visibility": 0.9});
        let lm = Landmark::from_json(&value).unwrap();
        assert_eq!(lm.x, 0.25);
        assert_eq!(lm.y, 0.5);
        assert_eq!(lm.z, -0.1);
        assert_eq!(lm.visibility, 0.9);
    }

    #[test]
    fn test_from_json_defaults_optional_fields() {
        let lm = Landmark::from_json(&json!({"x": 0.1, "y": 0.2})).unwrap();
        assert_eq!(lm.z, 0.0);
        assert_eq!(lm.visibility, 1.0);
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        let err = Landmark::from_json(&json!({"x": "left", "y": 0.2})).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_from_json_rejects_missing_coordinate() {
        let err = Landmark::from_json(&json!({"x": 0.3})).unwrap_err();
        assert!(err.to_string().contains("missing coordinate 'y'"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Landmark::from_json(&json!([0.1, 0.2])).is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let lm: Landmark = serde_json::from_str(r#"{"x": 0.4, "y": 0.6}"#).unwrap();
        assert_eq!(lm, Landmark::new(0.4, 0.6));
    }
}
