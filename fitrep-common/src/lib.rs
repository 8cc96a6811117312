//! # FitRep Common Library
//!
//! Shared code for the FitRep services including:
//! - Pose landmark data model (33-point layout)
//! - Bootstrap configuration loading
//! - Error types
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod pose;
pub mod time;

pub use error::{Error, Result};
pub use pose::{Landmark, PoseLandmark, POSE_LANDMARK_COUNT};
