//! Frame analysis pipeline
//!
//! landmarks → joint angles → session lookup → classifier step → result.
//!
//! Every failure mode is folded into the returned [`AnalysisResult`]:
//!
//! | Condition                  | `status`    | Session state            |
//! |----------------------------|-------------|--------------------------|
//! | no landmarks               | `no_person` | untouched, counts echoed |
//! | malformed landmarks        | `error`     | untouched, counts zeroed |
//! | unsupported exercise type  | `unknown`   | untouched                |
//! | classified                 | stage name  | stepped                  |

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use fitrep_common::{time, Landmark};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::angle::JointAngles;
use crate::classifier::{ExerciseKind, Stage, StepOutput};
use crate::error::AnalysisError;
use crate::session::SessionStore;

/// Outcome category of one analyzed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    /// Classified, no stage reached yet
    Starting,
    Up,
    Down,
    Step,
    Stand,
    NoPerson,
    Error,
    Unknown,
}

impl From<Option<Stage>> for FrameStatus {
    fn from(stage: Option<Stage>) -> Self {
        match stage {
            None => FrameStatus::Starting,
            Some(Stage::Up) => FrameStatus::Up,
            Some(Stage::Down) => FrameStatus::Down,
            Some(Stage::Step) => FrameStatus::Step,
            Some(Stage::Stand) => FrameStatus::Stand,
        }
    }
}

/// Per-frame analysis output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub count: u32,
    pub status: FrameStatus,
    pub feedback: String,
    pub calories: f64,
    pub angles: BTreeMap<String, f64>,
    pub landmarks: Vec<Landmark>,
}

impl AnalysisResult {
    fn no_person(count: u32, calories: f64) -> Self {
        Self {
            count,
            status: FrameStatus::NoPerson,
            feedback: AnalysisError::NoPersonDetected.to_string(),
            calories,
            angles: BTreeMap::new(),
            landmarks: Vec::new(),
        }
    }

    fn error(err: &AnalysisError) -> Self {
        Self {
            count: 0,
            status: FrameStatus::Error,
            feedback: format!("Error analyzing pose: {}", err),
            calories: 0.0,
            angles: BTreeMap::new(),
            landmarks: Vec::new(),
        }
    }

    fn unsupported(angles: &JointAngles, landmarks: &[Landmark]) -> Self {
        Self {
            count: 0,
            status: FrameStatus::Unknown,
            feedback: "Exercise type not supported".to_string(),
            calories: 0.0,
            angles: angles.to_map(),
            landmarks: landmarks.to_vec(),
        }
    }

    fn classified(output: StepOutput, angles: &JointAngles, landmarks: &[Landmark]) -> Self {
        Self {
            count: output.count,
            status: output.stage.into(),
            feedback: output.feedback,
            calories: output.calories,
            angles: angles.to_map(),
            landmarks: landmarks.to_vec(),
        }
    }
}

/// Orchestrates one frame's analysis against the session store
#[derive(Debug, Clone)]
pub struct FrameAnalysisPipeline {
    sessions: Arc<SessionStore>,
}

impl FrameAnalysisPipeline {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Analyze one frame for `session_id`
    pub fn analyze(
        &self,
        landmarks: Option<&[Landmark]>,
        exercise_type: &str,
        session_id: &str,
    ) -> AnalysisResult {
        self.analyze_at(landmarks, exercise_type, session_id, time::now())
    }

    /// [`analyze`](Self::analyze) with an explicit clock reading
    pub fn analyze_at(
        &self,
        landmarks: Option<&[Landmark]>,
        exercise_type: &str,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> AnalysisResult {
        let landmarks = match landmarks {
            Some(landmarks) if !landmarks.is_empty() => landmarks,
            _ => return self.no_person(session_id),
        };

        let angles = match JointAngles::from_landmarks(landmarks) {
            Ok(angles) => angles,
            Err(err) => {
                warn!("Session '{}': {}", session_id, err);
                return AnalysisResult::error(&err);
            }
        };

        let kind = match exercise_type.parse::<ExerciseKind>() {
            Ok(kind) => kind,
            Err(err) => {
                debug!("Session '{}': {}", session_id, err);
                return AnalysisResult::unsupported(&angles, landmarks);
            }
        };

        let output = self
            .sessions
            .transition(session_id, now, |state| kind.step(state, &angles));
        if output.rep_completed {
            debug!(
                "Session '{}': {} rep {} ({:.2} kcal)",
                session_id, kind, output.count, output.calories
            );
        }

        AnalysisResult::classified(output, &angles, landmarks)
    }

    /// Analyze a frame whose landmarks are still in wire form
    ///
    /// Landmarks that fail to decode produce an `error` result, exactly as a
    /// structurally malformed pose would.
    pub fn analyze_json(
        &self,
        landmarks: Option<&[Value]>,
        exercise_type: &str,
        session_id: &str,
    ) -> AnalysisResult {
        let decoded = match landmarks {
            None => None,
            Some(values) => match decode_landmarks(values) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    warn!("Session '{}': {}", session_id, err);
                    return AnalysisResult::error(&err);
                }
            },
        };
        self.analyze(decoded.as_deref(), exercise_type, session_id)
    }

    fn no_person(&self, session_id: &str) -> AnalysisResult {
        let (count, calories) = self
            .sessions
            .peek(session_id)
            .map(|state| (state.counter, state.calories))
            .unwrap_or((0, 0.0));
        AnalysisResult::no_person(count, calories)
    }
}

fn decode_landmarks(values: &[Value]) -> Result<Vec<Landmark>, AnalysisError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            Landmark::from_json(value).map_err(|e| {
                AnalysisError::MalformedLandmarks(format!("landmark {}: {}", index, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitrep_common::config::SessionConfig;
    use serde_json::json;

    fn pipeline() -> FrameAnalysisPipeline {
        let store = SessionStore::new(&SessionConfig::default()).unwrap();
        FrameAnalysisPipeline::new(Arc::new(store))
    }

    #[test]
    fn test_status_from_stage() {
        assert_eq!(FrameStatus::from(None), FrameStatus::Starting);
        assert_eq!(FrameStatus::from(Some(Stage::Step)), FrameStatus::Step);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(FrameStatus::NoPerson).unwrap(), "no_person");
        assert_eq!(serde_json::to_value(FrameStatus::Down).unwrap(), "down");
    }

    #[test]
    fn test_none_is_no_person_without_creating_session() {
        let pipeline = pipeline();
        let result = pipeline.analyze(None, "squat", "s1");
        assert_eq!(result.status, FrameStatus::NoPerson);
        assert_eq!(result.count, 0);
        assert!(result.angles.is_empty());
        assert!(pipeline.sessions().is_empty());
    }

    #[test]
    fn test_empty_slice_is_no_person() {
        let pipeline = pipeline();
        let empty: Vec<Landmark> = Vec::new();
        let result = pipeline.analyze(Some(empty.as_slice()), "squat", "s1");
        assert_eq!(result.status, FrameStatus::NoPerson);
    }

    #[test]
    fn test_json_decode_failure_is_error() {
        let pipeline = pipeline();
        let values = vec![json!({"x": 0.1, "y": "nope"})];
        let result = pipeline.analyze_json(Some(&values), "squat", "s1");
        assert_eq!(result.status, FrameStatus::Error);
        assert!(result.feedback.contains("landmark 0"));
        assert!(pipeline.sessions().is_empty());
    }

    #[test]
    fn test_json_absent_is_no_person() {
        let pipeline = pipeline();
        let result = pipeline.analyze_json(None, "walk", "s1");
        assert_eq!(result.status, FrameStatus::NoPerson);
    }

    #[test]
    fn test_no_person_never_mutates_for_any_exercise_type() {
        let pipeline = pipeline();
        let angles = JointAngles::uniform(80.0, 85.0, 85.0);
        pipeline
            .sessions()
            .transition("s1", time::now(), |state| ExerciseKind::Squat.step(state, &angles));
        let before = pipeline.sessions().snapshot("s1").unwrap();

        let names = ExerciseKind::ALL
            .iter()
            .map(|kind| kind.as_str())
            .chain(["burpee"]);
        for name in names {
            let result = pipeline.analyze(None, name, "s1");
            assert_eq!(result.status, FrameStatus::NoPerson, "{}", name);
            assert_eq!(result.count, before.state.counter);
            assert_eq!(pipeline.sessions().snapshot("s1").unwrap(), before, "{}", name);
        }
    }
}
