//! Exercise classification state machines
//!
//! Each supported exercise is a small state machine over one or two averaged
//! joint angles. A state machine never owns its state: [`ExerciseKind::step`]
//! takes the current [`ExerciseState`] and returns the next one together with
//! the frame's [`StepOutput`].
//!
//! Thresholds (degrees):
//!
//! | Exercise | Contracted            | Extended               | Rep credited on        |
//! |----------|-----------------------|------------------------|------------------------|
//! | push-up  | arm < 90, trunk > 160 | arm > 160, trunk > 160 | contracted → extended  |
//! | pull-up  | arm < 90, trunk > 160 | arm > 160, trunk > 160 | extended → contracted  |
//! | sit-up   | trunk < 90            | trunk > 160            | contracted → extended  |
//! | squat    | leg < 90              | leg > 160              | contracted → extended  |
//! | walk     | leg < 120 (step)      | leg >= 120 (stand)     | every entry into step  |

mod cycle;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angle::JointAngles;
use crate::error::AnalysisError;
use cycle::{Band, Cues, Gait, RepCycle};

/// Upper bound of every contracted band
const CONTRACTED_BELOW: f64 = 90.0;
/// Lower bound of every extended band; also the straight-torso requirement
/// for push-ups and pull-ups
const EXTENDED_ABOVE: f64 = 160.0;

const PUSH_UP: RepCycle = RepCycle {
    start: Band::Contracted,
    start_stage: Stage::Down,
    finish_stage: Stage::Up,
    calories_per_rep: 0.5,
    cues: Cues {
        start: "Great depth! Push back up.",
        rep: "Good push-up! Keep your form.",
        reset: "Lower your chest toward the floor.",
        not_ready: "Start in a plank position.",
        transition: "Keep your body aligned from head to heels.",
    },
};

const PULL_UP: RepCycle = RepCycle {
    start: Band::Extended,
    start_stage: Stage::Down,
    finish_stage: Stage::Up,
    calories_per_rep: 1.0,
    cues: Cues {
        start: "Full hang. Now pull!",
        rep: "Chin over the bar! Great pull-up.",
        reset: "Lower yourself with control.",
        not_ready: "Hang with straight arms to start.",
        transition: "Keep your core engaged and body straight.",
    },
};

const SIT_UP: RepCycle = RepCycle {
    start: Band::Contracted,
    start_stage: Stage::Up,
    finish_stage: Stage::Down,
    calories_per_rep: 0.4,
    cues: Cues {
        start: "Good curl! Now lower back down.",
        rep: "Great sit-up! Full range of motion.",
        reset: "Curl your upper body up.",
        not_ready: "Lie back fully to start.",
        transition: "Keep your feet flat and avoid using momentum.",
    },
};

const SQUAT: RepCycle = RepCycle {
    start: Band::Contracted,
    start_stage: Stage::Down,
    finish_stage: Stage::Up,
    calories_per_rep: 0.6,
    cues: Cues {
        start: "Good depth! Drive up through your heels.",
        rep: "Excellent squat! Full range of motion.",
        reset: "Sit back and lower your hips.",
        not_ready: "Stand up tall to start.",
        transition: "Keep your chest up and weight in your heels.",
    },
};

const WALK: Gait = Gait {
    stride_below: 120.0,
    calories_per_step: 0.05,
    step: "Good step! Keep your posture upright.",
    striding: "Continue walking with good posture.",
    standing: "Maintain good posture while walking.",
};

/// Supported exercise types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    PushUp,
    PullUp,
    SitUp,
    Squat,
    Walk,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 5] = [
        ExerciseKind::PushUp,
        ExerciseKind::PullUp,
        ExerciseKind::SitUp,
        ExerciseKind::Squat,
        ExerciseKind::Walk,
    ];

    /// Wire name (`push-up`, `pull-up`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::PushUp => "push-up",
            ExerciseKind::PullUp => "pull-up",
            ExerciseKind::SitUp => "sit-up",
            ExerciseKind::Squat => "squat",
            ExerciseKind::Walk => "walk",
        }
    }

    /// Calories credited per counted repetition
    pub fn calories_per_rep(self) -> f64 {
        match self {
            ExerciseKind::PushUp => PUSH_UP.calories_per_rep,
            ExerciseKind::PullUp => PULL_UP.calories_per_rep,
            ExerciseKind::SitUp => SIT_UP.calories_per_rep,
            ExerciseKind::Squat => SQUAT.calories_per_rep,
            ExerciseKind::Walk => WALK.calories_per_step,
        }
    }

    /// Advance the state machine by one frame
    ///
    /// Switching a session to a different exercise clears the stage (the
    /// counter and calories carry over), so the stage always belongs to the
    /// exercise being stepped.
    pub fn step(self, state: &ExerciseState, angles: &JointAngles) -> (ExerciseState, StepOutput) {
        let mut next = state.clone();
        if next.exercise != Some(self) {
            next.exercise = Some(self);
            next.stage = None;
        }

        let rep_completed = match self {
            ExerciseKind::PushUp => PUSH_UP.advance(&mut next, upper_body_band(angles)),
            ExerciseKind::PullUp => PULL_UP.advance(&mut next, upper_body_band(angles)),
            ExerciseKind::SitUp => {
                let trunk = angles.trunk();
                SIT_UP.advance(
                    &mut next,
                    Band::classify(trunk < CONTRACTED_BELOW, trunk > EXTENDED_ABOVE),
                )
            }
            ExerciseKind::Squat => {
                let leg = angles.leg();
                SQUAT.advance(
                    &mut next,
                    Band::classify(leg < CONTRACTED_BELOW, leg > EXTENDED_ABOVE),
                )
            }
            ExerciseKind::Walk => WALK.advance(&mut next, angles.leg()),
        };

        let output = StepOutput::from_state(&next, rep_completed);
        (next, output)
    }
}

/// Push-up and pull-up band: arm angle with a straight torso
fn upper_body_band(angles: &JointAngles) -> Band {
    let arm = angles.arm();
    let straight_torso = angles.trunk() > EXTENDED_ABOVE;
    Band::classify(
        arm < CONTRACTED_BELOW && straight_torso,
        arm > EXTENDED_ABOVE && straight_torso,
    )
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AnalysisError::UnsupportedExerciseType(s.to_string()))
    }
}

/// Discrete phase of a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Up,
    Down,
    Step,
    Stand,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Up => "up",
            Stage::Down => "down",
            Stage::Step => "step",
            Stage::Stand => "stand",
        }
    }
}

/// Running counters for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseState {
    /// Completed repetitions; never decreases
    pub counter: u32,
    /// None until the first band that sets a stage
    pub stage: Option<Stage>,
    /// Accumulated calories; grows only with `counter`
    pub calories: f64,
    /// Latest coaching message
    pub feedback: String,
    /// Exercise the stage belongs to
    pub exercise: Option<ExerciseKind>,
}

/// Result of one classification step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub count: u32,
    pub stage: Option<Stage>,
    pub feedback: String,
    pub calories: f64,
    /// True when this frame credited a repetition
    pub rep_completed: bool,
}

impl StepOutput {
    fn from_state(state: &ExerciseState, rep_completed: bool) -> Self {
        Self {
            count: state.counter,
            stage: state.stage,
            feedback: state.feedback.clone(),
            calories: state.calories,
            rep_completed,
        }
    }
}
