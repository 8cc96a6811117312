//! Band classification and rep edge detection shared by all exercises

use super::{ExerciseState, Stage};

/// Angle band a frame falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Band {
    Contracted,
    Extended,
    /// Neither contracted nor extended; never moves the state machine
    Transition,
}

impl Band {
    /// Contracted wins if both predicates hold (they are disjoint for every
    /// exercise defined here)
    pub(crate) fn classify(contracted: bool, extended: bool) -> Self {
        if contracted {
            Band::Contracted
        } else if extended {
            Band::Extended
        } else {
            Band::Transition
        }
    }
}

/// Coaching strings for one rep cycle
#[derive(Debug)]
pub(crate) struct Cues {
    /// Entered the start band
    pub start: &'static str,
    /// Rep credited
    pub rep: &'static str,
    /// Still in the finish band after a credited rep
    pub reset: &'static str,
    /// In the finish band without having visited the start band
    pub not_ready: &'static str,
    /// Transition band
    pub transition: &'static str,
}

/// Two-band rep cycle: a rep is credited on entering the finish band only
/// when the start band was the last band recorded.
#[derive(Debug)]
pub(crate) struct RepCycle {
    pub start: Band,
    pub start_stage: Stage,
    pub finish_stage: Stage,
    pub calories_per_rep: f64,
    pub cues: Cues,
}

impl RepCycle {
    /// Apply one frame's band; returns true when a rep was credited
    pub(crate) fn advance(&self, state: &mut ExerciseState, band: Band) -> bool {
        if band == Band::Transition {
            state.feedback = self.cues.transition.to_string();
            return false;
        }

        if band == self.start {
            state.stage = Some(self.start_stage);
            state.feedback = self.cues.start.to_string();
            return false;
        }

        match state.stage {
            Some(stage) if stage == self.start_stage => {
                state.counter += 1;
                state.calories += self.calories_per_rep;
                state.stage = Some(self.finish_stage);
                state.feedback = self.cues.rep.to_string();
                true
            }
            Some(stage) if stage == self.finish_stage => {
                state.feedback = self.cues.reset.to_string();
                false
            }
            _ => {
                state.feedback = self.cues.not_ready.to_string();
                false
            }
        }
    }
}

/// Gait counter: every entry into the stride band is one step
#[derive(Debug)]
pub(crate) struct Gait {
    /// Leg angle below which the frame counts as mid-stride
    pub stride_below: f64,
    pub calories_per_step: f64,
    pub step: &'static str,
    pub striding: &'static str,
    pub standing: &'static str,
}

impl Gait {
    /// Apply one frame's averaged leg angle; returns true when a step was credited
    pub(crate) fn advance(&self, state: &mut ExerciseState, leg_angle: f64) -> bool {
        if leg_angle >= self.stride_below {
            state.stage = Some(Stage::Stand);
            state.feedback = self.standing.to_string();
            return false;
        }

        if state.stage == Some(Stage::Step) {
            state.feedback = self.striding.to_string();
            return false;
        }

        state.counter += 1;
        state.calories += self.calories_per_step;
        state.stage = Some(Stage::Step);
        state.feedback = self.step.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLE: RepCycle = RepCycle {
        start: Band::Contracted,
        start_stage: Stage::Down,
        finish_stage: Stage::Up,
        calories_per_rep: 2.0,
        cues: Cues {
            start: "start",
            rep: "rep",
            reset: "reset",
            not_ready: "not ready",
            transition: "transition",
        },
    };

    #[test]
    fn test_classify() {
        assert_eq!(Band::classify(true, false), Band::Contracted);
        assert_eq!(Band::classify(false, true), Band::Extended);
        assert_eq!(Band::classify(false, false), Band::Transition);
    }

    #[test]
    fn test_finish_band_without_start_is_not_counted() {
        let mut state = ExerciseState::default();
        assert!(!CYCLE.advance(&mut state, Band::Extended));
        assert_eq!(state.counter, 0);
        assert_eq!(state.stage, None);
        assert_eq!(state.feedback, "not ready");
    }

    #[test]
    fn test_start_then_finish_counts_once() {
        let mut state = ExerciseState::default();
        CYCLE.advance(&mut state, Band::Contracted);
        assert_eq!(state.stage, Some(Stage::Down));
        assert!(CYCLE.advance(&mut state, Band::Extended));
        assert!(!CYCLE.advance(&mut state, Band::Extended));
        assert_eq!(state.counter, 1);
        assert_eq!(state.calories, 2.0);
        assert_eq!(state.feedback, "reset");
    }

    #[test]
    fn test_transition_keeps_stage() {
        let mut state = ExerciseState::default();
        CYCLE.advance(&mut state, Band::Contracted);
        CYCLE.advance(&mut state, Band::Transition);
        assert_eq!(state.stage, Some(Stage::Down));
        assert_eq!(state.feedback, "transition");
        assert!(CYCLE.advance(&mut state, Band::Extended));
    }
}
