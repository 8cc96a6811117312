//! Exercise instruction catalog and level-based suggestions

use std::str::FromStr;

use serde::Serialize;

use crate::classifier::ExerciseKind;

/// How to perform one exercise
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseInstructions {
    pub exercise_type: ExerciseKind,
    pub title: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
    pub tips: &'static [&'static str],
}

static PUSH_UP: ExerciseInstructions = ExerciseInstructions {
    exercise_type: ExerciseKind::PushUp,
    title: "Push-Up",
    description: "Raise and lower a rigid body by straightening and bending the arms.",
    steps: &[
        "Start in a plank with hands slightly wider than your shoulders",
        "Lower your body until your chest nearly touches the floor",
        "Press back up until your arms are straight",
        "Hold a straight line from head to heels throughout",
    ],
    tips: &[
        "Brace your core",
        "Keep your hips from sagging",
        "Breathe out as you press up",
    ],
};

static PULL_UP: ExerciseInstructions = ExerciseInstructions {
    exercise_type: ExerciseKind::PullUp,
    title: "Pull-Up",
    description: "Lift the hanging body until the chin clears the bar.",
    steps: &[
        "Grip the bar with hands slightly wider than your shoulders",
        "Hang with your arms fully extended",
        "Pull until your chin is over the bar",
        "Lower yourself back to a full hang with control",
    ],
    tips: &[
        "Drive your elbows down toward your hips",
        "Avoid swinging or kipping",
        "Keep your legs still",
    ],
};

static SIT_UP: ExerciseInstructions = ExerciseInstructions {
    exercise_type: ExerciseKind::SitUp,
    title: "Sit-Up",
    description: "Curl the torso from lying flat up toward the knees.",
    steps: &[
        "Lie on your back with knees bent and feet flat",
        "Cross your arms over your chest or rest hands by your ears",
        "Curl your upper body up toward your knees",
        "Roll back down until your shoulders touch the floor",
    ],
    tips: &[
        "Keep your feet planted",
        "Do not pull on your neck",
        "Move with your abs, not momentum",
    ],
};

static SQUAT: ExerciseInstructions = ExerciseInstructions {
    exercise_type: ExerciseKind::Squat,
    title: "Squat",
    description: "Lower the hips from standing and drive back up.",
    steps: &[
        "Stand with feet shoulder-width apart",
        "Push your hips back and bend your knees as if sitting in a chair",
        "Descend until your thighs are at least parallel to the floor",
        "Drive back up to standing",
    ],
    tips: &[
        "Keep your weight over your heels",
        "Track your knees over your toes",
        "Keep your chest up",
    ],
};

static WALK: ExerciseInstructions = ExerciseInstructions {
    exercise_type: ExerciseKind::Walk,
    title: "Walking",
    description: "A low-impact cardiovascular exercise.",
    steps: &[
        "Stand tall with relaxed shoulders",
        "Take natural, even strides",
        "Let your arms swing with your steps",
        "Hold a steady pace",
    ],
    tips: &[
        "Look ahead, not at your feet",
        "Land softly on your heel and roll through",
        "Breathe naturally",
    ],
};

/// Instructions for one exercise
pub fn instructions(kind: ExerciseKind) -> &'static ExerciseInstructions {
    match kind {
        ExerciseKind::PushUp => &PUSH_UP,
        ExerciseKind::PullUp => &PULL_UP,
        ExerciseKind::SitUp => &SIT_UP,
        ExerciseKind::Squat => &SQUAT,
        ExerciseKind::Walk => &WALK,
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Parse a level name; anything unrecognized is treated as beginner
    pub fn parse_or_beginner(s: &str) -> Self {
        match s.trim() {
            "intermediate" => FitnessLevel::Intermediate,
            "advanced" => FitnessLevel::Advanced,
            _ => FitnessLevel::Beginner,
        }
    }
}

/// Training goal a suggestion is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Strength,
    Cardio,
    Flexibility,
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Goal::Strength),
            "cardio" => Ok(Goal::Cardio),
            "flexibility" => Ok(Goal::Flexibility),
            other => Err(format!("unknown goal '{}'", other)),
        }
    }
}

/// Activities suggested for a level and goal
///
/// Not every entry is a tracked [`ExerciseKind`]; cardio and flexibility
/// suggestions include activities the analyzer cannot count.
fn activities(level: FitnessLevel, goal: Goal) -> &'static [&'static str] {
    use FitnessLevel::*;
    use Goal::*;
    match (level, goal) {
        (Beginner, Strength) => &["push-up", "sit-up", "squat"],
        (Beginner, Cardio) => &["walk"],
        (Beginner, Flexibility) => &["stretching"],
        (Intermediate, Strength) => &["push-up", "pull-up", "squat"],
        (Intermediate, Cardio) => &["walk", "jogging"],
        (Intermediate, Flexibility) => &["stretching", "yoga"],
        (Advanced, Strength) => &["push-up", "pull-up", "squat", "burpees"],
        (Advanced, Cardio) => &["walk", "jogging", "running"],
        (Advanced, Flexibility) => &["stretching", "yoga", "pilates"],
    }
}

/// Suggested activities for `level` across `goals`
///
/// Unknown goal names are skipped. Each activity appears once, in the order
/// it is first suggested.
pub fn suggestions<'a>(
    level: FitnessLevel,
    goals: impl IntoIterator<Item = &'a str>,
) -> Vec<&'static str> {
    let mut recommended: Vec<&'static str> = Vec::new();
    for goal in goals.into_iter().filter_map(|g| g.parse::<Goal>().ok()) {
        for &activity in activities(level, goal) {
            if !recommended.contains(&activity) {
                recommended.push(activity);
            }
        }
    }
    recommended
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_exercise_has_instructions() {
        for kind in ExerciseKind::ALL {
            let entry = instructions(kind);
            assert_eq!(entry.exercise_type, kind);
            assert!(!entry.steps.is_empty());
            assert!(!entry.tips.is_empty());
        }
    }

    #[test]
    fn test_serializes_kind_as_wire_name() {
        let value = serde_json::to_value(instructions(ExerciseKind::SitUp)).unwrap();
        assert_eq!(value["exercise_type"], "sit-up");
        assert_eq!(value["title"], "Sit-Up");
        assert_eq!(value["steps"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_level_falls_back_to_beginner() {
        assert_eq!(FitnessLevel::parse_or_beginner("elite"), FitnessLevel::Beginner);
        assert_eq!(FitnessLevel::parse_or_beginner(""), FitnessLevel::Beginner);
        assert_eq!(FitnessLevel::parse_or_beginner("advanced"), FitnessLevel::Advanced);
    }

    #[test]
    fn test_suggestions_merge_goals_without_duplicates() {
        let picked = suggestions(FitnessLevel::Intermediate, ["strength", "cardio", "strength"]);
        assert_eq!(picked, ["push-up", "pull-up", "squat", "walk", "jogging"]);
    }

    #[test]
    fn test_suggestions_skip_unknown_goals() {
        assert!(suggestions(FitnessLevel::Advanced, ["", "speed"]).is_empty());
        assert_eq!(suggestions(FitnessLevel::Beginner, ["speed", "cardio"]), ["walk"]);
    }
}
