//! The eight-button action vocabulary. The legacy battle-only vocabulary
//! (`move:i`, `switch:i`, `run`) from the source game is out of scope here;
//! anything that isn't one of these eight tokens fails to parse.

use serde::{Deserialize, Serialize};

/// A single controller button. This is the only vote payload agents may cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
    Select,
}

impl Action {
    /// All eight buttons, in a fixed order used for `availableActions` and tallying.
    pub const ALL: [Action; 8] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::A,
        Action::B,
        Action::Start,
        Action::Select,
    ];

    /// The fallback action used when a tick has no votes or the winner isn't legal.
    pub const FALLBACK: Action = Action::A;

    /// Buttons that cause the tick processor to advance extra emulator frames
    /// after the press, modelling "movement" (6 frames), "start" (2 frames),
    /// everything else (0 frames).
    pub fn extra_frames(self) -> u32 {
        match self {
            Action::Up | Action::Down | Action::Left | Action::Right => 6,
            Action::Start => 2,
            Action::A | Action::B | Action::Select => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::A => "a",
            Action::B => "b",
            Action::Start => "start",
            Action::Select => "select",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            let back: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(action, back);
        }
    }

    #[test]
    fn rejects_legacy_vocabulary() {
        for legacy in ["move:0", "switch:1", "run"] {
            let quoted = format!("\"{legacy}\"");
            assert!(serde_json::from_str::<Action>(&quoted).is_err());
        }
    }
}
