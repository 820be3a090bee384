//! Movement configuration: which actions are allowed, how many, and gravity.

use serde::{Deserialize, Serialize};
use sixres_core::InputAction;
use smallvec::SmallVec;

/// Ordered action alphabet used by the enumerator and the finesse synthesizer.
/// The order decides which witness sequence is reported first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<InputAction>", into = "Vec<InputAction>")]
pub struct ActionSet(SmallVec<[InputAction; 8]>);

impl ActionSet {
    /// Keeps first occurrences; `Hold` and `HardDrop` are never part of a search alphabet.
    pub fn new(actions: impl IntoIterator<Item = InputAction>) -> Self {
        let mut set = SmallVec::new();
        for action in actions {
            if matches!(action, InputAction::Hold | InputAction::HardDrop) || set.contains(&action)
            {
                continue;
            }
            set.push(action);
        }
        Self(set)
    }

    /// Left, right, CW, CCW, (180,) sonic drop.
    pub fn standard(allow_180: bool) -> Self {
        let mut actions = vec![
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::RotateCW,
            InputAction::RotateCCW,
        ];
        if allow_180 {
            actions.push(InputAction::Rotate180);
        }
        actions.push(InputAction::SonicDrop);
        Self::new(actions)
    }

    pub fn as_slice(&self) -> &[InputAction] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputAction> {
        self.0.iter()
    }

    pub fn contains(&self, action: InputAction) -> bool {
        self.0.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::standard(true)
    }
}

impl From<Vec<InputAction>> for ActionSet {
    fn from(actions: Vec<InputAction>) -> Self {
        Self::new(actions)
    }
}

impl From<ActionSet> for Vec<InputAction> {
    fn from(set: ActionSet) -> Self {
        set.0.into_vec()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    /// Pieces float until dropped.
    #[default]
    None,
    /// Sonic drop after spawn and after every action.
    Instant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementConfig {
    pub actions: ActionSet,
    /// Longest action sequence explored (K).
    pub max_actions: usize,
    pub gravity: Gravity,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            actions: ActionSet::default(),
            max_actions: 5,
            gravity: Gravity::None,
        }
    }
}

impl MovementConfig {
    pub fn new(actions: ActionSet, max_actions: usize, gravity: Gravity) -> Self {
        Self {
            actions,
            max_actions,
            gravity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        assert_eq!(
            ActionSet::standard(true).as_slice(),
            &[
                InputAction::MoveLeft,
                InputAction::MoveRight,
                InputAction::RotateCW,
                InputAction::RotateCCW,
                InputAction::Rotate180,
                InputAction::SonicDrop,
            ]
        );
        assert!(!ActionSet::standard(false).contains(InputAction::Rotate180));
        assert_eq!(ActionSet::standard(false).len(), 5);
    }

    #[test]
    fn test_new_filters() {
        let set = ActionSet::new([
            InputAction::Hold,
            InputAction::RotateCW,
            InputAction::HardDrop,
            InputAction::RotateCW,
            InputAction::DasLeft,
        ]);
        assert_eq!(
            set.as_slice(),
            &[InputAction::RotateCW, InputAction::DasLeft]
        );
    }

    #[test]
    fn test_defaults() {
        let cfg = MovementConfig::default();
        assert_eq!(cfg.max_actions, 5);
        assert_eq!(cfg.gravity, Gravity::None);
        assert_eq!(cfg.actions, ActionSet::standard(true));
    }
}
