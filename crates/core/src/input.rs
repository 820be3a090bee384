//! Input actions and key sequences.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One key press. `Hold` never changes the pose; `HardDrop` locks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    #[serde(rename = "rotateCW")]
    RotateCW,
    #[serde(rename = "rotateCCW")]
    RotateCCW,
    Rotate180,
    SonicDrop,
    Hold,
    DasLeft,
    DasRight,
    HardDrop,
}

impl InputAction {
    /// Short token used in logs and text output.
    pub fn token(self) -> &'static str {
        match self {
            InputAction::MoveLeft => "l",
            InputAction::MoveRight => "r",
            InputAction::RotateCW => "cw",
            InputAction::RotateCCW => "ccw",
            InputAction::Rotate180 => "f",
            InputAction::SonicDrop => "sd",
            InputAction::Hold => "hold",
            InputAction::DasLeft => "dl",
            InputAction::DasRight => "dr",
            InputAction::HardDrop => "hd",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let action = match token {
            "l" => InputAction::MoveLeft,
            "r" => InputAction::MoveRight,
            "cw" => InputAction::RotateCW,
            "ccw" => InputAction::RotateCCW,
            "f" => InputAction::Rotate180,
            "sd" => InputAction::SonicDrop,
            "hold" => InputAction::Hold,
            "dl" => InputAction::DasLeft,
            "dr" => InputAction::DasRight,
            "hd" => InputAction::HardDrop,
            _ => return None,
        };
        Some(action)
    }
}

impl std::fmt::Display for InputAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Ordered list of actions; inline for the usual short finesse.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySequence(SmallVec<[InputAction; 8]>);

impl KeySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: InputAction) {
        self.0.push(action);
    }

    pub fn pop(&mut self) -> Option<InputAction> {
        self.0.pop()
    }

    /// Copy with `action` in front.
    pub fn prefixed(&self, action: InputAction) -> Self {
        let mut keys = Self::new();
        keys.push(action);
        keys.0.extend_from_slice(&self.0);
        keys
    }

    pub fn as_slice(&self) -> &[InputAction] {
        &self.0
    }
}

impl Deref for KeySequence {
    type Target = [InputAction];

    fn deref(&self) -> &[InputAction] {
        &self.0
    }
}

impl From<&[InputAction]> for KeySequence {
    fn from(actions: &[InputAction]) -> Self {
        Self(SmallVec::from_slice(actions))
    }
}

impl FromIterator<InputAction> for KeySequence {
    fn from_iter<I: IntoIterator<Item = InputAction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<InputAction> for KeySequence {
    fn extend<I: IntoIterator<Item = InputAction>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a InputAction;
    type IntoIter = std::slice::Iter<'a, InputAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for KeySequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{action}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tokens() {
        let keys: KeySequence = [InputAction::RotateCW, InputAction::MoveRight, InputAction::HardDrop]
            .into_iter()
            .collect();
        assert_eq!(keys.to_string(), "cw,r,hd");
        assert_eq!(KeySequence::new().to_string(), "");
    }

    #[test]
    fn test_tokens_parse_back() {
        let all = [
            InputAction::MoveLeft,
            InputAction::MoveRight,
            InputAction::RotateCW,
            InputAction::RotateCCW,
            InputAction::Rotate180,
            InputAction::SonicDrop,
            InputAction::Hold,
            InputAction::DasLeft,
            InputAction::DasRight,
            InputAction::HardDrop,
        ];
        for action in all {
            assert_eq!(InputAction::from_token(action.token()), Some(action));
        }
        assert_eq!(InputAction::from_token("x"), None);
    }

    #[test]
    fn test_prefixed() {
        let keys = KeySequence::from(&[InputAction::MoveLeft][..]);
        let held = keys.prefixed(InputAction::Hold);
        assert_eq!(&*held, &[InputAction::Hold, InputAction::MoveLeft]);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_serde_names() {
        let keys = KeySequence::from(&[InputAction::RotateCCW, InputAction::SonicDrop][..]);
        let json = serde_json::to_string(&keys).expect("serialize");
        assert_eq!(json, r#"["rotateCCW","sonicDrop"]"#);
    }
}
