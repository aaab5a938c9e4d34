//! A shortcut is one key combination to practice, tagged with how hard it is
//! and how often it comes up in daily use.
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Ordering weight for learning paths: easy shortcuts come first.
    pub fn rank(self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Common,
    #[default]
    Occasional,
    Rare,
}

impl Frequency {
    /// Ordering weight for learning paths: everyday shortcuts come first.
    pub fn rank(self) -> u32 {
        match self {
            Frequency::Common => 0,
            Frequency::Occasional => 1,
            Frequency::Rare => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Common => "common",
            Frequency::Occasional => "occasional",
            Frequency::Rare => "rare",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(Error::UnknownVariant {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Frequency::Common),
            "occasional" => Ok(Frequency::Occasional),
            "rare" => Ok(Frequency::Rare),
            other => Err(Error::UnknownVariant {
                kind: "frequency",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: String,
    pub app: String,
    pub category: String,
    pub action: String,
    pub description: String,
    pub keys: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub frequency: Frequency,
}

impl Shortcut {
    /// Human-readable combination, e.g. `Ctrl + Shift + P`.
    pub fn keys_display(&self) -> String {
        self.keys.join(" + ")
    }

    /// Modifier keys in sorted order, joined with `+`. Empty for single keys.
    pub fn modifier_combo(&self) -> String {
        modifier_combo(&self.keys)
    }
}

/// Modifier keys among `keys` in sorted order, joined with `+`.
pub fn modifier_combo(keys: &[String]) -> String {
    let mut mods: Vec<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|k| matches!(*k, "Ctrl" | "Alt" | "Shift" | "Cmd"))
        .collect();
    mods.sort_unstable();
    mods.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Shortcut {
        Shortcut {
            id: "vscode-command-palette".to_string(),
            app: "vscode".to_string(),
            category: "general".to_string(),
            action: "Command Palette".to_string(),
            description: "Open the command palette".to_string(),
            keys: vec!["Ctrl".into(), "Shift".into(), "P".into()],
            difficulty: Difficulty::Easy,
            frequency: Frequency::Common,
        }
    }

    #[test]
    fn test_keys_display() {
        assert_eq!(palette().keys_display(), "Ctrl + Shift + P");
    }

    #[test]
    fn test_modifier_combo_sorted() {
        let mut shortcut = palette();
        shortcut.keys = vec!["Shift".into(), "Alt".into(), "Down".into()];
        assert_eq!(shortcut.modifier_combo(), "Alt+Shift");

        shortcut.keys = vec!["F5".into()];
        assert_eq!(shortcut.modifier_combo(), "");
    }

    #[test]
    fn test_modifier_combo_over_keys() {
        let keys: Vec<String> = vec!["Shift".into(), "Ctrl".into(), "P".into()];
        assert_eq!(modifier_combo(&keys), "Ctrl+Shift");
        assert_eq!(modifier_combo(&[]), "");
    }

    #[test]
    fn test_missing_frequency_defaults_to_occasional() {
        let json = r#"{
            "id": "x", "app": "chrome", "category": "tabs", "action": "a",
            "description": "d", "keys": ["Ctrl", "T"], "difficulty": "medium"
        }"#;
        let shortcut: Shortcut = serde_json::from_str(json).unwrap();
        assert_eq!(shortcut.frequency, Frequency::Occasional);
        assert_eq!(shortcut.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_parse_unknown_difficulty() {
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!("rare".parse::<Frequency>().unwrap(), Frequency::Rare);
    }
}
