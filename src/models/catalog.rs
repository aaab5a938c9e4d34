//! Built-in sample shortcuts used to seed an empty store.
use super::shortcut::{Difficulty, Frequency, Shortcut};

use super::shortcut::Difficulty::{Easy, Hard, Medium};
use super::shortcut::Frequency::{Common, Occasional, Rare};

const SAMPLES: &[(&str, &str, &str, &str, &[&str], Difficulty, Frequency)] = &[
    ("vscode-command-palette", "vscode", "general", "Command Palette", &["Ctrl", "Shift", "P"], Easy, Common),
    ("vscode-quick-open", "vscode", "general", "Quick Open File", &["Ctrl", "P"], Easy, Common),
    ("vscode-save", "vscode", "general", "Save File", &["Ctrl", "S"], Easy, Common),
    ("vscode-zen-mode", "vscode", "general", "Zen Mode", &["Ctrl", "K", "Z"], Hard, Rare),
    ("vscode-duplicate-line", "vscode", "editing", "Duplicate Line", &["Alt", "Shift", "Down"], Medium, Common),
    ("vscode-block-comment", "vscode", "editing", "Block Comment", &["Alt", "Shift", "A"], Hard, Occasional),
    ("vscode-rename-symbol", "vscode", "editing", "Rename Symbol", &["F2"], Medium, Common),
    ("vscode-select-all-occurrences", "vscode", "multicursor", "Select All Occurrences", &["Ctrl", "Shift", "L"], Hard, Occasional),
    ("chrome-new-tab", "chrome", "tabs", "New Tab", &["Ctrl", "T"], Easy, Common),
    ("chrome-reopen-tab", "chrome", "tabs", "Reopen Closed Tab", &["Ctrl", "Shift", "T"], Medium, Common),
    ("chrome-devtools", "chrome", "developer", "Developer Tools", &["Ctrl", "Shift", "I"], Medium, Occasional),
    ("chrome-task-manager", "chrome", "developer", "Task Manager", &["Shift", "Esc"], Hard, Rare),
];

pub fn sample_shortcuts() -> Vec<Shortcut> {
    SAMPLES
        .iter()
        .map(|&(id, app, category, action, keys, difficulty, frequency)| Shortcut {
            id: id.to_string(),
            app: app.to_string(),
            category: category.to_string(),
            action: action.to_string(),
            description: action.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            difficulty,
            frequency,
        })
        .collect()
}
