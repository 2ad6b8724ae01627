use serde::{Deserialize, Serialize};

/// How line breaks inside pasted content are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PasteNewlines {
    /// Collapse each line break (and surrounding whitespace) to one space
    #[default]
    Space,
    /// Keep line breaks inside the paragraph text
    Keep,
}

/// Editor session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo levels (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Seed for generated paragraph names (defaults to a hash of the session id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_seed: Option<String>,

    #[serde(default)]
    pub paste_newlines: PasteNewlines,
}

fn default_history_limit() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            name_seed: None,
            paste_newlines: PasteNewlines::default(),
        }
    }
}
