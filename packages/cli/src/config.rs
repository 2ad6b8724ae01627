use folio_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Document snapshot opened when no `--document` is given
    #[serde(default = "default_document")]
    pub document: String,

    /// Editor session settings
    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_document() -> String {
    "document.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the default document
    pub fn get_document_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.document)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document: default_document(),
            editor: EditorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_editor::PasteNewlines;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "document": "drafts/essay.json",
            "historyLimit": 25,
            "pasteNewlines": "keep"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.document, "drafts/essay.json");
        assert_eq!(config.editor.history_limit, 25);
        assert_eq!(config.editor.paste_newlines, PasteNewlines::Keep);
        assert_eq!(config.editor.name_seed, None);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.document, "document.json");
        assert_eq!(config.editor.history_limit, 100);
    }

    #[test]
    fn test_load_missing_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}
