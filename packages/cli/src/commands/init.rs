use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{ParagraphSnapshot, ParagraphType, SectionSnapshot, Snapshot};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

/// A small article to start editing from
fn sample_document() -> Snapshot {
    Snapshot {
        sections: vec![SectionSnapshot {
            name: "main".to_string(),
            paragraphs: vec![
                ParagraphSnapshot {
                    name: "title".to_string(),
                    paragraph_type: ParagraphType::MainHeader,
                    text: "Untitled".to_string(),
                    placeholder_text: Some("Title".to_string()),
                },
                ParagraphSnapshot {
                    name: "body".to_string(),
                    paragraph_type: ParagraphType::Paragraph,
                    text: String::new(),
                    placeholder_text: Some("Tell your story...".to_string()),
                },
            ],
        }],
    }
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing folio workspace...".bright_blue().bold());

    let config = Config::default();

    let document_path = config.get_document_path(cwd);
    if !document_path.exists() || args.force {
        sample_document().write(&document_path)?;
        println!("  {} Created {}", "✓".green(), config.document);
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Write an edit script (a JSON array of steps)");
    println!("  2. Run: folio run --script steps.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_editor::EditSession;

    #[test]
    fn test_init_writes_config_and_document() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(InitArgs { force: false }, &cwd).unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config, Config::default());

        let session = EditSession::load(
            "init-test",
            config.get_document_path(&cwd),
            config.editor.clone(),
        )
        .unwrap();
        assert_eq!(session.document().paragraph_count(), 2);
        assert!(session.document().paragraph("body").unwrap().is_placeholder());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let config_path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&config_path, r#"{"historyLimit": 5}"#).unwrap();

        init(InitArgs { force: false }, &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().editor.history_limit, 5);

        init(InitArgs { force: true }, &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().editor.history_limit, 100);
    }
}
