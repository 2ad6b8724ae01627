use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{EditSession, EditorError, Intent, Position, Selection};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON file holding an array of steps
    #[arg(short, long)]
    pub script: PathBuf,

    /// Document snapshot to edit (overrides config)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Write the resulting snapshot here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One scripted editor action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    /// Place the selection; omit `end` for a caret
    Select {
        start: Position,
        #[serde(default)]
        end: Option<Position>,
    },

    Apply { intent: Intent },

    Undo,

    Redo,

    /// Queue rendered text for a paragraph
    #[serde(rename_all = "camelCase")]
    Observe {
        paragraph: String,
        text: String,
        cursor_offset: usize,
    },

    /// Finalize queued observations
    Commit,
}

/// Run one step, returning a short summary line
pub fn execute(session: &mut EditSession, step: &Step) -> Result<String, EditorError> {
    match step {
        Step::Select { start, end } => {
            let selection = match end {
                Some(end) => Selection::new(start.clone(), end.clone()),
                None => Selection::collapsed(start.clone()),
            };
            session.set_selection(selection)?;
            Ok(format!("select {}:{}", start.paragraph, start.offset))
        }

        Step::Apply { intent } => {
            let outcome = session.apply_intent(intent)?;
            Ok(format!(
                "{} → {}:{} ({} ops)",
                intent.name(),
                outcome.cursor_after.paragraph,
                outcome.cursor_after.offset,
                outcome.ops_applied
            ))
        }

        Step::Undo => {
            let outcome = session.undo()?;
            Ok(format!("undo ({} ops)", outcome.ops_applied))
        }

        Step::Redo => {
            let outcome = session.redo()?;
            Ok(format!("redo ({} ops)", outcome.ops_applied))
        }

        Step::Observe {
            paragraph,
            text,
            cursor_offset,
        } => {
            let id = session.observe_text(paragraph.clone(), text.clone(), *cursor_offset)?;
            Ok(format!("observe {paragraph} ({id})"))
        }

        Step::Commit => {
            let committed = session.commit_observations()?;
            Ok(format!("commit ({committed} observations)"))
        }
    }
}

pub fn run(args: RunArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document_path = args
        .document
        .clone()
        .unwrap_or_else(|| config.get_document_path(cwd));

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read script {}", args.script.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid script {}", args.script.display()))?;

    let mut session = EditSession::load("folio-cli", &document_path, config.editor.clone())
        .with_context(|| format!("Cannot open document {}", document_path.display()))?;

    debug!(steps = steps.len(), document = %document_path.display(), "running script");
    eprintln!("{}", "✏️  Replaying edit script...".bright_blue().bold());

    for (index, step) in steps.iter().enumerate() {
        match execute(&mut session, step) {
            Ok(summary) => eprintln!("  {} {}", "✓".green(), summary),
            Err(err) if !err.is_fatal() => {
                eprintln!("  {} step {} skipped: {}", "⚠️".yellow(), index + 1, err)
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("Step {} failed", index + 1)));
            }
        }
    }

    match &args.output {
        Some(path) => {
            session.save(path)?;
            eprintln!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", session.snapshot().to_json()?),
    }

    Ok(())
}
