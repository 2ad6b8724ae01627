//! # Post-Effect System
//!
//! Transactions can trigger follow-up operations that keep the document
//! usable.
//!
//! ## Design
//!
//! After a transaction's primary operations are applied, each registered
//! effect inspects the resulting state and may return extra operation
//! pairs. Those pairs are applied right away and recorded in the *same*
//! history entry, so one undo reverts the edit and its consequences.
//!
//! Post-effects are:
//! - **Deterministic**: Same state always produces same effects
//! - **Minimal**: Only generate necessary secondary operations

use crate::names::NameGenerator;
use crate::operations::{Operation, OperationError, OperationPair};
use crate::state::EditState;

/// Post-effect that can be triggered by a transaction
pub trait PostEffect: std::fmt::Debug {
    /// Inspect the state after a transaction and return secondary pairs
    fn analyze(&self, state: &EditState, names: &mut NameGenerator) -> Vec<OperationPair>;
}

/// Keep at least one paragraph in the document so the selection always has
/// somewhere to live
#[derive(Debug)]
pub struct EnsureParagraph;

impl PostEffect for EnsureParagraph {
    fn analyze(&self, state: &EditState, names: &mut NameGenerator) -> Vec<OperationPair> {
        if state.document.paragraph_count() > 0 {
            return vec![];
        }

        let Some(section) = state.document.sections().first() else {
            return vec![];
        };

        let name = names.next_name(&state.document);
        vec![OperationPair::new(
            Operation::insert_paragraph(section.name.clone(), name.clone(), 0),
            Operation::delete_paragraph(name),
        )]
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(EnsureParagraph)],
        }
    }

    /// Register an additional effect
    pub fn with_effect(mut self, effect: impl PostEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Collect the secondary pairs every effect asks for
    pub fn analyze(&self, state: &EditState, names: &mut NameGenerator) -> Vec<OperationPair> {
        let mut secondary = Vec::new();

        for effect in &self.effects {
            secondary.append(&mut effect.analyze(state, names));
        }

        secondary
    }

    /// Apply primary pairs plus their post-effects, atomically. Returns
    /// every pair applied, in order, ready to be recorded as one entry.
    pub fn apply_with_effects(
        &self,
        mut pairs: Vec<OperationPair>,
        state: &mut EditState,
        names: &mut NameGenerator,
    ) -> Result<Vec<OperationPair>, OperationError> {
        state.run_forward(&pairs)?;

        let secondary = self.analyze(state, names);
        if !secondary.is_empty() {
            let saved_selection = state.selection.clone();
            if let Err(err) = state.run_forward(&secondary) {
                // primary ops are already in; revert them too
                state.run_backward(&pairs)?;
                state.selection = saved_selection;
                return Err(err);
            }
            pairs.extend(secondary);
        }

        Ok(pairs)
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
