use std::collections::BTreeMap;

use serde::Serialize;

/// Where one component is in the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    Unvisited,
    BoundaryResolved,
    GuardInjected,
    GuardSkipped,
    Wrapped,
    WrapSkipped,
    Extracted,
    Done,
    /// Boundary could not be resolved; no further operations this run.
    Failed,
}

/// Per-component states of one run.
#[derive(Debug, Default)]
pub struct Progress {
    states: BTreeMap<String, ComponentState>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, name: &str) -> ComponentState {
        self.states
            .get(name)
            .copied()
            .unwrap_or(ComponentState::Unvisited)
    }

    pub fn is_failed(&self, name: &str) -> bool {
        self.state(name) == ComponentState::Failed
    }

    /// Move `name` to `next`. A failed component stays failed.
    pub fn advance(&mut self, name: &str, next: ComponentState) {
        let state = self
            .states
            .entry(name.to_string())
            .or_insert(ComponentState::Unvisited);
        if *state != ComponentState::Failed {
            *state = next;
        }
    }

    pub fn fail(&mut self, name: &str) {
        self.states.insert(name.to_string(), ComponentState::Failed);
    }

    /// Close the pass: every visited component that did not fail is done.
    pub fn finish(self) -> BTreeMap<String, ComponentState> {
        self.states
            .into_iter()
            .map(|(name, state)| match state {
                ComponentState::Failed | ComponentState::Unvisited => (name, state),
                _ => (name, ComponentState::Done),
            })
            .collect()
    }
}
