//! The pipeline engine: a fixed, validated step graph and its run loop.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use super::step::Step;
use super::transition::{RoutePredicate, Transition};
use crate::types::AnalysisRecord;

/// Hard bound on executed steps per run, a guard against a mis-wired graph.
const STEP_BUDGET: usize = 64;

/// Wiring error detected when building a pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
  #[error("entry step is not set")]
  MissingEntry,
  #[error("terminal step is not set")]
  MissingTerminal,
  #[error("duplicate step id: {0}")]
  DuplicateStep(String),
  #[error("transition references unknown step: {0}")]
  UnknownStep(String),
  #[error("step has no outgoing transition: {0}")]
  MissingTransition(String),
  #[error("terminal step must not have an outgoing transition: {0}")]
  TerminalNotEnd(String),
  #[error("cycle detected at step: {0}")]
  Cycle(String),
  #[error("step is unreachable from the entry: {0}")]
  Unreachable(String),
}

/// Contract violation surfaced by the run loop. Step-level failures never
/// appear here; steps are total and record their failures as issues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
  #[error("unknown step selected by routing: {0}")]
  UnknownStep(String),
  #[error("no transition defined for step: {0}")]
  MissingTransition(String),
  #[error("step budget exceeded after {0} steps")]
  BudgetExceeded(usize),
}

/// One recorded step execution, for debugging and replay assertions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLogEntry {
  /// 1-based step index.
  pub step: u32,
  /// Step that was executed.
  pub step_id: String,
  /// When the step finished.
  pub at: DateTime<Utc>,
  /// Issue count on the record after the step ran.
  pub issues_after: usize,
  /// Next step selected by routing (`None` at the terminal).
  pub next_step_id: Option<String>,
}

/// Result of one pipeline run: the final record plus execution trace.
#[derive(Debug)]
pub struct PipelineRun {
  pub record: AnalysisRecord,
  /// Ids of all executed steps in order.
  pub completed_steps: Vec<String>,
  pub step_log: Vec<StepLogEntry>,
}

/// A validated, immutable step graph with a designated entry and terminal.
pub struct Pipeline {
  entry: String,
  terminal: String,
  steps: HashMap<String, Arc<dyn Step>>,
  transitions: HashMap<String, Transition>,
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("entry", &self.entry)
      .field("terminal", &self.terminal)
      .field("steps", &self.steps.keys().collect::<Vec<_>>())
      .field("transitions", &self.transitions)
      .finish()
  }
}

impl Pipeline {
  pub fn builder() -> PipelineBuilder {
    PipelineBuilder::default()
  }

  pub fn entry(&self) -> &str {
    &self.entry
  }

  pub fn terminal(&self) -> &str {
    &self.terminal
  }

  /// Executes the pipeline over one record.
  ///
  /// Steps run strictly one at a time; after each step the outgoing
  /// transition is evaluated against the post-step record. The loop ends
  /// when the terminal step has executed.
  #[instrument(level = "trace", skip(self, record), fields(run_id = %record.run_id))]
  pub async fn run(&self, record: AnalysisRecord) -> Result<PipelineRun, PipelineError> {
    let mut record = record;
    let mut current = self.entry.clone();
    let mut completed: Vec<String> = Vec::new();
    let mut step_log: Vec<StepLogEntry> = Vec::new();

    loop {
      if completed.len() >= STEP_BUDGET {
        return Err(PipelineError::BudgetExceeded(completed.len()));
      }

      let step = self
        .steps
        .get(&current)
        .ok_or_else(|| PipelineError::UnknownStep(current.clone()))?;

      info!(step_id = %current, "executing step");
      record = step.apply(record).await;
      completed.push(current.clone());

      let transition = self
        .transitions
        .get(&current)
        .ok_or_else(|| PipelineError::MissingTransition(current.clone()))?;
      let next = transition.select(&record).map(str::to_string);

      step_log.push(StepLogEntry {
        step: completed.len() as u32,
        step_id: current.clone(),
        at: Utc::now(),
        issues_after: record.issues.len(),
        next_step_id: next.clone(),
      });

      match next {
        Some(next_id) => current = next_id,
        None => {
          info!(completed_steps = ?completed, "pipeline complete");
          return Ok(PipelineRun {
            record,
            completed_steps: completed,
            step_log,
          });
        }
      }
    }
  }
}

/// Builder for [Pipeline]; `build` validates the full topology.
#[derive(Default)]
pub struct PipelineBuilder {
  entry: Option<String>,
  terminal: Option<String>,
  steps: HashMap<String, Arc<dyn Step>>,
  transitions: HashMap<String, Transition>,
  duplicates: Vec<String>,
}

impl PipelineBuilder {
  /// Registers a step under its own id.
  pub fn step(mut self, step: impl Step + 'static) -> Self {
    let id = step.id().to_string();
    if self.steps.insert(id.clone(), Arc::new(step)).is_some() {
      self.duplicates.push(id);
    }
    self
  }

  pub fn entry(mut self, id: impl Into<String>) -> Self {
    self.entry = Some(id.into());
    self
  }

  /// Designates the terminal step: the step guaranteed to execute last on
  /// every path.
  pub fn terminal(mut self, id: impl Into<String>) -> Self {
    self.terminal = Some(id.into());
    self
  }

  /// Adds an unconditional edge.
  pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
    self
      .transitions
      .insert(from.into(), Transition::Goto(to.into()));
    self
  }

  /// Adds a two-way conditional edge evaluated on the post-step record.
  pub fn conditional_edge(
    mut self,
    from: impl Into<String>,
    predicate: RoutePredicate,
    when_true: impl Into<String>,
    when_false: impl Into<String>,
  ) -> Self {
    self.transitions.insert(
      from.into(),
      Transition::Branch {
        predicate,
        when_true: when_true.into(),
        when_false: when_false.into(),
      },
    );
    self
  }

  /// Validates the wiring and produces the pipeline.
  pub fn build(mut self) -> Result<Pipeline, GraphError> {
    if let Some(id) = self.duplicates.first() {
      return Err(GraphError::DuplicateStep(id.clone()));
    }
    let entry = self.entry.take().ok_or(GraphError::MissingEntry)?;
    let terminal = self.terminal.take().ok_or(GraphError::MissingTerminal)?;
    if !self.steps.contains_key(&entry) {
      return Err(GraphError::UnknownStep(entry));
    }
    if !self.steps.contains_key(&terminal) {
      return Err(GraphError::UnknownStep(terminal));
    }
    if self.transitions.contains_key(&terminal) {
      return Err(GraphError::TerminalNotEnd(terminal));
    }
    self.transitions.insert(terminal.clone(), Transition::End);

    for (from, transition) in &self.transitions {
      if !self.steps.contains_key(from) {
        return Err(GraphError::UnknownStep(from.clone()));
      }
      for to in transition.successors() {
        if !self.steps.contains_key(to) {
          return Err(GraphError::UnknownStep(to.to_string()));
        }
      }
    }
    for id in self.steps.keys() {
      if !self.transitions.contains_key(id) {
        return Err(GraphError::MissingTransition(id.clone()));
      }
    }

    check_acyclic(&entry, &self.transitions)?;

    // Acyclic + a transition on every step: each path from the entry ends at
    // the single End transition, so the terminal runs on every path.
    let reachable = reachable_from(&entry, &self.transitions);
    for id in self.steps.keys() {
      if !reachable.contains(id.as_str()) {
        return Err(GraphError::Unreachable(id.clone()));
      }
    }

    Ok(Pipeline {
      entry,
      terminal,
      steps: self.steps,
      transitions: self.transitions,
    })
  }
}

/// Depth-first cycle check over every step's successors.
fn check_acyclic(
  entry: &str,
  transitions: &HashMap<String, Transition>,
) -> Result<(), GraphError> {
  let mut visiting: HashSet<&str> = HashSet::new();
  let mut done: HashSet<&str> = HashSet::new();

  fn visit<'a>(
    id: &'a str,
    transitions: &'a HashMap<String, Transition>,
    visiting: &mut HashSet<&'a str>,
    done: &mut HashSet<&'a str>,
  ) -> Result<(), GraphError> {
    if done.contains(id) {
      return Ok(());
    }
    if !visiting.insert(id) {
      return Err(GraphError::Cycle(id.to_string()));
    }
    if let Some(transition) = transitions.get(id) {
      for next in transition.successors() {
        visit(next, transitions, visiting, done)?;
      }
    }
    visiting.remove(id);
    done.insert(id);
    Ok(())
  }

  visit(entry, transitions, &mut visiting, &mut done)
}

/// All step ids reachable from `start` (inclusive).
fn reachable_from<'a>(
  start: &'a str,
  transitions: &'a HashMap<String, Transition>,
) -> HashSet<&'a str> {
  let mut seen: HashSet<&str> = HashSet::new();
  let mut stack = vec![start];
  while let Some(id) = stack.pop() {
    if !seen.insert(id) {
      continue;
    }
    if let Some(transition) = transitions.get(id) {
      stack.extend(transition.successors());
    }
  }
  seen
}
