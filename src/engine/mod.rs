//! Pipeline execution engine: step contract, routing and the run loop.

mod pipeline;
mod step;
mod transition;

pub use pipeline::{GraphError, Pipeline, PipelineBuilder, PipelineError, PipelineRun, StepLogEntry};
pub use step::Step;
pub use transition::{RoutePredicate, Transition};
