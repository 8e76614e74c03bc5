//! Batched evaluation of potential operators
//!
//! Evaluation is split into three layers:
//! - [batched::accumulate_batch] integrates one kernel against the basis expansion on
//!   a batch of `W` elements for a single evaluation point,
//! - a reduction unit runs a number of batches in parallel, joins, and reduces their
//!   partial sums into one value per component,
//! - [dispatch::evaluate_into] partitions the (evaluation point, element batch) index
//!   space into units and writes each unit's value into its own cell of a
//!   [PotentialBuffer].

pub mod batched;
pub mod buffer;
pub mod dispatch;
pub mod options;

pub use batched::{accumulate_batch, ElementBatch};
pub use buffer::PotentialBuffer;
pub use dispatch::{evaluate, evaluate_into, PotentialEvaluation};
pub use options::EvaluationOptions;
