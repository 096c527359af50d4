//! Small standalone numeric utilities
//!
//! Neither module touches the record store.

pub mod piecewise;
pub mod scaler;

pub use piecewise::{evaluate, Branch, EvalError, Evaluation};
pub use scaler::{multiply_by_three, ScaleError, SCALE_FACTOR};
