//! Candidate-generation formatters
//!
//! Each formatter is a pure transformation from one [`CharTree`] to another.
//! Formatters compose two ways: [`Pipeline`] applies them one after another
//! (sequence), [`Combiner`] applies them independently and unions the results.

mod case;
mod coder;
mod combine;
mod length;
mod substring;

pub use case::{Capitalize, LowerCase, MixedCase, UpperCase};
pub use coder::{CodeMap, Coder};
pub use combine::{Combiner, Pipeline};
pub use length::{LengthFilter, Truncator};
pub use substring::SubstringGenerator;

use thiserror::Error;

use crate::tree::CharTree;

/// Errors raised when a formatter or constraint is built with invalid
/// arguments. These are caller bugs, fixed by fixing the arguments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Invalid bounds: max {max} is less than min {min}")]
    InvalidBounds { min: usize, max: usize },
    #[error("Code map contains no substitutions")]
    EmptyCodeMap,
}

/// A candidate-generation strategy: a pure function from one string set to
/// another. Output is always a set; duplicate expansions collapse in the tree.
pub trait Formatter: Send + Sync {
    fn apply(&self, tree: &CharTree) -> CharTree;
}

impl Formatter for Box<dyn Formatter> {
    fn apply(&self, tree: &CharTree) -> CharTree {
        (**self).apply(tree)
    }
}
