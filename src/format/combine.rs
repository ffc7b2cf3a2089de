//! Formatter composition: union of independent strategies and sequential
//! pipelines.

use super::Formatter;
use crate::tree::CharTree;

/// Applies each formatter independently to the same input and unions the
/// results; with `include_unformatted`, the untransformed input joins the
/// union too.
///
/// This is "try several decodings of the same password and consider all
/// their outputs", as opposed to [`Pipeline`]'s "decode, then further mutate
/// the decoding".
pub struct Combiner {
    formatters: Vec<Box<dyn Formatter>>,
    include_unformatted: bool,
}

impl Combiner {
    pub fn new(formatters: Vec<Box<dyn Formatter>>, include_unformatted: bool) -> Self {
        Combiner {
            formatters,
            include_unformatted,
        }
    }
}

impl Formatter for Combiner {
    fn apply(&self, tree: &CharTree) -> CharTree {
        let mut acc = if self.include_unformatted {
            tree.clone()
        } else {
            CharTree::empty()
        };
        for f in &self.formatters {
            let out = f.apply(tree);
            acc = CharTree::merge(&acc, &out);
        }
        acc
    }
}

/// Applies formatters one after another, each consuming the previous one's
/// output. An empty pipeline is the identity.
///
/// This replaces per-formatter "next" links: any sequence is expressed as one
/// pipeline, and the chain is managed in a single place via [`Pipeline::push`]
/// and [`Pipeline::clear`].
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Formatter>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Formatter>>) -> Self {
        Pipeline { stages }
    }

    /// Appends a stage to the end of the pipeline.
    pub fn push(&mut self, stage: Box<dyn Formatter>) {
        self.stages.push(stage);
    }

    /// Removes all stages, turning the pipeline back into the identity.
    pub fn clear(&mut self) {
        self.stages.clear();
    }
}

impl Formatter for Pipeline {
    fn apply(&self, tree: &CharTree) -> CharTree {
        let mut out = tree.clone();
        for stage in &self.stages {
            out = stage.apply(&out);
        }
        out
    }
}
