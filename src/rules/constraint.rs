//! Weighted count constraints shared by the simple rule shells.

use crate::format::ConstructionError;

/// A `[min, max]` window on a count, with a weight.
///
/// Rules keep their constraints sorted by descending weight; during a partial
/// check, constraints below the requested weight threshold are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountConstraint {
    min: usize,
    max: Option<usize>,
    weight: i32,
}

impl CountConstraint {
    /// # Errors
    /// Fails if `max` is less than `min`.
    pub fn new(min: usize, max: Option<usize>, weight: i32) -> Result<Self, ConstructionError> {
        if let Some(max) = max {
            if max < min {
                return Err(ConstructionError::InvalidBounds { min, max });
            }
        }
        Ok(CountConstraint { min, max, weight })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Whether `count` lies inside the window.
    pub fn test(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    /// Message fragment describing the window, e.g. "at least 8".
    pub(crate) fn describe(&self) -> String {
        match (self.min, self.max) {
            (min, None) => format!("at least {min}"),
            (0, Some(max)) => format!("at most {max}"),
            (min, Some(max)) if min == max => format!("exactly {min}"),
            (min, Some(max)) => format!("between {min} and {max}"),
        }
    }
}

/// Orders constraints by descending weight, so a partial check can stop at
/// the first constraint below its threshold.
pub(crate) fn sort_by_weight(constraints: &mut [CountConstraint]) {
    constraints.sort_by_key(|c| std::cmp::Reverse(c.weight()));
}
