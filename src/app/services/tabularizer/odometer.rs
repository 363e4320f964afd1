//! Row-major index enumeration.
//!
//! The Cartesian product of a variable's dimension sizes is walked with a
//! mixed-radix counter instead of recursion: an index vector incremented
//! with carry against the per-axis sizes, last axis fastest. The i-th tuple
//! yielded is exactly the row-major unraveling of flat index i, so the
//! counter stays in lockstep with the variable's flat data array.

/// Mixed-radix counter over a shape, yielding index tuples in row-major
/// order (the last axis advances fastest)
#[derive(Debug, Clone)]
pub struct Odometer {
    sizes: Vec<usize>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Odometer {
    /// Create a counter over the given axis sizes. A zero-size axis makes
    /// the index space empty; an empty shape yields exactly one empty tuple.
    pub fn new(sizes: &[usize]) -> Self {
        let exhausted = sizes.iter().any(|&s| s == 0);
        Self {
            sizes: sizes.to_vec(),
            indices: vec![0; sizes.len()],
            exhausted,
        }
    }

    /// Total number of tuples in the index space (1 for an empty shape)
    pub fn total(&self) -> usize {
        self.sizes.iter().product()
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();

        // Increment with carry, last axis first
        let mut axis = self.indices.len();
        loop {
            if axis == 0 {
                self.exhausted = true;
                break;
            }
            axis -= 1;
            self.indices[axis] += 1;
            if self.indices[axis] < self.sizes[axis] {
                break;
            }
            self.indices[axis] = 0;
        }

        Some(current)
    }
}
