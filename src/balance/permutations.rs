//! Lazy enumeration of index permutations
//!
//! Iterative Heap's algorithm: each step swaps one pair, so the next
//! permutation is produced in O(1) amortized time and only the current
//! ordering is held in memory.

/// Every ordering of `0..n`, starting with the identity
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    counters: Vec<usize>,
    index: usize,
    started: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            counters: vec![0; n],
            index: 1,
            started: false,
        }
    }

    /// Start over from the identity ordering
    pub fn reset(&mut self) {
        let n = self.current.len();
        *self = Self::new(n);
    }

    /// Advance to the next ordering, or `false` once all have been produced
    fn advance(&mut self) -> bool {
        let n = self.current.len();
        while self.index < n {
            if self.counters[self.index] < self.index {
                if self.index % 2 == 0 {
                    self.current.swap(0, self.index);
                } else {
                    self.current.swap(self.counters[self.index], self.index);
                }
                self.counters[self.index] += 1;
                self.index = 1;
                return true;
            }
            self.counters[self.index] = 0;
            self.index += 1;
        }
        false
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.current.clone());
        }
        if self.advance() {
            Some(self.current.clone())
        } else {
            None
        }
    }
}
