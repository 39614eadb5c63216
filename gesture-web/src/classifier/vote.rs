//! Majority-vote smoothing over recent accepted verdicts
//!
//! Suppresses per-frame jitter: the displayed class is the one accepted most
//! often in the last `capacity` accepted frames.

use super::buffer::RingBuffer;

pub struct VoteSmoother {
    history: RingBuffer<usize>,
}

impl VoteSmoother {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: RingBuffer::new(capacity),
        }
    }

    /// Record an accepted class index (never call for rejected frames)
    pub fn record(&mut self, class_index: usize) {
        self.history.push(class_index);
    }

    /// Most frequent class in the window, `None` if nothing was accepted yet
    ///
    /// Ties go to the class that appears first in the window (oldest first).
    pub fn resolve(&self) -> Option<usize> {
        // (class, count) in order of first appearance
        let mut counts: Vec<(usize, usize)> = Vec::new();
        for &class in self.history.iter() {
            match counts.iter_mut().find(|(c, _)| *c == class) {
                Some((_, n)) => *n += 1,
                None => counts.push((class, 1)),
            }
        }

        let mut winner: Option<(usize, usize)> = None;
        for (class, n) in counts {
            match winner {
                Some((_, best)) if n <= best => {}
                _ => winner = Some((class, n)),
            }
        }
        winner.map(|(class, _)| class)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
