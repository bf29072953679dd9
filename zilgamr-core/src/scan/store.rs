//! Fixed-capacity sample store
//!
//! Holds the samples of one sweep in insertion order. Once full, further
//! samples are dropped without disturbing what is already stored.

use heapless::Vec;

use super::sample::Sample;
use crate::config::SAMPLE_CAPACITY;

/// Ordered, append-only buffer for one scan cycle
#[derive(Debug, Clone, Default)]
pub struct SampleStore<const N: usize = SAMPLE_CAPACITY> {
    samples: Vec<Sample, N>,
}

impl<const N: usize> SampleStore<N> {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Forget all stored samples
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Append a sample
    ///
    /// Returns `false` and drops the sample when the store is full.
    pub fn append(&mut self, sample: Sample) -> bool {
        self.samples.push(sample).is_ok()
    }

    /// Iterate over stored samples in insertion order
    pub fn iter(&self) -> core::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<'a, const N: usize> IntoIterator for &'a SampleStore<N> {
    type Item = &'a Sample;
    type IntoIter = core::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
