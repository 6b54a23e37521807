//! Odometer-order enumeration of a generator's byte arrays.

use super::ByteSpec;
use std::iter::FusedIterator;

/// Iterator over every byte array a [`ByteArrayGenerator`](super::ByteArrayGenerator)
/// describes. The last position increments fastest and carries into the one
/// before it when it wraps from `hi` back to `lo`.
#[derive(Debug, Clone)]
pub struct ByteArrayIter<'a> {
    specs: &'a [ByteSpec],
    current: Vec<u8>,
    done: bool,
}

impl<'a> ByteArrayIter<'a> {
    pub(crate) fn new(specs: &'a [ByteSpec]) -> Self {
        ByteArrayIter {
            specs,
            current: specs.iter().map(ByteSpec::lo).collect(),
            done: specs.is_empty(),
        }
    }

    fn advance(&mut self) {
        for (value, spec) in self.current.iter_mut().zip(self.specs).rev() {
            if *value < spec.hi() {
                *value += 1;
                return;
            }
            *value = spec.lo();
        }
        // carried out of the first position: every value has been produced
        self.done = true;
    }
}

impl Iterator for ByteArrayIter<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.done {
            return None;
        }
        let out = self.current.clone();
        self.advance();
        Some(out)
    }
}

impl FusedIterator for ByteArrayIter<'_> {}
