use alloc::{string::String, vec::Vec};
use core::convert::Infallible;

use crate::{BufferOptions, CharSource, RollingCharBuffer};

/// `len` characters cycling through `A..=Z`.
pub fn alphabet(len: usize) -> String {
    (b'A'..=b'Z').cycle().take(len).map(char::from).collect()
}

/// A buffer with the given starting capacity.
pub fn buffer_with_capacity<S>(initial_capacity: usize) -> RollingCharBuffer<S> {
    RollingCharBuffer::with_options(BufferOptions { initial_capacity })
}

/// Serves `text` in batches of at most `max_batch` characters (0 = unbounded)
/// and records the length of every slice it is handed.
#[derive(Debug)]
pub struct RecordingSource {
    chars: Vec<char>,
    pos: usize,
    max_batch: usize,
    pub offered: Vec<usize>,
}

impl RecordingSource {
    pub fn new(text: &str, max_batch: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            max_batch,
            offered: Vec::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.offered.len()
    }
}

impl CharSource for RecordingSource {
    type Error = Infallible;

    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error> {
        self.offered.push(dst.len());
        let mut n = dst.len().min(self.chars.len() - self.pos);
        if self.max_batch > 0 {
            n = n.min(self.max_batch);
        }
        dst[..n].copy_from_slice(&self.chars[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broken;

/// Serves `good` characters, then fails every read after that.
#[derive(Debug)]
pub struct FailingSource {
    pub good: usize,
    served: usize,
}

impl FailingSource {
    pub fn new(good: usize) -> Self {
        Self { good, served: 0 }
    }
}

impl CharSource for FailingSource {
    type Error = Broken;

    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error> {
        if self.served == self.good {
            return Err(Broken);
        }
        let n = dst.len().min(self.good - self.served);
        for (i, slot) in dst[..n].iter_mut().enumerate() {
            *slot = char::from(b'a' + ((self.served + i) % 26) as u8);
        }
        self.served += n;
        Ok(n)
    }
}

/// Claims to have written one more character than it was given room for.
#[derive(Debug)]
pub struct OverrunSource;

impl CharSource for OverrunSource {
    type Error = Infallible;

    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error> {
        Ok(dst.len() + 1)
    }
}
