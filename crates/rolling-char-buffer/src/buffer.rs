use alloc::{string::String, vec, vec::Vec};
use core::mem;

use crate::{
    error::{BufferError, ContractViolation},
    growth::{linearize, oversize},
    options::BufferOptions,
    source::CharSource,
};

/// A forever-growing `char` array over a streaming source, of which only the
/// unreleased tail is kept in memory.
///
/// Characters are addressed by their absolute position in the stream. Any
/// position inside the window `[window_start(), next_pos())` can be read
/// again at no cost, and reading `next_pos()` itself pulls from the source.
/// Call [`release_before`](Self::release_before) once older characters are no
/// longer needed, or the window (and the backing store) keeps growing.
///
/// ```
/// use rolling_char_buffer::RollingCharBuffer;
///
/// let mut buffer = RollingCharBuffer::new();
/// buffer.bind("let x".chars());
///
/// assert_eq!(buffer.read_at(0)?, Some('l'));
/// assert_eq!(buffer.read_at(1)?, Some('e'));
/// assert_eq!(buffer.read_at(0)?, Some('l'));
/// assert_eq!(buffer.read_range(0, 3)?, ['l', 'e', 't']);
///
/// buffer.release_before(4)?;
/// assert_eq!(buffer.read_at(4)?, Some('x'));
/// assert_eq!(buffer.read_at(5)?, None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RollingCharBuffer<S> {
    source: Option<S>,
    store: Vec<char>,
    // Next index of `store` to write to.
    next_write: usize,
    // Next absolute position to read from the source.
    next_pos: usize,
    // Retained characters, possibly wrapped around the end of `store`.
    count: usize,
    end: bool,
}

impl<S> Default for RollingCharBuffer<S> {
    fn default() -> Self {
        Self::with_options(BufferOptions::default())
    }
}

impl<S> RollingCharBuffer<S> {
    /// Creates an unbound buffer with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unbound buffer configured by `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            source: None,
            store: vec!['\0'; options.initial_capacity],
            next_write: 0,
            next_pos: 0,
            count: 0,
            end: false,
        }
    }

    /// Switches to a new source, starting again at position 0.
    ///
    /// All retained characters are discarded, but the backing store keeps its
    /// capacity. Returns the previously bound source so the caller can close
    /// it.
    pub fn bind(&mut self, source: S) -> Option<S> {
        tracing::trace!(capacity = self.store.len(), "binding character source");
        self.next_pos = 0;
        self.next_write = 0;
        self.count = 0;
        self.end = false;
        self.source.replace(source)
    }

    /// Detaches the current source and returns it.
    ///
    /// Retained characters stay readable. Reading the frontier afterwards
    /// fails with [`ContractViolation::Unbound`] unless the source had
    /// already been exhausted.
    pub fn unbind(&mut self) -> Option<S> {
        tracing::trace!(next_pos = self.next_pos, "unbinding character source");
        self.source.take()
    }

    /// The first position that has not been read from the source yet.
    #[must_use]
    pub fn next_pos(&self) -> usize {
        self.next_pos
    }

    /// The oldest position that can still be read.
    #[must_use]
    pub fn window_start(&self) -> usize {
        self.next_pos - self.count
    }

    /// Number of characters currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no characters are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Size of the backing store in characters.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Whether the bound source has reported its end.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.end
    }

    /// Whether a source is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Whether `pos` is retained and can be read without touching the source.
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        pos < self.next_pos && pos >= self.window_start()
    }

    /// Copies the retained characters `start..start + len` into a new `Vec`.
    ///
    /// The whole range must already have been read and not yet released.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::EmptyRange`] for `len == 0`, and
    /// [`ContractViolation::RangeOutOfWindow`] when the range is not inside
    /// the window.
    pub fn read_range(&self, start: usize, len: usize) -> Result<Vec<char>, ContractViolation> {
        let (head, tail) = self.range_slices(start, len)?;
        let mut out = Vec::with_capacity(len);
        out.extend_from_slice(head);
        out.extend_from_slice(tail);
        Ok(out)
    }

    /// Appends the retained characters `start..start + len` to `dst`.
    ///
    /// # Errors
    ///
    /// Same as [`read_range`](Self::read_range); `dst` is untouched on error.
    pub fn append_range(
        &self,
        start: usize,
        len: usize,
        dst: &mut String,
    ) -> Result<(), ContractViolation> {
        let (head, tail) = self.range_slices(start, len)?;
        dst.reserve(len);
        dst.extend(head);
        dst.extend(tail);
        Ok(())
    }

    /// Declares that no position before `pos` will be read again.
    ///
    /// Positions already released stay released: a `pos` at or below
    /// [`window_start`](Self::window_start) changes nothing. The backing store
    /// is never shrunk.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::ReleaseOutOfRange`] when `pos` is past the
    /// frontier.
    pub fn release_before(&mut self, pos: usize) -> Result<(), ContractViolation> {
        if pos > self.next_pos {
            return Err(ContractViolation::ReleaseOutOfRange {
                pos,
                next_pos: self.next_pos,
            });
        }
        self.count = self.count.min(self.next_pos - pos);
        Ok(())
    }

    /// Panics if the cursor bookkeeping is inconsistent.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn check_invariants(&self) {
        assert!(
            self.count <= self.store.len(),
            "count={} capacity={}",
            self.count,
            self.store.len()
        );
        assert!(
            self.next_write <= self.store.len(),
            "next_write={} capacity={}",
            self.next_write,
            self.store.len()
        );
        assert!(self.count <= self.next_pos);
    }

    // Maps a retained position to its index in `store`. Every physical access
    // goes through here.
    fn physical_index(&self, pos: usize) -> usize {
        debug_assert!(self.contains(pos));
        let back = self.next_pos - pos;
        if back <= self.next_write {
            self.next_write - back
        } else {
            self.next_write + self.store.len() - back
        }
    }

    fn check_in_window(&self, pos: usize) -> Result<(), ContractViolation> {
        if pos > self.next_pos {
            return Err(ContractViolation::ReadAhead {
                pos,
                next_pos: self.next_pos,
            });
        }
        let window_start = self.window_start();
        if pos < window_start {
            return Err(ContractViolation::Released { pos, window_start });
        }
        Ok(())
    }

    fn range_slices(&self, start: usize, len: usize) -> Result<(&[char], &[char]), ContractViolation> {
        if len == 0 {
            return Err(ContractViolation::EmptyRange { start });
        }
        let window_start = self.window_start();
        if start < window_start || start.checked_add(len).is_none_or(|end| end > self.next_pos) {
            return Err(ContractViolation::RangeOutOfWindow {
                start,
                len,
                window_start,
                next_pos: self.next_pos,
            });
        }

        let first = self.physical_index(start);
        let capacity = self.store.len();
        if first + len <= capacity {
            Ok((&self.store[first..first + len], &[][..]))
        } else {
            // Wrapped: tail of the store, then its head.
            let head_len = capacity - first;
            Ok((&self.store[first..], &self.store[..len - head_len]))
        }
    }
}

impl<S: CharSource> RollingCharBuffer<S> {
    /// Returns the character at absolute position `pos`.
    ///
    /// Any retained position may be read. `pos == next_pos()` reads one step
    /// past the last produced character: this pulls a batch from the source
    /// (growing the store first if it is full) and returns the first
    /// character of that batch, or `None` once the source is exhausted. After
    /// the end has been seen, further reads at the frontier return `None`
    /// without calling the source again.
    ///
    /// A single pull fills at most the free space between the write cursor and
    /// the physical end of the store; it never wraps within one call.
    ///
    /// # Errors
    ///
    /// - [`ContractViolation::ReadAhead`] for `pos > next_pos()`.
    /// - [`ContractViolation::Released`] for a position before the window.
    /// - [`ContractViolation::Unbound`] for a frontier read with no source.
    /// - [`ContractViolation::SourceOverrun`] when the source reports more
    ///   characters than it was given room for.
    /// - [`BufferError::Source`] with the source's error, unchanged. The
    ///   window is unchanged in that case.
    pub fn read_at(&mut self, pos: usize) -> Result<Option<char>, BufferError<S::Error>> {
        if pos != self.next_pos {
            self.check_in_window(pos)?;
            return Ok(Some(self.store[self.physical_index(pos)]));
        }
        if self.end {
            return Ok(None);
        }
        // Unbound reads must not grow the store.
        let Some(source) = self.source.as_mut() else {
            return Err(ContractViolation::Unbound { pos }.into());
        };

        if self.count == self.store.len() {
            let old_capacity = self.store.len();
            let new_capacity = oversize(old_capacity + 1, mem::size_of::<char>());
            tracing::trace!(
                old_capacity,
                new_capacity,
                count = self.count,
                "growing rolling buffer"
            );
            self.store = linearize(&self.store, self.next_write, new_capacity);
            self.next_write = old_capacity;
        }
        if self.next_write == self.store.len() {
            self.next_write = 0;
        }

        let available = self.store.len() - self.count.max(self.next_write);
        let batch = &mut self.store[self.next_write..self.next_write + available];
        let read = source.read(batch).map_err(BufferError::Source)?;
        if read > available {
            return Err(ContractViolation::SourceOverrun {
                returned: read,
                available,
            }
            .into());
        }
        if read == 0 {
            tracing::debug!(next_pos = self.next_pos, "character source exhausted");
            self.end = true;
            return Ok(None);
        }

        let ch = self.store[self.next_write];
        self.next_write += read;
        self.count += read;
        self.next_pos += read;
        Ok(Some(ch))
    }
}
