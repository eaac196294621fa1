//! Pull-based character sources.
//!
//! A [`CharSource`] hands out characters in batches on request. The buffer
//! asks for as many characters as fit in its contiguous free space and takes
//! whatever the source returns; a short read is not exhaustion, only a read
//! of zero is.

use core::{convert::Infallible, num::NonZeroUsize, str::Chars};

/// A stream that yields characters on demand.
///
/// Implementations write up to `dst.len()` characters into the front of `dst`
/// and return how many they wrote. `Ok(0)` signals that the source is
/// exhausted. Callers never pass an empty slice.
///
/// Mutable references forward to the referenced source, so a caller can bind
/// `&mut source` to keep ownership of it.
pub trait CharSource {
    /// Error raised when the underlying stream fails.
    type Error;

    /// Fills the front of `dst`, returning the number of characters written.
    ///
    /// # Errors
    ///
    /// Returns the source's own error when the underlying stream fails.
    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    type Error = S::Error;

    #[inline]
    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error> {
        (**self).read(dst)
    }
}

impl CharSource for Chars<'_> {
    type Error = Infallible;

    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error> {
        Ok(fill_from(self, dst))
    }
}

fn fill_from<I: Iterator<Item = char>>(iter: &mut I, dst: &mut [char]) -> usize {
    let mut written = 0;
    for (slot, ch) in dst.iter_mut().zip(iter) {
        *slot = ch;
        written += 1;
    }
    written
}

/// Adapts any `char` iterator into a [`CharSource`].
///
/// With [`with_max_batch`](Self::with_max_batch) every read returns at most
/// that many characters, which is how a slow or chunked stream behaves.
///
/// ```
/// use rolling_char_buffer::{CharSource, IterSource};
///
/// let mut source = IterSource::new("abcdef".chars()).with_max_batch(4);
/// let mut dst = ['\0'; 8];
/// assert_eq!(source.read(&mut dst), Ok(4));
/// assert_eq!(source.read(&mut dst), Ok(2));
/// assert_eq!(source.read(&mut dst), Ok(0));
/// ```
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
    max_batch: Option<NonZeroUsize>,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Wraps `iter`, filling as much of each request as it can.
    #[must_use]
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            max_batch: None,
        }
    }

    /// Caps every read at `max_batch` characters. Zero removes the cap.
    #[must_use]
    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = NonZeroUsize::new(max_batch);
        self
    }

    /// Returns the wrapped iterator.
    #[must_use]
    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    type Error = Infallible;

    fn read(&mut self, dst: &mut [char]) -> Result<usize, Self::Error> {
        let limit = self
            .max_batch
            .map_or(dst.len(), |max| max.get().min(dst.len()));
        Ok(fill_from(&mut self.iter, &mut dst[..limit]))
    }
}

#[cfg(feature = "std")]
pub use self::utf8::Utf8Reader;

#[cfg(feature = "std")]
mod utf8 {
    use alloc::{boxed::Box, vec};
    use std::io::{self, ErrorKind, Read};

    use super::CharSource;

    /// Size of the byte staging buffer, matching `std::io::BufReader`.
    const STAGING_SIZE: usize = 8 * 1024;

    /// Decodes UTF-8 from a byte reader into characters.
    ///
    /// Bytes are staged in an 8 KiB buffer; a multi-byte sequence split
    /// across two reads of the inner reader is held back until it completes.
    /// Malformed input, and input that ends inside a sequence, fail with
    /// [`ErrorKind::InvalidData`]. Characters decoded before the bad sequence
    /// are returned first and the error surfaces on the following read.
    ///
    /// [`ErrorKind::Interrupted`] from the inner reader is retried.
    ///
    /// ```
    /// use rolling_char_buffer::{RollingCharBuffer, Utf8Reader};
    ///
    /// let mut buffer = RollingCharBuffer::new();
    /// buffer.bind(Utf8Reader::new("héllo".as_bytes()));
    /// assert_eq!(buffer.read_at(0).unwrap(), Some('h'));
    /// assert_eq!(buffer.read_at(1).unwrap(), Some('é'));
    /// ```
    #[derive(Debug)]
    pub struct Utf8Reader<R> {
        inner: R,
        staging: Box<[u8]>,
        start: usize,
        end: usize,
        eof: bool,
    }

    impl<R: Read> Utf8Reader<R> {
        /// Wraps `inner`.
        #[must_use]
        pub fn new(inner: R) -> Self {
            Self {
                inner,
                staging: vec![0; STAGING_SIZE].into_boxed_slice(),
                start: 0,
                end: 0,
                eof: false,
            }
        }

        /// Returns the wrapped reader. Staged but undecoded bytes are lost.
        #[must_use]
        pub fn into_inner(self) -> R {
            self.inner
        }

        fn decode_into(&mut self, dst: &mut [char]) -> io::Result<usize> {
            let mut written = 0;
            while written < dst.len() && self.start < self.end {
                let pending = &self.staging[self.start..self.end];
                match bstr::decode_utf8(pending) {
                    (Some(ch), len) => {
                        dst[written] = ch;
                        written += 1;
                        self.start += len;
                    }
                    // A valid prefix running to the end of the staged bytes
                    // may still be completed by the next read.
                    (None, len) if len == pending.len() && !self.eof => break,
                    (None, _) if written > 0 => break,
                    (None, len) => {
                        let offending = pending[..len.max(1)].to_vec();
                        return Err(io::Error::new(
                            ErrorKind::InvalidData,
                            alloc::format!("invalid UTF-8 sequence {offending:02x?}"),
                        ));
                    }
                }
            }
            Ok(written)
        }

        fn refill(&mut self) -> io::Result<()> {
            self.staging.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
            loop {
                match self.inner.read(&mut self.staging[self.end..]) {
                    Ok(0) => {
                        self.eof = true;
                        return Ok(());
                    }
                    Ok(n) => {
                        self.end += n;
                        return Ok(());
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(e),
                }
            }
        }
    }

    impl<R: Read> CharSource for Utf8Reader<R> {
        type Error = io::Error;

        fn read(&mut self, dst: &mut [char]) -> io::Result<usize> {
            loop {
                let written = self.decode_into(dst)?;
                if written > 0 || dst.is_empty() {
                    return Ok(written);
                }
                if self.eof {
                    // `decode_into` reports leftovers once `eof` is set.
                    return Ok(0);
                }
                self.refill()?;
            }
        }
    }
}
