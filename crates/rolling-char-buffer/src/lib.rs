//! Random access to a streaming character source through a rolling window.
//!
//! [`RollingCharBuffer`] sits between a pull-based [`CharSource`] and a
//! scanner that mostly moves forward, but now and then needs to look back at
//! characters it already consumed or peek one character ahead. The scanner
//! addresses characters by absolute stream position, as if the whole input
//! were one array, while the buffer only keeps the positions that have not
//! been released yet in a growable circular store.
//!
//! ```
//! use rolling_char_buffer::{IterSource, RollingCharBuffer};
//!
//! let mut buffer = RollingCharBuffer::new();
//! buffer.bind(IterSource::new("foo-bar".chars()).with_max_batch(2));
//!
//! // Scan to the dash, then look back at the word before it.
//! let mut pos = 0;
//! while let Some(ch) = buffer.read_at(pos)? {
//!     if ch == '-' {
//!         break;
//!     }
//!     pos += 1;
//! }
//! let word: String = buffer.read_range(0, pos)?.into_iter().collect();
//! assert_eq!(word, "foo");
//!
//! // The word is done with; only the dash onwards is kept.
//! buffer.release_before(pos)?;
//! assert_eq!(buffer.window_start(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Misuse of the addressing contract (reading ahead of the frontier, reading
//! a released position, empty ranges) is reported as a
//! [`ContractViolation`] on every call, not only in debug builds. Errors from
//! the source are handed back unchanged inside [`BufferError::Source`].

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod error;
pub mod growth;
mod options;
mod source;

#[cfg(test)]
mod tests;

pub use buffer::RollingCharBuffer;
pub use error::{BufferError, ContractViolation};
pub use options::{BufferOptions, DEFAULT_INITIAL_CAPACITY};
#[cfg(feature = "std")]
pub use source::Utf8Reader;
pub use source::{CharSource, IterSource};
