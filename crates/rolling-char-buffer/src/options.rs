/// Number of `char` slots allocated by [`BufferOptions::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 512;

/// Configuration for a [`RollingCharBuffer`](crate::RollingCharBuffer).
///
/// # Default
///
/// `initial_capacity` defaults to [`DEFAULT_INITIAL_CAPACITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
pub struct BufferOptions {
    /// Number of characters the backing store holds before its first growth.
    ///
    /// The store only ever grows, and it keeps its capacity across
    /// [`bind`](crate::RollingCharBuffer::bind) calls. Zero is allowed; the
    /// first frontier read then allocates.
    ///
    /// # Default
    ///
    /// `512`
    pub initial_capacity: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
