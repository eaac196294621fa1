//! Growth strategy for the backing store.
//!
//! Capacity grows by roughly an eighth each time, which keeps the total copy
//! cost of a long scan linear in the number of characters retained. When the
//! store grows, its circular contents are unrolled into the new allocation so
//! the oldest retained character lands at index 0 and the write cursor sits
//! right after the newest one.

use alloc::{vec, vec::Vec};

/// Returns an element count strictly larger than `min_target` that leaves
/// headroom for further growth.
///
/// The count is `min_target` plus an eighth (at least 3 elements), rounded up
/// so that `count * bytes_per_element` is a multiple of the platform word
/// size. Returns 0 for a `min_target` of 0 and saturates at the largest
/// element count an allocation can address.
///
/// ```
/// use rolling_char_buffer::growth::oversize;
///
/// assert_eq!(oversize(0, 4), 0);
/// assert_eq!(oversize(1, 4), 4);
/// assert!(oversize(513, 4) > 513);
/// ```
#[must_use]
pub fn oversize(min_target: usize, bytes_per_element: usize) -> usize {
    if min_target == 0 {
        return 0;
    }
    let max_len = isize::MAX.unsigned_abs() / bytes_per_element.max(1);
    let extra = (min_target >> 3).max(3);
    let Some(new_len) = min_target.checked_add(extra) else {
        return max_len;
    };
    if new_len > max_len.saturating_sub(7) {
        return max_len;
    }
    align_to_word(new_len, bytes_per_element)
}

#[cfg(target_pointer_width = "64")]
fn align_to_word(len: usize, bytes_per_element: usize) -> usize {
    match bytes_per_element {
        4 => (len + 1) & !1,
        2 => (len + 3) & !3,
        1 => (len + 7) & !7,
        _ => len,
    }
}

#[cfg(not(target_pointer_width = "64"))]
fn align_to_word(len: usize, bytes_per_element: usize) -> usize {
    match bytes_per_element {
        2 => (len + 1) & !1,
        1 => (len + 3) & !3,
        _ => len,
    }
}

/// Copies a full circular store into a new allocation of `new_capacity`
/// slots, oldest character first.
///
/// `write_cursor` is where the next character would have been written, which
/// for a full store is also the oldest character. The returned store holds
/// `old[write_cursor..]` followed by `old[..write_cursor]`, so the caller's
/// new write cursor is `old.len()`.
pub(crate) fn linearize(old: &[char], write_cursor: usize, new_capacity: usize) -> Vec<char> {
    debug_assert!(new_capacity > old.len());
    debug_assert!(write_cursor <= old.len());

    let tail = old.len() - write_cursor;
    let mut grown = vec!['\0'; new_capacity];
    grown[..tail].copy_from_slice(&old[write_cursor..]);
    grown[tail..old.len()].copy_from_slice(&old[..write_cursor]);
    grown
}
