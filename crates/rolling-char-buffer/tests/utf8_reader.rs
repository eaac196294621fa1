#![allow(missing_docs)]
use std::io::{self, Cursor, ErrorKind, Read};

use rolling_char_buffer::{BufferError, BufferOptions, RollingCharBuffer, Utf8Reader};

fn small_buffer<S>() -> RollingCharBuffer<S> {
    RollingCharBuffer::with_options(BufferOptions {
        initial_capacity: 4,
    })
}

#[test]
fn multibyte_text_round_trips_through_the_window() {
    let text = "Größe 🦀 — naïve café ".repeat(50);
    let expected: Vec<char> = text.chars().collect();
    let mut buffer = small_buffer();
    buffer.bind(Utf8Reader::new(Cursor::new(text.as_bytes())));

    for (pos, &ch) in expected.iter().enumerate() {
        assert_eq!(buffer.read_at(pos).unwrap(), Some(ch));
        if pos % 10 == 9 {
            let start = pos - 9;
            let got: String = buffer.read_range(start, 10).unwrap().into_iter().collect();
            assert_eq!(got, expected[start..=pos].iter().collect::<String>());
            buffer.release_before(pos - 3).unwrap();
        }
    }
    assert_eq!(buffer.read_at(expected.len()).unwrap(), None);
}

/// Fails with a plain I/O error after handing out `good` bytes.
struct Flaky {
    data: &'static [u8],
    good: usize,
}

impl Read for Flaky {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.good == 0 {
            return Err(io::Error::new(ErrorKind::ConnectionReset, "peer went away"));
        }
        let n = buf.len().min(self.good).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.good -= n;
        Ok(n)
    }
}

#[test]
fn io_errors_reach_the_caller_unchanged() {
    let mut buffer = small_buffer();
    buffer.bind(Utf8Reader::new(Flaky {
        data: b"abcdef",
        good: 3,
    }));

    for (pos, ch) in "abc".chars().enumerate() {
        assert_eq!(buffer.read_at(pos).unwrap(), Some(ch));
    }
    match buffer.read_at(3) {
        Err(BufferError::Source(e)) => {
            assert_eq!(e.kind(), ErrorKind::ConnectionReset);
            assert_eq!(e.to_string(), "peer went away");
        }
        other => panic!("expected source error, got {other:?}"),
    }
    assert_eq!(buffer.next_pos(), 3);
    assert_eq!(buffer.read_range(0, 3).unwrap(), ['a', 'b', 'c']);
}

#[test]
fn invalid_utf8_is_reported_after_the_valid_prefix() {
    let mut buffer = small_buffer();
    buffer.bind(Utf8Reader::new(&b"ab\xc3\x28"[..]));

    assert_eq!(buffer.read_at(0).unwrap(), Some('a'));
    assert_eq!(buffer.read_at(1).unwrap(), Some('b'));
    match buffer.read_at(2) {
        Err(BufferError::Source(e)) => assert_eq!(e.kind(), ErrorKind::InvalidData),
        other => panic!("expected invalid data, got {other:?}"),
    }
    assert!(!buffer.is_exhausted());
}
