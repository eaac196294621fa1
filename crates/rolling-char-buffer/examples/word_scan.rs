//! Scans text for words, joining words that were hyphenated across a line
//! break (`exam-\nple` becomes `example`).
//!
//! The scanner only ever moves forward, but when it reaches the end of a word
//! it reads the word back out of the buffer, and when it sees a hyphen it
//! peeks one character ahead to decide whether the word continues on the next
//! line. Everything before the current word is released as soon as the word
//! starts or a separator is passed, so memory stays bounded by the longest
//! word no matter how long the input is.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=rolling_char_buffer=trace cargo run -p rolling-char-buffer --example word_scan < some.txt
//! ```
//!
//! Without input on stdin a built-in sample is scanned.

use std::io::{self, IsTerminal, Read};

use rolling_char_buffer::{BufferError, CharSource, RollingCharBuffer, Utf8Reader};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "A rolling buffer lets a tokenizer look back at a word it has \
already passed, such as this hyphen-\nated one, without keeping the whole \
document in memory.\n";

fn scan<S: CharSource>(
    buffer: &mut RollingCharBuffer<S>,
    mut emit: impl FnMut(&str),
) -> Result<(), BufferError<S::Error>> {
    let mut pos = 0;
    let mut word = String::new();
    let mut start: Option<usize> = None;

    loop {
        let ch = buffer.read_at(pos)?;
        match ch {
            Some(c) if c.is_alphanumeric() => {
                if start.is_none() {
                    buffer.release_before(pos)?;
                    start = Some(pos);
                }
                pos += 1;
            }
            // A hyphen directly followed by a newline joins the two halves.
            Some('-') if start.is_some() && buffer.read_at(pos + 1)? == Some('\n') => {
                if let Some(s) = start.take() {
                    buffer.append_range(s, pos - s, &mut word)?;
                }
                pos += 2;
                start = Some(pos);
            }
            _ => {
                if let Some(s) = start.take() {
                    if pos > s {
                        buffer.append_range(s, pos - s, &mut word)?;
                    }
                }
                if !word.is_empty() {
                    emit(&word);
                    word.clear();
                }
                if ch.is_none() {
                    return Ok(());
                }
                pos += 1;
                buffer.release_before(pos)?;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let input: Box<dyn Read> = if stdin.is_terminal() {
        Box::new(SAMPLE.as_bytes())
    } else {
        Box::new(stdin.lock())
    };

    let mut buffer = RollingCharBuffer::new();
    buffer.bind(Utf8Reader::new(input));

    let mut count = 0usize;
    let mut longest = String::new();
    scan(&mut buffer, |word| {
        count += 1;
        if word.chars().count() > longest.chars().count() {
            longest = word.to_owned();
        }
        println!("{word}");
    })?;

    eprintln!(
        "{count} words, longest {longest:?}, buffer capacity {}",
        buffer.capacity()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use rolling_char_buffer::BufferOptions;

    use super::*;

    fn words(text: &str, initial_capacity: usize) -> (Vec<String>, usize) {
        let mut buffer = RollingCharBuffer::with_options(BufferOptions { initial_capacity });
        buffer.bind(text.chars());
        let mut out = Vec::new();
        scan(&mut buffer, |word| out.push(word.to_owned())).unwrap();
        (out, buffer.capacity())
    }

    #[test]
    fn hyphenated_words_are_joined() {
        let (out, _) = words("an exam-\nple, a two-part word", 8);
        assert_eq!(out, ["an", "example", "a", "two", "part", "word"]);
    }

    #[test]
    fn long_separator_runs_do_not_grow_the_store() {
        let text = format!("word{}end", " .;".repeat(1_000));
        let (out, capacity) = words(&text, 8);
        assert_eq!(out, ["word", "end"]);
        assert_eq!(capacity, 8);
    }
}
