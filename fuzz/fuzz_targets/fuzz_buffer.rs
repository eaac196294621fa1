#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rolling_char_buffer::{BufferError, BufferOptions, IterSource, RollingCharBuffer};

/// Operations are expressed relative to the window so that most of them are
/// legal; the rest exercise the contract checks.
#[derive(Arbitrary, Debug)]
enum Op {
    Read { back: u8 },
    ReadAhead { by: u8 },
    Range { back: u8, len: u8 },
    Release { keep: u8 },
    ReleaseAhead { by: u8 },
    Rebind,
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    initial_capacity: u8,
    max_batch: u8,
    ops: Vec<Op>,
}

fn run(input: Input) {
    let chars: Vec<char> = input.text.chars().collect();
    let source = || IterSource::new(chars.iter().copied()).with_max_batch(usize::from(input.max_batch));

    let mut buffer = RollingCharBuffer::with_options(BufferOptions {
        initial_capacity: usize::from(input.initial_capacity),
    });
    buffer.bind(source());

    for op in input.ops {
        let next_pos = buffer.next_pos();
        let window_start = buffer.window_start();
        let rebound = matches!(op, Op::Rebind);
        match op {
            Op::Read { back } => {
                let pos = next_pos.saturating_sub(usize::from(back));
                let got = buffer.read_at(pos);
                if pos < window_start {
                    assert!(matches!(got, Err(BufferError::Contract(_))), "{got:?}");
                } else {
                    assert_eq!(got, Ok(chars.get(pos).copied()), "pos {pos}");
                }
            }
            Op::ReadAhead { by } => {
                let pos = next_pos + 1 + usize::from(by);
                assert!(buffer.read_at(pos).is_err());
            }
            Op::Range { back, len } => {
                let start = next_pos.saturating_sub(usize::from(back));
                let len = usize::from(len);
                let legal = len > 0 && start >= window_start && start + len <= next_pos;
                match buffer.read_range(start, len) {
                    Ok(got) => {
                        assert!(legal);
                        assert_eq!(&got[..], &chars[start..start + len]);
                    }
                    Err(_) => assert!(!legal),
                }
            }
            Op::Release { keep } => {
                buffer
                    .release_before(next_pos.saturating_sub(usize::from(keep)))
                    .expect("release behind the frontier is legal");
                assert!(buffer.window_start() >= window_start);
            }
            Op::ReleaseAhead { by } => {
                assert!(buffer.release_before(next_pos + 1 + usize::from(by)).is_err());
                assert_eq!(buffer.window_start(), window_start);
            }
            Op::Rebind => {
                let capacity = buffer.capacity();
                buffer.bind(source());
                assert_eq!(buffer.next_pos(), 0);
                assert_eq!(buffer.capacity(), capacity);
            }
        }

        buffer.check_invariants();
        if !rebound {
            assert!(buffer.next_pos() >= next_pos, "frontier moved backwards");
        }
    }
}

fuzz_target!(|input: Input| run(input));
