use crate::{
    generator::FlakeGenerator,
    id::{Flake, FlakeParts},
    time::{DEFAULT_EPOCH, TimeSource},
};
use core::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::thread::scope;

struct MockTime {
    seconds: u64,
}

impl TimeSource for MockTime {
    fn unix_seconds(&self) -> u64 {
        self.seconds
    }
}

struct StepTime {
    values: Vec<u64>,
    index: Cell<usize>,
}

#[derive(Clone)]
struct SharedStepTime {
    clock: Rc<StepTime>,
}

impl SharedStepTime {
    fn new(values: Vec<u64>) -> Self {
        Self {
            clock: Rc::new(StepTime {
                values,
                index: Cell::new(0),
            }),
        }
    }

    fn advance(&self) {
        self.clock.index.set(self.clock.index.get() + 1);
    }
}

impl TimeSource for SharedStepTime {
    fn unix_seconds(&self) -> u64 {
        self.clock.values[self.clock.index.get()]
    }
}

#[test]
fn sequence_increments_within_same_second() {
    // Node 3, default epoch, one fixed wall-clock second.
    let generator = FlakeGenerator::with_clock(3, 0, MockTime {
        seconds: 1_700_000_000,
    });

    let a = generator.next_id();
    let b = generator.next_id();

    assert_eq!(a.sequence(), 0);
    assert_eq!(b.sequence(), 1);
    assert_eq!(a.timestamp(), 1_700_000_000 - DEFAULT_EPOCH);
    assert_eq!(b.timestamp(), a.timestamp());
    assert_eq!(a.node(), 3);
    assert!(a < b);

    // The encodings differ only in the sequence field.
    let sequence_field = Flake::SEQUENCE_MASK << Flake::SEQUENCE_SHIFT;
    assert_eq!((a.to_raw() ^ b.to_raw()) & !sequence_field, 0);
}

#[test]
fn sequence_resets_when_clock_advances() {
    let clock = SharedStepTime::new(vec![1_700_000_100, 1_700_000_101]);
    let generator = FlakeGenerator::with_clock(1, 1_700_000_000, clock.clone());

    let a = generator.next_id();
    assert_eq!(a.timestamp(), 100);
    assert_eq!(a.sequence(), 0);
    let b = generator.next_id();
    assert_eq!(b.sequence(), 1);

    clock.advance();

    let c = generator.next_id();
    assert_eq!(c.timestamp(), 101);
    assert_eq!(c.sequence(), 0);
}

#[test]
fn clock_rollback_is_clamped() {
    let clock = SharedStepTime::new(vec![1_700_000_100, 1_700_000_050]);
    let generator = FlakeGenerator::with_clock(1, 1_700_000_000, clock.clone());

    let a = generator.next_id();
    assert_eq!(a.timestamp(), 100);

    clock.advance();

    // The clock ran backward by 50 seconds; generation stays on the
    // last-used second and keeps counting.
    let b = generator.next_id();
    assert_eq!(b.timestamp(), 100);
    assert_eq!(b.sequence(), 1);
    assert!(a < b);
}

#[test]
fn sequence_exhaustion_borrows_the_next_second() {
    let now = 1_700_000_000;
    let generator = FlakeGenerator::with_clock(0, 0, MockTime { seconds: now });

    for expected in 0..=Flake::max_sequence() {
        let id = generator.next_id();
        assert_eq!(id.sequence(), expected);
        assert_eq!(id.timestamp(), now - DEFAULT_EPOCH);
    }

    // 65536 ids consumed the whole second: the embedded timestamp must now
    // run ahead of the (frozen) wall clock.
    let borrowed = generator.next_id();
    assert_eq!(borrowed.timestamp(), now - DEFAULT_EPOCH + 1);
    assert_eq!(borrowed.sequence(), 0);

    // And generation continues inside the borrowed second.
    let next = generator.next_id();
    assert_eq!(next.timestamp(), borrowed.timestamp());
    assert_eq!(next.sequence(), 1);
}

#[test]
fn node_is_masked_at_construction() {
    // 33 exceeds the 5-bit node space and truncates to 1.
    let generator = FlakeGenerator::with_clock(33, 0, MockTime {
        seconds: 1_700_000_000,
    });
    assert_eq!(generator.next_id().node(), 1);

    let generator = FlakeGenerator::with_clock(32, 0, MockTime {
        seconds: 1_700_000_000,
    });
    assert_eq!(generator.next_id().node(), 0);
}

#[test]
fn reconfigure_swaps_config_but_keeps_counters() {
    let generator = FlakeGenerator::with_clock(1, 1_700_000_000, MockTime {
        seconds: 1_700_000_500,
    });

    let a = generator.next_id();
    assert_eq!(a.timestamp(), 500);
    assert_eq!(a.node(), 1);

    generator.reconfigure(40, 1_700_000_400);

    // Node masks to 40 & 31 = 8, the epoch shifts the timestamp field, and
    // the sequence keeps counting rather than restarting.
    let b = generator.next_id();
    assert_eq!(b.node(), 8);
    assert_eq!(b.timestamp(), 100);
    assert_eq!(b.sequence(), 1);
}

#[test]
fn reconfigure_normalizes_zero_epoch() {
    let generator = FlakeGenerator::with_clock(1, 1_700_000_000, MockTime {
        seconds: 1_700_000_500,
    });
    generator.reconfigure(1, 0);

    let id = generator.encode(DEFAULT_EPOCH + 5, 1, 1);
    assert_eq!(id.timestamp(), 5);
}

#[test]
fn encode_decode_roundtrip() {
    let epoch = 1_600_000_000;
    let generator = FlakeGenerator::with_clock(0, epoch, MockTime { seconds: epoch });

    for (seconds, sequence, node) in [
        (epoch, 0, 0),
        (epoch + 12_345, 77, 5),
        (epoch + Flake::max_timestamp(), Flake::max_sequence(), Flake::max_node()),
    ] {
        let id = generator.encode(seconds, sequence, node);
        let parts = generator.decode(id);
        assert_eq!(parts, FlakeParts {
            seconds,
            sequence,
            node
        });
    }
}

#[test]
fn sequential_ids_strictly_increase() {
    let generator = FlakeGenerator::new(1);

    let mut last = generator.next_id();
    for _ in 0..10_000 {
        let id = generator.next_id();
        assert!(id > last, "{id} did not increase past {last}");
        last = id;
    }
}

#[test]
fn concurrent_generation_is_collision_free() {
    const THREADS: usize = 50;
    const IDS_PER_THREAD: usize = 1000;

    let generator = FlakeGenerator::new(9);
    let mut seen = HashSet::with_capacity(THREADS * IDS_PER_THREAD);

    scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    (0..IDS_PER_THREAD)
                        .map(|_| generator.next_id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for id in handle.join().expect("worker panicked") {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
    });

    assert_eq!(seen.len(), THREADS * IDS_PER_THREAD);
}
