#[cfg(test)]
mod tests;

use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    human,
    id::{Flake, FlakeParts},
    time::{DEFAULT_EPOCH, TimeSource, WallClock},
};

/// Mutable generator state, guarded as a unit so `reconfigure` and `next_id`
/// are mutually atomic (no torn reads of node/epoch mid-generation).
struct State {
    node: u64,
    epoch: u64,
    last_second: u64,
    last_sequence: u64,
}

/// A lock-based 53-bit ID generator for shared, multi-threaded use.
///
/// Holds configuration (node id, epoch) and generation state (last-used
/// second and sequence) behind a single mutex. All operations take `&self`,
/// so one instance can be constructed at application start-up and shared by
/// reference — for process-wide use, put it in a `static` via
/// [`std::sync::OnceLock`] or hand out an `Arc`.
///
/// Uniqueness across processes or machines depends entirely on each instance
/// being assigned a distinct node id; instances share no state and need no
/// coordination.
///
/// ## Throughput
///
/// At most `2^16` IDs can be stamped into one wall-clock second. Beyond that
/// rate the generator borrows the following second, trading real-time
/// accuracy of the embedded timestamp for uniqueness and monotonicity. Under
/// sustained overload the embedded timestamps drift ahead of the wall clock
/// indefinitely.
///
/// # Example
/// ```
/// use flake53::FlakeGenerator;
///
/// let generator = FlakeGenerator::new(1);
///
/// let a = generator.next_id();
/// let b = generator.next_id();
/// assert!(a < b);
/// assert_eq!(generator.decode(b).node, 1);
/// ```
pub struct FlakeGenerator<T = WallClock>
where
    T: TimeSource,
{
    state: Mutex<State>,
    time: T,
}

impl FlakeGenerator<WallClock> {
    /// Creates a generator that stamps IDs for the given node using the
    /// system wall clock and the default epoch.
    ///
    /// `node` is masked to [`Flake::NODE_BITS`]; out-of-range values
    /// truncate silently rather than erroring. Counters start at zero. No
    /// failure modes.
    pub fn new(node: u64) -> Self {
        Self::with_clock(node, 0, WallClock)
    }
}

impl<T> FlakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator from explicit configuration and a custom clock.
    ///
    /// An `epoch` of `0` is replaced with [`DEFAULT_EPOCH`]. The clock is
    /// consulted on every [`Self::next_id`] call; supply a mock
    /// [`TimeSource`] to control time in tests.
    pub fn with_clock(node: u64, epoch: u64, time: T) -> Self {
        Self {
            state: Mutex::new(State {
                node: node & Flake::NODE_MASK,
                epoch: normalize_epoch(epoch),
                last_second: 0,
                last_sequence: 0,
            }),
            time,
        }
    }

    /// Replaces the node id and epoch under the state lock.
    ///
    /// `node` is masked to [`Flake::NODE_BITS`] and an `epoch` of `0` falls
    /// back to [`DEFAULT_EPOCH`] — invalid inputs are normalized, never
    /// rejected. The last-used second and sequence are deliberately kept, so
    /// IDs stamped after a reconfigure remain unique on this instance.
    ///
    /// The swap is atomic with respect to concurrent [`Self::next_id`]
    /// calls, but reconfiguring while IDs are being generated changes which
    /// configuration in-flight callers observe; do it before concurrent use
    /// begins.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn reconfigure(&self, node: u64, epoch: u64) {
        let mut state = self.state.lock();
        state.node = node & Flake::NODE_MASK;
        state.epoch = normalize_epoch(epoch);
    }

    /// Generates the next identifier.
    ///
    /// Reads the wall clock, then advances the generator state under the
    /// lock:
    ///
    /// - If the clock moved past the last-used second, the sequence resets
    ///   to zero.
    /// - If the clock stalled or ran backward, the time is clamped to the
    ///   last-used second and the sequence increments with wraparound. On
    ///   wrap, the next second is borrowed so the ID stream keeps moving
    ///   forward.
    ///
    /// Successive calls on one instance therefore return strictly
    /// increasing values, with no duplicates, regardless of clock behavior.
    /// The call never blocks beyond the state lock itself. No failure
    /// modes.
    ///
    /// # Example
    /// ```
    /// use flake53::FlakeGenerator;
    ///
    /// let generator = FlakeGenerator::new(0);
    /// let id = generator.next_id();
    /// assert!(id.to_raw() <= flake53::Flake::MAX_RAW);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Flake {
        let now = self.time.unix_seconds();
        let mut state = self.state.lock();

        let (second, sequence) = if now <= state.last_second {
            let sequence = (state.last_sequence + 1) & Flake::SEQUENCE_MASK;
            if sequence == 0 {
                // Sequence space for this second is exhausted: borrow the
                // next second.
                (state.last_second + 1, 0)
            } else {
                (state.last_second, sequence)
            }
        } else {
            (now, 0)
        };

        state.last_second = second;
        state.last_sequence = sequence;

        debug_assert!(
            second >= state.epoch,
            "configured epoch is ahead of the clock"
        );
        Flake::from_components(second.saturating_sub(state.epoch), sequence, state.node)
    }

    /// Packs an absolute Unix timestamp, sequence, and node into an
    /// identifier using this generator's epoch.
    ///
    /// Pure apart from the epoch read; does not advance generator state.
    /// Callers must pass `seconds >= epoch`: an epoch ahead of `seconds` is
    /// a configuration error, asserted in debug builds and clamped to the
    /// epoch origin in release builds.
    pub fn encode(&self, seconds: u64, sequence: u64, node: u64) -> Flake {
        let epoch = self.state.lock().epoch;
        debug_assert!(seconds >= epoch, "seconds precede the configured epoch");
        Flake::from_components(seconds.saturating_sub(epoch), sequence, node)
    }

    /// Unpacks an identifier into absolute Unix seconds, sequence, and node
    /// using this generator's epoch.
    ///
    /// Total: every 53-bit value decodes to some triple. IDs produced under
    /// a different epoch or layout decode without error to meaningless
    /// components — nothing in the value is self-describing.
    pub fn decode(&self, id: Flake) -> FlakeParts {
        let epoch = self.state.lock().epoch;
        FlakeParts {
            seconds: id.timestamp() + epoch,
            sequence: id.sequence(),
            node: id.node(),
        }
    }

    /// Renders an identifier in the fixed 21-character human-readable form.
    ///
    /// Equivalent to [`format_parts`](crate::format_parts) applied to
    /// [`Self::decode`]. See the [`human`](crate::parse_human) codec for the
    /// exact shape.
    pub fn format_human(&self, id: Flake) -> String {
        human::format_parts(self.decode(id))
    }
}

const fn normalize_epoch(epoch: u64) -> u64 {
    if epoch == 0 { DEFAULT_EPOCH } else { epoch }
}
