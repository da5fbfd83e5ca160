use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Wednesday, January 3, 2018 17:20:00 UTC.
///
/// Generated timestamps are stored relative to this origin, which keeps the
/// 32-bit seconds field usable until the year 2154. A generator configured
/// with epoch `0` falls back to this constant.
pub const DEFAULT_EPOCH: u64 = 1_515_000_000;

/// A trait for time sources that report wall-clock Unix seconds.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. Generators never require the reported time to be
/// monotonic; they clamp internally when the clock stalls or runs backward.
///
/// # Example
///
/// ```
/// use flake53::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn unix_seconds(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.unix_seconds(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in whole seconds since the Unix epoch.
    fn unix_seconds(&self) -> u64;
}

/// The system wall clock.
///
/// Reads [`SystemTime::now`] on every call. Second-level resolution makes a
/// cached or ticker-based clock unnecessary; one syscall per generated ID is
/// well below the cost of the generator's own lock.
#[derive(Copy, Clone, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn unix_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_secs()
    }
}
