//! Monotonic Timing
//!
//! Reads `CLOCK_MONOTONIC` through `clock_gettime` on Unix so a failed read
//! surfaces as an error, with a `std::time::Instant` fallback elsewhere.
//! Wall-clock time is never used: it can jump when the system clock is set.

use crate::error::ClockError;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A source of monotonic timestamps in nanoseconds.
///
/// Timestamps are only meaningful relative to each other.
pub trait Clock {
    /// Read the current timestamp
    fn now_ns(&self) -> Result<u64, ClockError>;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline(always)]
    fn now_ns(&self) -> Result<u64, ClockError> {
        (**self).now_ns()
    }
}

// ─── MonotonicClock ──────────────────────────────────────────────────────────

/// The system monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

#[cfg(unix)]
impl Clock for MonotonicClock {
    #[inline(always)]
    fn now_ns(&self) -> Result<u64, ClockError> {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };

        // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
        let rc = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };
        if rc != 0 {
            return Err(ClockError::Read(std::io::Error::last_os_error()));
        }

        let seconds = ts.tv_sec as i64;
        let secs = u64::try_from(seconds).map_err(|_| ClockError::OutOfRange { seconds })?;
        Ok(secs * NANOS_PER_SEC + ts.tv_nsec as u64)
    }
}

#[cfg(not(unix))]
impl Clock for MonotonicClock {
    #[inline(always)]
    fn now_ns(&self) -> Result<u64, ClockError> {
        use std::sync::OnceLock;
        use std::time::Instant;

        static ANCHOR: OnceLock<Instant> = OnceLock::new();
        let anchor = *ANCHOR.get_or_init(Instant::now);
        Ok(anchor.elapsed().as_nanos() as u64)
    }
}

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Start/stop pair over a [`Clock`]
pub struct Timer<C: Clock> {
    clock: C,
    start_ns: u64,
}

impl<C: Clock> Timer<C> {
    /// Read the start timestamp
    #[inline(always)]
    pub fn start(clock: C) -> Result<Self, ClockError> {
        let start_ns = clock.now_ns()?;
        Ok(Self { clock, start_ns })
    }

    /// Read the end timestamp and return elapsed nanoseconds
    #[inline(always)]
    pub fn stop(&self) -> Result<u64, ClockError> {
        let end_ns = self.clock.now_ns()?;
        Ok(end_ns.saturating_sub(self.start_ns))
    }
}

/// Pin the current thread to a single CPU.
///
/// Keeps the measuring thread from migrating between cores mid-trial.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    if cpu >= libc::CPU_SETSIZE as usize {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("cpu {} out of range", cpu),
        ));
    }

    // SAFETY: cpu_set_t is plain data; zeroed is a valid empty set, and the
    // pointer passed to sched_setaffinity is valid for its declared size.
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let rc = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);
        if rc == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a single CPU. No-op off Linux.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    tracing::debug!(cpu, "CPU pinning not supported on this platform; ignored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_monotonic_non_decreasing() {
        let clock = MonotonicClock;
        let mut last = clock.now_ns().unwrap();
        for _ in 0..1000 {
            let now = clock.now_ns().unwrap();
            assert!(now >= last, "monotonic clock went backwards");
            last = now;
        }
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start(MonotonicClock).unwrap();
        std::thread::sleep(Duration::from_millis(10));
        let nanos = timer.stop().unwrap();

        // Should be at least 5ms
        assert!(nanos >= 5_000_000);
    }

    #[test]
    fn test_timer_by_reference() {
        let clock = MonotonicClock;
        let timer = Timer::start(&clock).unwrap();
        assert!(timer.stop().is_ok());
    }

    struct Backwards;

    impl Clock for Backwards {
        fn now_ns(&self) -> Result<u64, ClockError> {
            // Second read is earlier than the first
            static READS: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(100);
            Ok(READS.fetch_sub(50, std::sync::atomic::Ordering::Relaxed))
        }
    }

    #[test]
    fn test_timer_saturates() {
        let timer = Timer::start(Backwards).unwrap();
        assert_eq!(timer.stop().unwrap(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_pin_out_of_range() {
        let err = pin_to_cpu(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
