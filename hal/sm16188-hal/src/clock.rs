//! Monotonic time source
//!
//! The transfer protocol encodes every bit as a pulse inside a fixed-length
//! time slot. It measures those slots by polling a free-running microsecond
//! counter through this trait.

/// Free-running microsecond counter
///
/// The counter must never go backwards. Wrapping is allowed; callers only
/// ever compare differences with `wrapping_sub`.
pub trait Monotonic {
    /// Current time in microseconds
    fn now_micros(&self) -> u64;

    /// Microseconds elapsed since `start`
    fn elapsed_since(&self, start: u64) -> u64 {
        self.now_micros().wrapping_sub(start)
    }

    /// Busy-wait until `micros` have elapsed since `start`
    fn wait_until(&self, start: u64, micros: u64) {
        while self.elapsed_since(start) < micros {
            core::hint::spin_loop();
        }
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}
