//! Single-flight guard for membership verification.
//!
//! Only one lookup may be outstanding at a time. A second verify while one
//! is in flight is refused instead of queued.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a membership lookup is in progress.
#[derive(Debug, Default)]
pub struct VerificationGate {
    in_flight: AtomicBool,
}

impl VerificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` if a lookup is already running.
    pub fn try_acquire(&self) -> Option<VerificationPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| VerificationPermit { gate: self })
    }

    #[cfg(test)]
    fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of a lookup; releases the gate on drop, whatever
/// the outcome.
#[derive(Debug)]
pub struct VerificationPermit<'a> {
    gate: &'a VerificationGate,
}

impl Drop for VerificationPermit<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.store(false, Ordering::Release);
    }
}
