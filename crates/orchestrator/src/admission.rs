use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide single-flight gate: at most one operation may be executing at a time.
///
/// The ledger wallet used as a transaction source has a single `Sequence` number; two concurrent
/// MINTs (or a MINT racing a BURN) would race on that sequence. Rather than modeling per-wallet
/// locks, admission is coarse and process-wide: a single in-process flag for the whole service.
#[derive(Debug, Clone, Default)]
pub struct Admission {
    running: Arc<AtomicBool>,
}

impl Admission {
    /// Build a new, initially-open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically test-and-set the `running` flag. Returns `None` if another operation already
    /// holds the gate. On success, the returned guard releases the gate when dropped — on every
    /// exit path of the caller and anything it spawns, including a panic.
    pub fn try_admit(&self) -> Option<AdmissionGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AdmissionGuard { running: self.running.clone() })
    }
}

/// Holds the admission gate open. Move this into whatever task owns the operation's lifetime —
/// the synchronous preparation phase, then the completion worker it hands off to — so the gate
/// releases exactly when that task's last handle is dropped.
#[derive(Debug)]
pub struct AdmissionGuard {
    running: Arc<AtomicBool>,
}

impl Drop for AdmissionGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_admission_is_rejected_while_first_holds_the_gate() {
        let admission = Admission::new();
        let first = admission.try_admit();
        assert!(first.is_some());
        assert!(admission.try_admit().is_none());
    }

    #[test]
    fn dropping_the_guard_releases_the_gate() {
        let admission = Admission::new();
        let guard = admission.try_admit().unwrap();
        drop(guard);
        assert!(admission.try_admit().is_some());
    }

    #[test]
    fn guard_release_survives_a_panic_while_held() {
        let admission = Admission::new();
        let guard = admission.try_admit().unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _held = guard;
            panic!("simulated worker panic");
        }));
        assert!(result.is_err());
        assert!(admission.try_admit().is_some());
    }
}
