//! Connectivity probes for the embedded engine.

use std::sync::atomic::{AtomicBool, Ordering};

/// Reports whether the device can currently reach the network.
///
/// Implemented for any `Fn() -> bool`, so a closure over a platform API is a
/// valid probe.
pub trait Connectivity: Send + Sync {
    /// True when sync attempts may proceed.
    fn is_online(&self) -> bool;
}

impl<F> Connectivity for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_online(&self) -> bool {
        self()
    }
}

/// A probe toggled by hand.
///
/// Useful in tests and wherever connectivity is known from an outside signal
/// rather than polled.
#[derive(Debug)]
pub struct ManualConnectivity {
    online: AtomicBool,
}

impl ManualConnectivity {
    /// Create a probe with the given initial reading.
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    /// Change the reading.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Default for ManualConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for ManualConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn closures_are_probes() {
        let online = || true;
        let offline = || false;
        assert!(online.is_online());
        assert!(!offline.is_online());
    }

    #[test]
    fn manual_probe_toggles() {
        let probe = ManualConnectivity::new(false);
        assert!(!probe.is_online());

        probe.set_online(true);
        assert!(probe.is_online());
    }

    #[test]
    fn manual_probe_is_shareable_as_trait_object() {
        let probe = Arc::new(ManualConnectivity::default());
        let shared: Arc<dyn Connectivity> = probe.clone();

        assert!(shared.is_online());
        probe.set_online(false);
        assert!(!shared.is_online());
    }
}
