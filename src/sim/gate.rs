//! Single-slot power-up gate
//!
//! At most one power-up may be outstanding (falling or in effect) per
//! formation. The gate is a flag, not a counter.

#[derive(Debug, Clone)]
pub struct PowerUpGate {
    slot_free: bool,
}

impl Default for PowerUpGate {
    fn default() -> Self {
        Self { slot_free: true }
    }
}

impl PowerUpGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.slot_free
    }

    /// Take the slot if it is free
    pub fn try_acquire(&mut self) -> bool {
        if self.slot_free {
            self.slot_free = false;
            true
        } else {
            false
        }
    }

    /// Free the slot. Releasing a free slot is a harmless no-op.
    pub fn release(&mut self) {
        if self.slot_free {
            log::warn!("Power-up gate released while already free");
        }
        self.slot_free = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release_cycle() {
        let mut gate = PowerUpGate::new();
        assert!(gate.is_free());
        assert!(gate.try_acquire());
        assert!(!gate.is_free());
        assert!(!gate.try_acquire());
        assert!(!gate.try_acquire());

        gate.release();
        assert!(gate.is_free());
        assert!(gate.try_acquire());
    }

    #[test]
    fn test_double_release_is_benign() {
        let mut gate = PowerUpGate::new();
        gate.release();
        gate.release();
        assert!(gate.is_free());
        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
    }
}
