//! Lock delay - the single deferred "lock this piece" action
//!
//! At most one deadline is pending at a time. Every cancellation bumps a
//! generation counter, and the token handed out when a deadline fires carries
//! the generation it was armed under, so a token from before a cancel (a
//! reset, a pause, a piece that slid off its ledge) is recognisably stale.

/// Proof that a lock deadline elapsed, tagged with its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    remaining_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockTimer {
    generation: u64,
    pending: Option<Pending>,
}

impl LockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a deadline unless one is already pending.
    ///
    /// Returns true if a new deadline was started.
    pub fn arm(&mut self, delay_ms: u32) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(Pending {
            generation: self.generation,
            remaining_ms: delay_ms,
        });
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.pending.map(|p| p.remaining_ms)
    }

    /// Let time pass; returns a token if the pending deadline elapsed.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<LockToken> {
        let pending = self.pending.as_mut()?;
        pending.remaining_ms = pending.remaining_ms.saturating_sub(elapsed_ms);
        if pending.remaining_ms > 0 {
            return None;
        }
        let generation = pending.generation;
        self.pending = None;
        Some(LockToken { generation })
    }

    /// Drop any pending deadline and invalidate every token issued so far.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether a fired token still belongs to the current generation.
    pub fn is_current(&self, token: LockToken) -> bool {
        token.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut t = LockTimer::new();
        assert!(t.arm(500));
        assert_eq!(t.advance(300), None);
        assert_eq!(t.remaining_ms(), Some(200));

        let token = t.advance(200).unwrap();
        assert!(t.is_current(token));
        assert!(!t.is_pending());
        assert_eq!(t.advance(1000), None);
    }

    #[test]
    fn test_arm_does_not_restart_pending_deadline() {
        let mut t = LockTimer::new();
        assert!(t.arm(500));
        t.advance(400);
        assert!(!t.arm(500));
        assert_eq!(t.remaining_ms(), Some(100));
    }

    #[test]
    fn test_cancel_invalidates_old_tokens() {
        let mut t = LockTimer::new();
        t.arm(10);
        let token = t.advance(10).unwrap();
        t.cancel();
        assert!(!t.is_current(token));

        t.arm(10);
        let fresh = t.advance(10).unwrap();
        assert!(t.is_current(fresh));
    }

    #[test]
    fn test_cancel_drops_pending_deadline() {
        let mut t = LockTimer::new();
        t.arm(10);
        t.cancel();
        assert!(!t.is_pending());
        assert_eq!(t.advance(100), None);
    }

    #[test]
    fn test_zero_delay_fires_on_first_advance() {
        let mut t = LockTimer::new();
        t.arm(0);
        assert!(t.advance(0).is_some());
    }
}
