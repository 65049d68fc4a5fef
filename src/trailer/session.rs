/// Which way the pointer is heading relative to a region's center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// Distance shrank since the last recorded step
    Entering,
    /// Distance grew or stayed the same
    Leaving,
}

/// Per-region hover state, owned by whoever registered the region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverSession {
    last_distance: f32,
}

impl Default for HoverSession {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverSession {
    pub fn new() -> Self {
        HoverSession {
            last_distance: f32::INFINITY,
        }
    }

    #[cfg(test)]
    pub fn last_distance(&self) -> f32 {
        self.last_distance
    }

    /// Forget the baseline (on region enter and leave)
    pub fn reset(&mut self) {
        self.last_distance = f32::INFINITY;
    }

    /// Strictly closer than the recorded baseline counts as entering
    pub fn classify(&self, distance: f32) -> Approach {
        if distance < self.last_distance {
            Approach::Entering
        } else {
            Approach::Leaving
        }
    }

    /// Advance the baseline. Only entering steps call this.
    pub fn record(&mut self, distance: f32) {
        self.last_distance = distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_classifies_anything_as_entering() {
        let session = HoverSession::new();
        assert_eq!(session.last_distance(), f32::INFINITY);
        assert_eq!(session.classify(1_000_000.0), Approach::Entering);
    }

    #[test]
    fn test_equal_distance_is_leaving() {
        let mut session = HoverSession::new();
        session.record(42.0);
        assert_eq!(session.classify(42.0), Approach::Leaving);
        assert_eq!(session.classify(41.9), Approach::Entering);
    }

    #[test]
    fn test_reset() {
        let mut session = HoverSession::new();
        session.record(10.0);
        session.reset();
        assert_eq!(session.last_distance(), f32::INFINITY);
    }
}
