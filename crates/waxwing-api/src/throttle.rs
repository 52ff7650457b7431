//! Minimum-interval gate for expensive device calls.

use std::time::Duration;

use tokio::time::Instant;

/// Gates an action to at most once per `period`.
///
/// The first `ready()` call always fires; each firing arms the gate for
/// another full period. Built on `tokio::time::Instant` so tests can
/// drive it with a paused clock.
#[derive(Debug)]
pub struct Throttle {
    period: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Returns true if the action may run now, and if so arms the gate.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_fires() {
        let mut throttle = Throttle::new(Duration::from_secs(3600));
        assert!(throttle.ready());
        assert!(!throttle.ready());
    }

    #[tokio::test(start_paused = true)]
    async fn stays_closed_inside_the_period() {
        let mut throttle = Throttle::new(Duration::from_secs(3600));
        assert!(throttle.ready());

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(!throttle.ready());
    }

    #[tokio::test(start_paused = true)]
    async fn reopens_after_the_period() {
        let mut throttle = Throttle::new(Duration::from_secs(3600));
        assert!(throttle.ready());

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(throttle.ready());
        assert!(!throttle.ready());
    }
}
