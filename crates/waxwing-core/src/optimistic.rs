// ── Optimistic SSID state ──
//
// Toggling an SSID takes the radio offline for up to ~20 seconds, during
// which polls can report the pre-toggle state. To keep consumers from
// flip-flopping, a successful write records the requested state here and
// polls within the window report it instead of the device's answer.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

/// How long a written SSID state overrides polled state.
pub(crate) const ASSUMED_STATE_WINDOW: Duration = Duration::from_secs(30);

/// Recently written SSID states, keyed by SSID group id.
#[derive(Debug, Default)]
pub(crate) struct AssumedSsidStates {
    entries: HashMap<String, Entry>,
}

#[derive(Debug)]
struct Entry {
    enabled: bool,
    written_at: Instant,
}

impl AssumedSsidStates {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a successful enable/disable write for `group_id`.
    pub(crate) fn assume(&mut self, group_id: String, enabled: bool) {
        self.entries.insert(
            group_id,
            Entry {
                enabled,
                written_at: Instant::now(),
            },
        );
    }

    /// The assumed state for `group_id`, if still within the window.
    pub(crate) fn overlay(&self, group_id: &str) -> Option<bool> {
        let entry = self.entries.get(group_id)?;
        (entry.written_at.elapsed() < ASSUMED_STATE_WINDOW).then_some(entry.enabled)
    }

    /// Drop expired entries. Called once per poll.
    pub(crate) fn prune(&mut self) {
        self.entries
            .retain(|_, entry| entry.written_at.elapsed() < ASSUMED_STATE_WINDOW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn overlay_applies_inside_the_window() {
        let mut assumed = AssumedSsidStates::new();
        assumed.assume("SSID1".to_owned(), false);

        assert_eq!(assumed.overlay("SSID1"), Some(false));
        assert_eq!(assumed.overlay("SSID2"), None);

        tokio::time::advance(Duration::from_secs(29)).await;
        assert_eq!(assumed.overlay("SSID1"), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn overlay_expires_after_the_window() {
        let mut assumed = AssumedSsidStates::new();
        assumed.assume("SSID1".to_owned(), true);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(assumed.overlay("SSID1"), None);

        assumed.prune();
        assert_eq!(assumed.overlay("SSID1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_write_replaces_older() {
        let mut assumed = AssumedSsidStates::new();
        assumed.assume("SSID1".to_owned(), false);

        tokio::time::advance(Duration::from_secs(20)).await;
        assumed.assume("SSID1".to_owned(), true);

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(assumed.overlay("SSID1"), Some(true));
    }
}
