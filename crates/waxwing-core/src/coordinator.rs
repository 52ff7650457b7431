// ── Polling coordinator ──
//
// Owns the device client and the published snapshot. Polls device state
// and the SSID table on a fixed cadence, folds the optimistic SSID
// overlay into reads, and throttles the expensive firmware-update check
// to once per six hours. The poll loop is host-driven: `run()` is a
// future the caller awaits (or spawns), cancelled through `shutdown()`.

use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use waxwing_api::transport::{TlsMode, TransportConfig};
use waxwing_api::{DeviceState, Ssid, Stat, Throttle, WaxClient};

use crate::config::{DeviceConfig, TlsVerification};
use crate::error::CoreError;
use crate::optimistic::AssumedSsidStates;

/// Firmware-update checks hit the vendor's update service; the device
/// is asked at most this often.
const FIRMWARE_CHECK_PERIOD: Duration = Duration::from_secs(6 * 60 * 60);

// ── PollState ────────────────────────────────────────────────────

/// Poll lifecycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No poll has completed yet.
    Uninitialized,
    /// A poll is in flight.
    Refreshing,
    /// The latest poll succeeded; the snapshot is current.
    Ready,
    /// The latest poll failed; any previous snapshot is kept but stale.
    Failed,
    /// `shutdown()` was called.
    ShutDown,
}

/// One complete poll result, replaced atomically.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Snapshot {
    pub device: DeviceState,
    pub ssids: Vec<Ssid>,
    pub refreshed_at: DateTime<Utc>,
}

// ── Coordinator ──────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc`. Manages login, periodic polling, SSID
/// writes with optimistic state, and logout on shutdown.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    config: DeviceConfig,
    client: WaxClient,
    snapshot: ArcSwapOption<Snapshot>,
    poll_state: watch::Sender<PollState>,
    firmware_check: StdMutex<Throttle>,
    assumed: StdMutex<AssumedSsidStates>,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Create a new Coordinator from configuration. Does NOT log in --
    /// call [`connect()`](Self::connect) to authenticate and take the
    /// first snapshot.
    pub fn new(config: DeviceConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = WaxClient::new(
            config.url.clone(),
            config.username.clone(),
            config.password.clone(),
            &transport,
        )?;
        Ok(Self::with_client(config, client))
    }

    /// Create a Coordinator around a pre-built client.
    pub fn with_client(config: DeviceConfig, client: WaxClient) -> Self {
        let (poll_state, _) = watch::channel(PollState::Uninitialized);
        Self {
            inner: Arc::new(Inner {
                config,
                client,
                snapshot: ArcSwapOption::empty(),
                poll_state,
                firmware_check: StdMutex::new(Throttle::new(FIRMWARE_CHECK_PERIOD)),
                assumed: StdMutex::new(AssumedSsidStates::new()),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Access the device configuration.
    pub fn config(&self) -> &DeviceConfig {
        &self.inner.config
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Log in and take the first snapshot.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner.client.login().await?;
        debug!("login successful");
        self.refresh().await?;
        info!(url = %self.inner.config.url, "connected to device");
        Ok(())
    }

    /// Drive the periodic poll loop until [`shutdown()`](Self::shutdown)
    /// is called. Await this (or spawn it) after `connect()`.
    ///
    /// With `refresh_interval_secs == 0` the loop idles until shutdown.
    pub async fn run(&self) {
        let interval_secs = self.inner.config.refresh_interval_secs;
        if interval_secs == 0 {
            self.inner.cancel.cancelled().await;
            return;
        }

        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        interval.tick().await; // consume the immediate first tick

        loop {
            tokio::select! {
                biased;
                () = self.inner.cancel.cancelled() => break,
                _ = interval.tick() => {
                    if let Err(e) = self.refresh().await {
                        warn!(error = %e, "periodic refresh failed");
                    }
                }
            }
        }
    }

    /// Stop the poll loop and end the device session.
    ///
    /// The device caps concurrent admin sessions, so logout always runs
    /// even if polling already failed; a logout failure is non-fatal.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        if let Err(e) = self.inner.client.logout().await {
            warn!(error = %e, "logout failed (non-fatal)");
        }

        self.inner.poll_state.send_replace(PollState::ShutDown);
        debug!("coordinator shut down");
    }

    /// One-shot: connect, run closure, shut down.
    ///
    /// Optimized for CLI use: no poll loop, a single request-response
    /// cycle, and a guaranteed logout afterwards.
    pub async fn oneshot<F, Fut, T>(config: DeviceConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let coordinator = Coordinator::new(cfg)?;
        // A failed first poll must still release the device session,
        // the device caps concurrent admin logins.
        if let Err(e) = coordinator.connect().await {
            coordinator.shutdown().await;
            return Err(e);
        }
        let result = f(coordinator.clone()).await;
        coordinator.shutdown().await;
        result
    }

    // ── Polling ──────────────────────────────────────────────────

    /// Poll the device once and publish a fresh snapshot.
    ///
    /// On failure the previous snapshot is retained and the state moves
    /// to [`Failed`](PollState::Failed).
    pub async fn refresh(&self) -> Result<(), CoreError> {
        // send_replace keeps the stored value current even when no
        // receiver is subscribed yet.
        self.inner.poll_state.send_replace(PollState::Refreshing);

        let check_firmware = self
            .inner
            .firmware_check
            .lock()
            .expect("firmware throttle poisoned")
            .ready();
        if check_firmware {
            // Result lands in a later state poll; a failed trigger only
            // delays the update flag.
            if let Err(e) = self.inner.client.check_firmware_updates().await {
                warn!(error = %e, "firmware update check failed");
            }
        }

        match self.poll_once(check_firmware).await {
            Ok(snapshot) => {
                self.inner
                    .assumed
                    .lock()
                    .expect("assumed state lock poisoned")
                    .prune();
                debug!(
                    ssids = snapshot.ssids.len(),
                    clients = snapshot.device.total_connected_clients,
                    "poll complete"
                );
                self.inner.snapshot.store(Some(Arc::new(snapshot)));
                self.inner.poll_state.send_replace(PollState::Ready);
                Ok(())
            }
            Err(e) => {
                self.inner.poll_state.send_replace(PollState::Failed);
                Err(e)
            }
        }
    }

    async fn poll_once(&self, check_firmware: bool) -> Result<Snapshot, CoreError> {
        let device = self.inner.client.get_state(check_firmware).await?;
        let ssids = self.inner.client.get_ssids().await?;
        Ok(Snapshot {
            device,
            ssids,
            refreshed_at: Utc::now(),
        })
    }

    /// Subscribe to poll state changes.
    pub fn poll_state(&self) -> watch::Receiver<PollState> {
        self.inner.poll_state.subscribe()
    }

    // ── Snapshot accessors ───────────────────────────────────────

    /// The latest complete snapshot, if any poll has succeeded.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.inner.snapshot.load_full()
    }

    pub fn device_name(&self) -> Option<String> {
        self.snapshot().map(|s| s.device.device_name.clone())
    }

    pub fn model(&self) -> Option<String> {
        self.snapshot().map(|s| s.device.model.clone())
    }

    pub fn mac_address(&self) -> Option<String> {
        self.snapshot().map(|s| s.device.mac_address.clone())
    }

    pub fn serial_number(&self) -> Option<String> {
        self.snapshot().map(|s| s.device.serial_number.clone())
    }

    pub fn firmware_version(&self) -> Option<String> {
        self.snapshot().map(|s| s.device.firmware_version.clone())
    }

    pub fn is_firmware_update_available(&self) -> Option<bool> {
        self.snapshot().map(|s| s.device.firmware_update_available)
    }

    pub fn total_connected_clients(&self) -> Option<u32> {
        self.snapshot().map(|s| s.device.total_connected_clients)
    }

    /// Traffic/utilization sample for one interface ("lan", "wlan0",
    /// "wlan1").
    pub fn interface_stat(&self, interface: &str) -> Option<Stat> {
        self.snapshot()?.device.stats.get(interface).copied()
    }

    /// When the current snapshot was taken.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot().map(|s| s.refreshed_at)
    }

    /// Age of the current snapshot.
    pub fn data_age(&self) -> Option<Duration> {
        let refreshed_at = self.last_refresh()?;
        Some((Utc::now() - refreshed_at).to_std().unwrap_or_default())
    }

    // ── SSID reads ───────────────────────────────────────────────

    /// All SSIDs from the latest snapshot, with recently written states
    /// overlaid.
    pub fn ssids(&self) -> Vec<Ssid> {
        let Some(snapshot) = self.snapshot() else {
            return Vec::new();
        };
        let assumed = self.inner.assumed.lock().expect("assumed state lock poisoned");
        snapshot
            .ssids
            .iter()
            .map(|ssid| {
                let mut ssid = ssid.clone();
                if let Some(enabled) = assumed.overlay(&ssid.ssid_group_id) {
                    ssid.enabled = enabled;
                }
                ssid
            })
            .collect()
    }

    /// The per-band records of one logical SSID.
    pub fn ssids_by_group(&self, group_id: &str) -> Vec<Ssid> {
        self.ssids()
            .into_iter()
            .filter(|s| s.ssid_group_id == group_id)
            .collect()
    }

    // ── SSID writes ──────────────────────────────────────────────

    /// Enable or disable one logical SSID (all bands at once).
    ///
    /// On success the requested state is assumed for subsequent reads
    /// until a poll past the settling window confirms it.
    pub async fn set_ssid_enabled(&self, group_id: &str, enable: bool) -> Result<(), CoreError> {
        let records = self.ssids_by_group(group_id);
        if records.is_empty() {
            return Err(CoreError::SsidNotFound {
                group_id: group_id.to_owned(),
            });
        }

        self.inner.client.enable_ssid(&records, enable).await?;

        self.inner
            .assumed
            .lock()
            .expect("assumed state lock poisoned")
            .assume(group_id.to_owned(), enable);
        info!(group_id, enable, "SSID state written");
        Ok(())
    }

    // ── Firmware ─────────────────────────────────────────────────

    /// Explicitly trigger a firmware update check, bypassing the
    /// periodic throttle. The result shows up in the next poll.
    pub async fn check_firmware_updates(&self) -> Result<(), CoreError> {
        self.inner.client.check_firmware_updates().await?;
        Ok(())
    }
}

// ── Transport construction ───────────────────────────────────────

fn build_transport(config: &DeviceConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
