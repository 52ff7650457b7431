//! Watch command: continuous polling with a status line per refresh.

use tokio::signal;

use waxwing_core::{Coordinator, DeviceConfig, PollState};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    device_config: DeviceConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut config = device_config;
    config.refresh_interval_secs = args.interval.max(1);

    let coordinator = Coordinator::new(config)?;
    // Even a failed connect may have logged in; release the session.
    if let Err(e) = coordinator.connect().await {
        coordinator.shutdown().await;
        return Err(e.into());
    }

    let mut poll_state = coordinator.poll_state();
    print_line(&coordinator, global);

    let runner = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.run().await })
    };

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            changed = poll_state.changed() => {
                if changed.is_err() {
                    break;
                }
                match *poll_state.borrow_and_update() {
                    PollState::Ready => print_line(&coordinator, global),
                    PollState::Failed => eprintln!("poll failed; keeping last data"),
                    _ => {}
                }
            }
        }
    }

    coordinator.shutdown().await;
    let _ = runner.await;
    Ok(())
}

fn print_line(coordinator: &Coordinator, global: &GlobalOpts) {
    let Some(snapshot) = coordinator.snapshot() else {
        return;
    };
    let ssids_up = coordinator.ssids().iter().filter(|s| s.enabled).count();
    output::emit(
        &format!(
            "{}  clients: {}  ssids up: {}  firmware: {}{}",
            snapshot.refreshed_at.format("%H:%M:%S"),
            snapshot.device.total_connected_clients,
            ssids_up,
            snapshot.device.firmware_version,
            if snapshot.device.firmware_update_available {
                " (update available)"
            } else {
                ""
            },
        ),
        global.quiet,
    );
}
