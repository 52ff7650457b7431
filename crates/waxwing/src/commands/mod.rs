//! Command dispatch: bridges CLI args -> coordinator calls -> output
//! formatting.
//!
//! Device-bound commands run inside `Coordinator::oneshot` (connect,
//! act, log out); rendering happens afterwards so the session is never
//! held open while writing to stdout.

pub mod config_cmd;
pub mod firmware;
pub mod ssid;
pub mod status;
pub mod watch;

use waxwing_core::{Coordinator, CoreError, DeviceConfig};

use crate::cli::{Command, GlobalOpts, SsidCommand};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    device_config: DeviceConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => {
            let snapshot = Coordinator::oneshot(device_config, |c| async move {
                c.snapshot().ok_or(CoreError::NoData)
            })
            .await?;
            status::show(&snapshot, global);
            Ok(())
        }

        Command::Ssids => {
            let ssids = Coordinator::oneshot(device_config, |c| async move { Ok(c.ssids()) })
                .await?;
            ssid::list(&ssids, global);
            Ok(())
        }

        Command::Ssid(args) => {
            let (group_id, enable) = match args.command {
                SsidCommand::Enable { group_id } => (group_id, true),
                SsidCommand::Disable { group_id } => (group_id, false),
            };
            let group = group_id.clone();
            Coordinator::oneshot(device_config, |c| async move {
                c.set_ssid_enabled(&group, enable).await
            })
            .await?;
            ssid::confirm_toggle(&group_id, enable, global);
            Ok(())
        }

        Command::Firmware(args) => {
            firmware::handle(device_config, args, global).await
        }

        Command::Watch(args) => watch::handle(device_config, args, global).await,

        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
