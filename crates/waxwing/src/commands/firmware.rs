//! Firmware command handlers.

use waxwing_core::{Coordinator, DeviceConfig};

use crate::cli::{FirmwareArgs, FirmwareCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    device_config: DeviceConfig,
    args: FirmwareArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FirmwareCommand::Check => {
            Coordinator::oneshot(device_config, |c| async move {
                c.check_firmware_updates().await
            })
            .await?;
            output::emit(
                "Firmware check triggered; run `wax status` in a minute to see the result",
                global.quiet,
            );
            Ok(())
        }
    }
}
