// Device state query
//
// Builds the monitor/basicSettings request tree, optionally widened with
// firmware-update fields (caller-gated) and the hourly internet
// connectivity probe, then parses the loosely-typed response into a
// `DeviceState`.

use std::collections::HashMap;

use tracing::trace;

use crate::bytes::parse_bytes;
use crate::client::{WaxClient, missing_field};
use crate::error::Error;
use crate::models::{DeviceState, FlexInt, Stat, StateRequest, StateResponse};

/// Interfaces the firmware exposes traffic stats for.
const STAT_INTERFACES: [&str; 3] = ["lan", "wlan0", "wlan1"];

impl WaxClient {
    /// Fetch the current device state (identity, firmware, client count,
    /// per-interface stats).
    ///
    /// Firmware-update fields are only requested when `check_firmware`
    /// is set; the internet-connectivity field rides along at most once
    /// per hour regardless.
    pub async fn get_state(&self, check_firmware: bool) -> Result<DeviceState, Error> {
        let check_connectivity = self
            .connectivity_check
            .lock()
            .expect("connectivity throttle poisoned")
            .ready();

        let request = StateRequest::new(check_firmware, check_connectivity);
        let value = self.post(&request).await?;
        trace!(%value, "state response");

        let resp: StateResponse = serde_json::from_value(value.clone()).map_err(|e| Error::Decode {
            message: format!("state response: {e}"),
            body: value.to_string(),
        })?;

        let system = resp.system.ok_or_else(|| missing_field("system", &value))?;
        let monitor = system
            .monitor
            .ok_or_else(|| missing_field("system.monitor", &value))?;
        let basic = system
            .basic_settings
            .ok_or_else(|| missing_field("system.basicSettings", &value))?;

        let firmware_update_available = system
            .fw_update
            .and_then(|f| f.image_available)
            .and_then(|n| n.as_i64())
            .is_some_and(|n| n > 0);

        let mut stats = HashMap::new();
        if let Some(raw) = &monitor.stats {
            for interface in STAT_INTERFACES {
                let Some(entry) = raw.get(interface) else {
                    continue;
                };
                stats.insert(
                    interface.to_owned(),
                    Stat {
                        channel_utilization_percent: entry
                            .channel_util
                            .as_ref()
                            .and_then(FlexInt::as_i64)
                            .and_then(|n| u8::try_from(n).ok())
                            .unwrap_or(0),
                        bytes_transferred: entry
                            .traffic
                            .as_deref()
                            .map(parse_bytes)
                            .unwrap_or(0),
                    },
                );
            }
        }

        Ok(DeviceState {
            device_name: basic
                .ap_name
                .ok_or_else(|| missing_field("system.basicSettings.apName", &value))?,
            model: monitor
                .product_id
                .ok_or_else(|| missing_field("system.monitor.productId", &value))?,
            mac_address: monitor
                .ethernet_mac_address
                .ok_or_else(|| missing_field("system.monitor.ethernetMacAddress", &value))?,
            serial_number: monitor
                .sys_serial_number
                .ok_or_else(|| missing_field("system.monitor.sysSerialNumber", &value))?,
            firmware_version: monitor
                .sys_version
                .ok_or_else(|| missing_field("system.monitor.sysVersion", &value))?,
            firmware_update_available,
            total_connected_clients: monitor
                .total_number_of_devices
                .as_ref()
                .and_then(FlexInt::as_i64)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| missing_field("system.monitor.totalNumberOfDevices", &value))?,
            stats,
        })
    }
}
