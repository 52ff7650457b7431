// SSID table operations
//
// The `ssidGetDetails` response nests three levels deep:
//
//   {"system":{"wlanSettings":{"wlanSettingTable":{"ssidGetDetails":
//     {"SSID3":{"wlan0":{"vap1":{"vapProfileStatus":1, "ssid":"Home"}},
//               "wlan1":{"vap1":{"vapProfileStatus":1, "ssid":"Home"}}}}}}}}
//
// `get_ssids` flattens group → radio → vap slot into a flat list;
// `enable_ssid` builds the inverse `ssidSetDetails` write for one group.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{WaxClient, missing_field};
use crate::error::Error;
use crate::models::{
    FlexInt, Ssid, SsidGetRequest, SsidSetRequest, SsidSetSystem, SsidSetTable,
    SsidSetWlanSettings, VapDetail, VapStatusWrite,
};

/// Radio indices probed in the SSID tree ("wlan0".."wlan3").
const MAX_RADIOS: u8 = 4;

impl WaxClient {
    /// Fetch the full SSID table, flattened across groups, radios, and
    /// VAP slots.
    pub async fn get_ssids(&self) -> Result<Vec<Ssid>, Error> {
        let value = self.post(&SsidGetRequest::new()).await?;

        let details = value
            .pointer("/system/wlanSettings/wlanSettingTable/ssidGetDetails")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                missing_field("system.wlanSettings.wlanSettingTable.ssidGetDetails", &value)
            })?;

        let mut ssids = Vec::new();
        for (group_id, group) in details {
            for radio in 0..MAX_RADIOS {
                let wlan_id = format!("wlan{radio}");
                if let Some(vaps) = group.get(&wlan_id) {
                    load_wlan(&mut ssids, group_id, &wlan_id, vaps)?;
                }
            }
        }
        Ok(ssids)
    }

    /// Enable or disable one logical SSID.
    ///
    /// All supplied records must share one `ssid_group_id` — typically
    /// the 2.4 GHz and 5 GHz pair of the same network. The write goes
    /// out as a single combined request covering every
    /// `(wlan_id, vap_slot)` pair. An empty input is a warned no-op.
    ///
    /// Real hardware has been observed taking ~20 s to apply this;
    /// callers should not assume low latency.
    pub async fn enable_ssid(&self, ssids: &[Ssid], enable: bool) -> Result<(), Error> {
        let Some(first) = ssids.first() else {
            warn!("no SSIDs supplied; nothing to do");
            return Ok(());
        };

        let status = if enable { "1" } else { "0" };
        let mut details: BTreeMap<String, BTreeMap<String, VapStatusWrite>> = BTreeMap::new();
        for ssid in ssids {
            details.entry(ssid.wlan_id.clone()).or_default().insert(
                ssid.vap_slot.clone(),
                VapStatusWrite {
                    vap_profile_status: status,
                    ssid: ssid.ssid_name.clone(),
                },
            );
        }

        let mut set_details = BTreeMap::new();
        set_details.insert(first.ssid_group_id.clone(), details);

        let request = SsidSetRequest {
            system: SsidSetSystem {
                wlan_settings: SsidSetWlanSettings {
                    wlan_setting_table: SsidSetTable {
                        ssid_set_details: set_details,
                    },
                },
            },
        };

        debug!(ssid = %first.ssid_name, enable, "setting SSID enabled state");
        self.post(&request).await?;
        Ok(())
    }
}

/// Flatten one radio's VAP map into `Ssid` records.
fn load_wlan(
    ssids: &mut Vec<Ssid>,
    group_id: &str,
    wlan_id: &str,
    vaps: &Value,
) -> Result<(), Error> {
    let vaps: BTreeMap<String, VapDetail> =
        serde_json::from_value(vaps.clone()).map_err(|e| Error::Decode {
            message: format!("ssidGetDetails.{group_id}.{wlan_id}: {e}"),
            body: vaps.to_string(),
        })?;

    for (slot, vap) in vaps {
        ssids.push(Ssid {
            ssid_group_id: group_id.to_owned(),
            ssid_name: vap.ssid.unwrap_or_default(),
            vap_slot: slot,
            wlan_id: wlan_id.to_owned(),
            // The firmware echoes the profile status as an integer or a
            // numeric string depending on version; both count.
            enabled: vap
                .vap_profile_status
                .as_ref()
                .and_then(FlexInt::as_i64)
                == Some(1),
            ssid_index: group_id.to_owned(),
        });
    }
    Ok(())
}
