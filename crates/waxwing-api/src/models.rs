// Domain and wire types for the WAX local API.
//
// Requests mirror the device's nested `{"system": {...}}` envelope with
// empty-string placeholders marking the fields we want filled in.
// Responses use `#[serde(default)]` liberally because the firmware is
// inconsistent about field presence, and numbers arrive as either JSON
// integers or numeric strings depending on firmware version.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ── Domain model ─────────────────────────────────────────────────────

/// One virtual access point instance (one SSID on one radio band).
///
/// The 2.4 GHz and 5 GHz halves of a logical network are separate `Ssid`
/// records sharing a `ssid_group_id`. The whole list is rebuilt on every
/// poll; only group-id value equality persists across polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ssid {
    /// Groups the per-band records of one logical network (e.g. "SSID1").
    pub ssid_group_id: String,
    /// The broadcast network name.
    pub ssid_name: String,
    /// Radio-internal slot id hosting this SSID (e.g. "vap1").
    pub vap_slot: String,
    /// Radio index: "wlan0" is 2.4 GHz, "wlan1" is 5 GHz.
    pub wlan_id: String,
    pub enabled: bool,
    /// Raw index key exactly as returned by the device.
    pub ssid_index: String,
}

/// Snapshot of the access point, replaced atomically on every poll.
///
/// `mac_address` is the stable identity of the physical device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceState {
    pub device_name: String,
    pub model: String,
    pub mac_address: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub firmware_update_available: bool,
    pub total_connected_clients: u32,
    /// Keyed by interface name: "lan", "wlan0", "wlan1".
    pub stats: HashMap<String, Stat>,
}

/// Per-interface traffic/utilization sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stat {
    /// Airtime occupancy, 0-100. Always 0 for the wired interface.
    pub channel_utilization_percent: u8,
    /// Cumulative byte counter; resets when the device reboots.
    pub bytes_transferred: u64,
}

// ── Flexible scalars ─────────────────────────────────────────────────

/// A number the firmware serializes as either a JSON integer or a
/// numeric string, depending on version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum FlexInt {
    Int(i64),
    Str(String),
}

impl FlexInt {
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}

// ── Login (step 2) ───────────────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub system: LoginSystem<'a>,
}

#[derive(Serialize)]
pub(crate) struct LoginSystem<'a> {
    #[serde(rename = "basicSettings")]
    pub basic_settings: LoginBasicSettings<'a>,
}

#[derive(Serialize)]
pub(crate) struct LoginBasicSettings<'a> {
    #[serde(rename = "adminName")]
    pub admin_name: &'a str,
    #[serde(rename = "adminPasswd")]
    pub admin_passwd: &'a str,
}

/// Newer firmware returns the security token in the response body
/// instead of the `security` header.
#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub system: Option<LoginResponseSystem>,
}

#[derive(Deserialize)]
pub(crate) struct LoginResponseSystem {
    #[serde(default)]
    pub security_token: Option<String>,
}

// ── State query ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct StateRequest {
    pub system: StateRequestSystem,
}

#[derive(Serialize)]
pub(crate) struct StateRequestSystem {
    pub monitor: MonitorRequest,
    #[serde(rename = "basicSettings")]
    pub basic_settings: BasicSettingsRequest,
    #[serde(rename = "FwUpdate", skip_serializing_if = "Option::is_none")]
    pub fw_update: Option<FwUpdateRequest>,
}

#[derive(Serialize)]
pub(crate) struct MonitorRequest {
    #[serde(rename = "productId")]
    pub product_id: &'static str,
    #[serde(rename = "totalNumberOfDevices")]
    pub total_number_of_devices: &'static str,
    #[serde(rename = "sysSerialNumber")]
    pub sys_serial_number: &'static str,
    #[serde(rename = "ethernetMacAddress")]
    pub ethernet_mac_address: &'static str,
    #[serde(rename = "sysVersion")]
    pub sys_version: &'static str,
    #[serde(rename = "FiveGhzSupport")]
    pub five_ghz_support: EmptyObject,
    pub stats: StatsRequest,
    /// Only requested at most once per hour.
    #[serde(
        rename = "internetConnectivityStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub internet_connectivity_status: Option<&'static str>,
}

#[derive(Serialize)]
pub(crate) struct StatsRequest {
    pub lan: InterfaceStatsRequest,
    pub wlan0: InterfaceStatsRequest,
    pub wlan1: InterfaceStatsRequest,
}

#[derive(Serialize)]
pub(crate) struct InterfaceStatsRequest {
    pub traffic: &'static str,
    #[serde(rename = "channelUtil", skip_serializing_if = "Option::is_none")]
    pub channel_util: Option<&'static str>,
}

#[derive(Serialize)]
pub(crate) struct BasicSettingsRequest {
    #[serde(rename = "apName")]
    pub ap_name: &'static str,
}

#[derive(Serialize)]
pub(crate) struct FwUpdateRequest {
    #[serde(rename = "ImageAvailable")]
    pub image_available: &'static str,
    #[serde(rename = "ImageVersion")]
    pub image_version: &'static str,
}

/// Serializes as `{}` — the device treats an empty object as a probe.
#[derive(Serialize)]
pub(crate) struct EmptyObject {}

impl StateRequest {
    pub(crate) fn new(check_firmware: bool, check_connectivity: bool) -> Self {
        Self {
            system: StateRequestSystem {
                monitor: MonitorRequest {
                    product_id: "",
                    total_number_of_devices: "",
                    sys_serial_number: "",
                    ethernet_mac_address: "",
                    sys_version: "",
                    five_ghz_support: EmptyObject {},
                    stats: StatsRequest {
                        lan: InterfaceStatsRequest {
                            traffic: "",
                            channel_util: None,
                        },
                        wlan0: InterfaceStatsRequest {
                            traffic: "",
                            channel_util: Some(""),
                        },
                        wlan1: InterfaceStatsRequest {
                            traffic: "",
                            channel_util: Some(""),
                        },
                    },
                    internet_connectivity_status: check_connectivity.then_some(""),
                },
                basic_settings: BasicSettingsRequest { ap_name: "" },
                fw_update: check_firmware.then_some(FwUpdateRequest {
                    image_available: "",
                    image_version: "",
                }),
            },
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct StateResponse {
    #[serde(default)]
    pub system: Option<StateResponseSystem>,
}

#[derive(Deserialize)]
pub(crate) struct StateResponseSystem {
    #[serde(default)]
    pub monitor: Option<MonitorResponse>,
    #[serde(default, rename = "basicSettings")]
    pub basic_settings: Option<BasicSettingsResponse>,
    #[serde(default, rename = "FwUpdate")]
    pub fw_update: Option<FwUpdateResponse>,
}

#[derive(Deserialize)]
pub(crate) struct MonitorResponse {
    #[serde(default, rename = "productId")]
    pub product_id: Option<String>,
    #[serde(default, rename = "totalNumberOfDevices")]
    pub total_number_of_devices: Option<FlexInt>,
    #[serde(default, rename = "sysSerialNumber")]
    pub sys_serial_number: Option<String>,
    #[serde(default, rename = "ethernetMacAddress")]
    pub ethernet_mac_address: Option<String>,
    #[serde(default, rename = "sysVersion")]
    pub sys_version: Option<String>,
    #[serde(default)]
    pub stats: Option<BTreeMap<String, InterfaceStatsResponse>>,
}

#[derive(Deserialize)]
pub(crate) struct InterfaceStatsResponse {
    /// Human-readable quantity, e.g. "12.2 GB". Decoded by the byte codec.
    #[serde(default)]
    pub traffic: Option<String>,
    #[serde(default, rename = "channelUtil")]
    pub channel_util: Option<FlexInt>,
}

#[derive(Deserialize)]
pub(crate) struct BasicSettingsResponse {
    #[serde(default, rename = "apName")]
    pub ap_name: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct FwUpdateResponse {
    #[serde(default, rename = "ImageAvailable")]
    pub image_available: Option<FlexInt>,
}

// ── SSID table ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct SsidGetRequest {
    pub system: SsidGetSystem,
}

#[derive(Serialize)]
pub(crate) struct SsidGetSystem {
    #[serde(rename = "wlanSettings")]
    pub wlan_settings: SsidGetWlanSettings,
}

#[derive(Serialize)]
pub(crate) struct SsidGetWlanSettings {
    #[serde(rename = "wlanSettingTable")]
    pub wlan_setting_table: SsidGetTable,
}

#[derive(Serialize)]
pub(crate) struct SsidGetTable {
    #[serde(rename = "ssidGetDetails")]
    pub ssid_get_details: &'static str,
}

impl SsidGetRequest {
    pub(crate) fn new() -> Self {
        Self {
            system: SsidGetSystem {
                wlan_settings: SsidGetWlanSettings {
                    wlan_setting_table: SsidGetTable {
                        ssid_get_details: "",
                    },
                },
            },
        }
    }
}

/// One VAP entry from the `ssidGetDetails` tree. The firmware returns
/// many more fields (`hideNetworkName`, security settings, ...); only
/// the ones we consume are modeled.
#[derive(Deserialize)]
pub(crate) struct VapDetail {
    #[serde(default, rename = "vapProfileStatus")]
    pub vap_profile_status: Option<FlexInt>,
    #[serde(default)]
    pub ssid: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct SsidSetRequest {
    pub system: SsidSetSystem,
}

#[derive(Serialize)]
pub(crate) struct SsidSetSystem {
    #[serde(rename = "wlanSettings")]
    pub wlan_settings: SsidSetWlanSettings,
}

#[derive(Serialize)]
pub(crate) struct SsidSetWlanSettings {
    #[serde(rename = "wlanSettingTable")]
    pub wlan_setting_table: SsidSetTable,
}

#[derive(Serialize)]
pub(crate) struct SsidSetTable {
    /// group id → wlan id → vap slot → status write.
    #[serde(rename = "ssidSetDetails")]
    pub ssid_set_details: BTreeMap<String, BTreeMap<String, BTreeMap<String, VapStatusWrite>>>,
}

/// Status is written as a string ("1"/"0"); reads accept both the
/// string and integer forms the firmware has been observed to echo.
#[derive(Serialize)]
pub(crate) struct VapStatusWrite {
    #[serde(rename = "vapProfileStatus")]
    pub vap_profile_status: &'static str,
    pub ssid: String,
}

// ── Firmware check trigger ───────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct FirmwareCheckRequest {
    pub method: u8,
    #[serde(rename = "upgradeCheck")]
    pub upgrade_check: u8,
}

impl FirmwareCheckRequest {
    pub(crate) fn new() -> Self {
        Self { method: 5, upgrade_check: 0 }
    }
}
