//! SSID command handlers.

use tabled::Tabled;

use waxwing_core::Ssid;

use crate::cli::GlobalOpts;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SsidRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "SSID")]
    name: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&Ssid> for SsidRow {
    fn from(s: &Ssid) -> Self {
        Self {
            group: s.ssid_group_id.clone(),
            name: s.ssid_name.clone(),
            band: band_label(&s.wlan_id),
            slot: s.vap_slot.clone(),
            enabled: if s.enabled { "yes" } else { "no" }.into(),
        }
    }
}

fn band_label(wlan_id: &str) -> String {
    match wlan_id {
        "wlan0" => "2.4 GHz".into(),
        "wlan1" => "5 GHz".into(),
        other => other.to_owned(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn list(ssids: &[Ssid], global: &GlobalOpts) {
    let rows: Vec<SsidRow> = ssids.iter().map(SsidRow::from).collect();
    let ids = ssids.iter().map(|s| s.ssid_group_id.clone()).collect();
    let out = output::list(&global.output, ssids, rows, ids);
    output::emit(&out, global.quiet);
}

pub fn confirm_toggle(group_id: &str, enable: bool, global: &GlobalOpts) {
    let verb = if enable { "enabled" } else { "disabled" };
    output::emit(
        &format!("SSID {group_id} {verb} (the radio may take ~20s to apply it)"),
        global.quiet,
    );
}
