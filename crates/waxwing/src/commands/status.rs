//! Status command: one-page device summary.

use owo_colors::OwoColorize;
use tabled::Tabled;

use waxwing_core::Snapshot;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Traffic")]
    traffic: String,
    #[tabled(rename = "Channel Util")]
    channel_util: String,
}

fn detail(snapshot: &Snapshot, color: bool) -> String {
    let device = &snapshot.device;

    let update = if device.firmware_update_available {
        let text = "update available";
        if color {
            format!("{}", text.yellow())
        } else {
            text.to_owned()
        }
    } else {
        "up to date".to_owned()
    };

    let mut lines = vec![
        format!("Name:      {}", device.device_name),
        format!("Model:     {}", device.model),
        format!("MAC:       {}", device.mac_address),
        format!("Serial:    {}", device.serial_number),
        format!("Firmware:  {} ({update})", device.firmware_version),
        format!("Clients:   {}", device.total_connected_clients),
        format!("Refreshed: {}", snapshot.refreshed_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ];

    if !device.stats.is_empty() {
        lines.push(String::new());
        let mut interfaces: Vec<&String> = device.stats.keys().collect();
        interfaces.sort();
        let rows: Vec<StatRow> = interfaces
            .into_iter()
            .map(|name| stat_row(device, name))
            .collect();
        lines.push(output::rounded_table(&rows));
    }

    lines.join("\n")
}

fn stat_row(device: &waxwing_core::DeviceState, interface: &str) -> StatRow {
    let stat = device.stats.get(interface).copied().unwrap_or_default();
    StatRow {
        interface: interface.to_owned(),
        traffic: waxwing_core::format_bytes(stat.bytes_transferred),
        channel_util: if interface == "lan" {
            "-".into()
        } else {
            format!("{}%", stat.channel_utilization_percent)
        },
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn show(snapshot: &Snapshot, global: &GlobalOpts) {
    let color = output::should_color(&global.color)
        && matches!(global.output, OutputFormat::Table);
    let out = output::single(
        &global.output,
        snapshot,
        detail(snapshot, color),
        snapshot.device.mac_address.clone(),
    );
    output::emit(&out, global.quiet);
}
