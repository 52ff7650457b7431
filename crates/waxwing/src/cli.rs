//! Clap derive structures for the `wax` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wax -- CLI for Netgear WAX access points
#[derive(Debug, Parser)]
#[command(
    name = "wax",
    version,
    about = "Manage Netgear WAX access points from the command line",
    long_about = "A CLI for administering Netgear WAX access points over their\n\
        local HTTP management API: device status, SSID control, and\n\
        firmware update checks.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "WAXWING_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device address, hostname or IP (overrides profile)
    #[arg(long, short = 'd', env = "WAXWING_DEVICE", global = true)]
    pub device: Option<String>,

    /// Admin username (overrides profile)
    #[arg(long, short = 'u', env = "WAXWING_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WAXWING_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "WAXWING_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WAXWING_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show device status (identity, firmware, clients, traffic)
    #[command(alias = "st")]
    Status,

    /// List SSIDs across all radio bands
    Ssids,

    /// Enable or disable an SSID
    Ssid(SsidArgs),

    /// Firmware update operations
    #[command(alias = "fw")]
    Firmware(FirmwareArgs),

    /// Poll the device continuously and print status on each refresh
    Watch(WatchArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── SSID ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SsidArgs {
    #[command(subcommand)]
    pub command: SsidCommand,
}

#[derive(Debug, Subcommand)]
pub enum SsidCommand {
    /// Enable an SSID on all its bands
    Enable {
        /// SSID group id (see `wax ssids`)
        group_id: String,
    },

    /// Disable an SSID on all its bands
    Disable {
        /// SSID group id (see `wax ssids`)
        group_id: String,
    },
}

// ── Firmware ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FirmwareArgs {
    #[command(subcommand)]
    pub command: FirmwareCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirmwareCommand {
    /// Ask the device to check for a newer firmware image
    Check,
}

// ── Watch ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in seconds
    #[arg(long, short = 'i', default_value = "30")]
    pub interval: u64,
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Print the resolved configuration (passwords redacted)
    Show,

    /// Print the config file path
    Path,

    /// Store a profile's password in the system keyring
    SetPassword,
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
