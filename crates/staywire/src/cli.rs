//! Clap derive structures for the `staywire` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// staywire -- hotel search and live-offer pricing from the command line
#[derive(Debug, Parser)]
#[command(
    name = "staywire",
    version,
    about = "Search hotels, price live offers, and fetch property content",
    long_about = "A CLI for the hotel-distribution API.\n\n\
        Handles token exchange, negotiated rate-code injection, and\n\
        batched multi-property pricing with partial-failure tolerance.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "STAYWIRE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Upstream environment: test or production (overrides profile)
    #[arg(long, env = "STAYWIRE_ENV", global = true)]
    pub environment: Option<String>,

    /// API client id
    #[arg(long, env = "STAYWIRE_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// API client secret
    #[arg(long, env = "STAYWIRE_CLIENT_SECRET", global = true, hide_env = true)]
    pub client_secret: Option<String>,

    /// Tenant/office identifier (test environment only)
    #[arg(long, env = "STAYWIRE_OFFICE_ID", global = true)]
    pub office_id: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STAYWIRE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "STAYWIRE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search properties by city or coordinates (no pricing)
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Price live offers for one or more properties
    #[command(alias = "o")]
    Offers(OffersArgs),

    /// Fetch full detail for a single offer
    Offer(OfferDetailArgs),

    /// Fetch rich content (images, description, contact) for a property
    Content(ContentArgs),

    /// List the configured negotiated rate programs
    RateCodes,

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Search ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Debug, Subcommand)]
pub enum SearchCommand {
    /// Search by IATA city code
    City {
        /// Three-letter city code, e.g. PAR
        city_code: String,

        #[command(flatten)]
        options: SearchOptions,
    },

    /// Search by latitude/longitude
    Geo {
        latitude: f64,
        longitude: f64,

        #[command(flatten)]
        options: SearchOptions,
    },
}

#[derive(Debug, Args)]
pub struct SearchOptions {
    /// Search radius (clamped to 1-100)
    #[arg(long, default_value = "5")]
    pub radius: u32,

    /// Radius unit: km or mile
    #[arg(long, default_value = "km")]
    pub unit: String,

    /// Hotel chain codes (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub chains: Vec<String>,

    /// Amenity filters, e.g. SPA,PARKING
    #[arg(long, value_delimiter = ',')]
    pub amenities: Vec<String>,

    /// Star ratings to include, 1-5
    #[arg(long, value_delimiter = ',')]
    pub ratings: Vec<u8>,

    /// Property source filter
    #[arg(long)]
    pub source: Option<String>,
}

// ── Offers ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OffersArgs {
    /// Property identifiers (batched automatically)
    #[arg(required = true, value_delimiter = ',')]
    pub hotel_ids: Vec<String>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: NaiveDate,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: NaiveDate,

    /// Number of adults per room
    #[arg(long, default_value = "1")]
    pub adults: u32,

    /// Number of rooms
    #[arg(long, default_value = "1")]
    pub rooms: u32,

    /// ISO 4217 currency for prices
    #[arg(long)]
    pub currency: Option<String>,

    /// Price band, e.g. 100-350 (requires --currency)
    #[arg(long)]
    pub price_range: Option<String>,

    /// Board type filter, e.g. BREAKFAST
    #[arg(long)]
    pub board_type: Option<String>,

    /// Negotiated rate codes to request (merged with configured defaults)
    #[arg(long, value_delimiter = ',')]
    pub rate_codes: Vec<String>,
}

#[derive(Debug, Args)]
pub struct OfferDetailArgs {
    /// Offer identifier from a previous pricing query
    pub offer_id: String,
}

#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Property identifier
    pub hotel_id: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
