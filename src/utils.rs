//! Utils

use clap::Parser;

/// Arguments for the curation demo
#[derive(Debug, Parser)]
pub struct ExampleCurateArgs {
    /// Listing fixture set to curate
    #[clap(short, long, env = "VVALUE_FIXTURE", default_value = "market")]
    pub fixture: String,

    /// Weight table fixture; the built-in Checks table when omitted
    #[clap(short, long, env = "VVALUE_WEIGHTS")]
    pub weights: Option<String>,

    /// Grid sizes of the originals held by the vault
    #[clap(long, value_delimiter = ',')]
    pub vault: Vec<u32>,

    /// Log filter used when `RUST_LOG` is not set
    #[clap(long, env = "VVALUE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}
