use clap::Parser;

use crate::api::DEFAULT_BASE_URL;

/// Ask GeoNames for populated places of a country and print their names
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// GeoNames web service root
    #[arg(long, env = "GEONAMES_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// GeoNames account; skips the username question when set
    #[arg(long, env = "GEONAMES_USERNAME")]
    pub username: Option<String>,

    /// Plain output without colours
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Logs go to stderr; RUST_LOG overrides the level picked here.
    pub fn init_logging(&self) {
        let level = if self.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }
}
