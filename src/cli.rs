use clap::Parser;

/// `dbdeck` - A terminal dashboard for your hosted database instances
#[derive(Parser, Debug)]
#[command(name = "dbdeck", version, about)]
pub struct Cli {
    /// Base URL of the management API
    /// Example: https://api.dbdeck.dev
    #[arg(long = "api-url", env = "DBDECK_API_URL")]
    pub api_url: String,

    /// Account id the instances belong to
    #[arg(short = 'u', long, env = "DBDECK_USER")]
    pub user: String,

    /// Bearer token for API authentication
    #[arg(short = 't', long, env = "DBDECK_TOKEN")]
    pub token: Option<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Hostname shown in the header bar, without scheme or path noise.
    pub fn api_host(&self) -> String {
        let trimmed = self
            .api_url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        trimmed
            .split('/')
            .next()
            .unwrap_or(trimmed)
            .to_string()
    }
}
