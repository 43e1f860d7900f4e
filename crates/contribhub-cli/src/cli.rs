use clap::{Parser, Subcommand};
use config::ConfigError;
use contribhub_api::settings::{DEFAULT_ORG, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS};
use contribhub_api::Settings;
use contribhub_core::engine::DEFAULT_MAX_CONCURRENT_REQUESTS;
use contribhub_github::DEFAULT_API_URL;

#[derive(Parser)]
#[command(name = "contribhub")]
#[command(about = "ContribHub - Contributor activity across a GitHub organization", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub access token
    #[arg(long, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Organization to aggregate
    #[arg(long, env = "GITHUB_ORG", default_value = DEFAULT_ORG)]
    pub org: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Maximum remote requests in flight
    #[arg(long, env = "MAX_CONCURRENT_REQUESTS", default_value_t = DEFAULT_MAX_CONCURRENT_REQUESTS)]
    pub max_concurrent_requests: usize,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate every contributor of the organization and print JSON
    Aggregate {
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Print run statistics to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Show issues a user authored in the organization
    Issues {
        /// GitHub login
        login: String,
    },

    /// Show pull requests a user authored in the organization
    Pulls {
        /// GitHub login
        login: String,
    },

    /// Start API server
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

impl Cli {
    /// Settings for this invocation, held to the same rules as the
    /// environment-loaded server configuration.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let port = match self.command {
            Commands::Serve { port } => port,
            _ => DEFAULT_PORT,
        };

        let settings = Settings {
            github_access_token: self.github_token.clone(),
            github_org: self.org.clone(),
            github_api_url: self.api_url.clone(),
            port,
            max_concurrent_requests: self.max_concurrent_requests,
            request_timeout_secs: self.request_timeout_secs,
        };

        settings.validate()?;
        Ok(settings)
    }
}
