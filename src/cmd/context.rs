use std::path::PathBuf;

use clap::Args;
use nexus_repo::config::ServerConfig;
use nexus_repo::repository::RepositoryClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Connection flags shared by every command. Anything given here overrides the
/// configuration file.
#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Path to the configuration file (defaults to ~/.nexus-repo/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Base url of the repository manager
    #[arg(long, env = "NEXUS_URL", global = true)]
    url: Option<String>,
    #[arg(short, long, env = "NEXUS_USERNAME", global = true)]
    username: Option<String>,
    #[arg(short, long, env = "NEXUS_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,
    /// Bearer token, takes precedence over username and password
    #[arg(long, env = "NEXUS_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

impl ServerArgs {
    fn overrides(&self) -> ServerConfig {
        ServerConfig {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            token: self.token.clone(),
            timeout: self.timeout,
        }
    }
}

pub struct Ctx {
    client: RepositoryClient,
}

impl Ctx {
    pub async fn init(args: &ServerArgs) -> anyhow::Result<Self> {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
            .try_init()?;
        let config = ServerConfig::load(args.config.as_deref())
            .await?
            .merge(args.overrides());
        debug!("using repository manager at {:?}", config.url);
        let client = RepositoryClient::from_config(&config)?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &RepositoryClient {
        &self.client
    }
}
