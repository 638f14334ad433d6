use std::path::{Path, PathBuf};

use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use url::Url;

use crate::models::Token;
use crate::{error, Result};

const CONFIG_FILE: &str = ".nexus-repo/config.json";
#[cfg(feature = "keychain")]
const KEYCHAIN_SERVICE: &str = "nexus-repo";

/// Connection settings for a repository manager
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl ServerConfig {
    /// Default location of the configuration file, under the user's home
    pub fn default_path() -> Option<PathBuf> {
        home::home_dir().map(|x| x.join(CONFIG_FILE))
    }

    /// Load the configuration at `path`, or at the default location when no path
    /// is given. A missing file yields an empty configuration.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };
        let exists = tokio::fs::try_exists(&path)
            .await
            .context(error::ConfigReadSnafu { path: path.clone() })?;
        if !exists {
            debug!(target: "config", "no configuration file at {}", path.display());
            return Ok(Self::default());
        }
        let contents = tokio::fs::read_to_string(&path)
            .await
            .context(error::ConfigReadSnafu { path: path.clone() })?;
        let config: Self =
            serde_json::from_str(&contents).context(error::ConfigDeserializeSnafu { path })?;
        Ok(config)
    }

    /// Overlay any values set in `other` onto this configuration
    pub fn merge(mut self, other: ServerConfig) -> Self {
        self.url = other.url.or(self.url);
        self.username = other.username.or(self.username);
        self.password = other.password.or(self.password);
        self.token = other.token.or(self.token);
        self.timeout = other.timeout.or(self.timeout);
        self
    }

    pub fn url(&self) -> Result<Url> {
        let url = self.url.as_deref().context(error::MissingUrlSnafu)?;
        Url::parse(url).context(error::UrlSnafu)
    }

    /// Work out the credentials to send. A token wins over a username; a username
    /// with no password falls back to the system keychain when available.
    pub fn token(&self) -> Result<Option<Token>> {
        if let Some(token) = self.token.as_ref() {
            return Ok(Some(Token::Bearer(token.clone())));
        }
        let Some(username) = self.username.as_ref() else {
            return Ok(None);
        };
        if let Some(password) = self.password.as_ref() {
            return Ok(Some(Token::Basic {
                username: username.clone(),
                password: password.clone(),
            }));
        }
        keychain_password(username, self.url.as_deref().unwrap_or_default())
    }
}

cfg_if! {
    if #[cfg(feature = "keychain")] {
        fn keychain_password(username: &str, url: &str) -> Result<Option<Token>> {
            let account = format!("{username}@{url}");
            debug!(target: "config", "looking up password for {} in the keychain", account);
            let entry = keyring::Entry::new(KEYCHAIN_SERVICE, &account).map_err(|e| {
                error::Error::Keychain { username: username.to_string(), reason: e.to_string() }
            })?;
            match entry.get_password() {
                Ok(password) => Ok(Some(Token::Basic { username: username.to_string(), password })),
                Err(keyring::Error::NoEntry) => {
                    warn!(target: "config", "no password found for {}, continuing anonymously", account);
                    Ok(None)
                }
                Err(e) => error::KeychainSnafu { username, reason: e.to_string() }.fail(),
            }
        }
    } else {
        fn keychain_password(username: &str, _url: &str) -> Result<Option<Token>> {
            warn!(target: "config", "no password given for {}, continuing anonymously", username);
            Ok(None)
        }
    }
}
