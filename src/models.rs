use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};

/// The remote omits and nulls scalar fields freely, so null is treated the
/// same as a missing value.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A repository as understood by the repository manager's rest api.
///
/// Format and role specific settings are carried as optional capabilities.
/// Which of them the server expects depends on the `format` and `type`
/// discriminators, e.g. a `docker`/`proxy` repository needs `docker`,
/// `dockerProxy`, `proxy`, `httpClient`, `negativeCache` and `storage`.
#[derive(Builder, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Repository {
    #[serde(
        default,
        deserialize_with = "null_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub format: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    #[builder(default = "true")]
    pub online: bool,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub repository_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub apt: Option<Apt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub apt_signing: Option<AptSigning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub cleanup: Option<Cleanup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub bower: Option<Bower>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub docker: Option<Docker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub docker_proxy: Option<DockerProxy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub http_client: Option<HttpClient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub negative_cache: Option<NegativeCache>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub proxy: Option<Proxy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub storage: Option<Storage>,
}

/// Apt distribution settings
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Apt {
    #[serde(default, deserialize_with = "null_default")]
    pub distribution: String,
    /// Only meaningful for proxies of flat apt repositories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat: Option<bool>,
}

/// Key used by a hosted apt repository to sign its metadata
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AptSigning {
    #[serde(default, deserialize_with = "null_default")]
    pub keypair: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cleanup {
    #[serde(default, deserialize_with = "null_default")]
    pub policy_names: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bower {
    #[serde(default, deserialize_with = "null_default")]
    pub rewrite_package_urls: bool,
}

/// Connector settings of a docker repository
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Docker {
    #[serde(default, deserialize_with = "null_default")]
    pub force_basic_auth: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
    #[serde(default, deserialize_with = "null_default")]
    pub v1_enabled: bool,
}

/// Where a docker proxy looks up its remote index
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexType {
    #[default]
    Hub,
    Registry,
    Custom,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DockerProxy {
    #[serde(default, deserialize_with = "null_default")]
    pub index_type: IndexType,
    /// Required when the index type is `CUSTOM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,
}

/// Outbound http settings a proxy repository uses to reach its remote
#[derive(Builder, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into), default)]
pub struct HttpClient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub authentication: Option<HttpClientAuthentication>,
    #[serde(default, deserialize_with = "null_default")]
    pub auto_block: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option))]
    pub connection: Option<HttpClientConnection>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientAuthentication {
    /// `username`, `ntlm` or `bearerToken`
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_default")]
    pub username: String,
    /// Write only, the server never returns it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub ntlm_host: String,
    #[serde(default, deserialize_with = "null_default")]
    pub ntlm_domain: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientConnection {
    #[serde(default, deserialize_with = "null_default")]
    pub enable_circular_redirects: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub enable_cookies: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent_suffix: Option<String>,
}

/// Caching of "not found" answers from a proxy's remote
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NegativeCache {
    #[serde(default, deserialize_with = "null_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub time_to_live: i64,
}

/// Remote and cache freshness settings of a proxy repository
#[derive(Builder, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Proxy {
    #[serde(default, deserialize_with = "null_default")]
    #[builder(default = "1440")]
    pub content_max_age: i64,
    #[serde(default, deserialize_with = "null_default")]
    #[builder(default = "1440")]
    pub metadata_max_age: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub remote_url: String,
}

/// Controls whether a hosted repository accepts new or updated content.
/// The server reports these upper cased, both spellings are accepted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    #[serde(alias = "ALLOW")]
    Allow,
    #[serde(alias = "ALLOW_ONCE")]
    AllowOnce,
    #[serde(alias = "DENY")]
    Deny,
}

#[derive(Builder, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Storage {
    /// Name of the blob store holding the repository's content
    #[serde(
        default,
        deserialize_with = "null_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub blob_store_name: String,
    #[serde(default, deserialize_with = "null_default")]
    #[builder(default = "true")]
    pub strict_content_type_validation: bool,
    /// Only hosted repositories carry a write policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setter(into, strip_option), default)]
    pub write_policy: Option<WritePolicy>,
}

/// Represents an authorization token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Bearer(String),
    Basic { username: String, password: String },
}
