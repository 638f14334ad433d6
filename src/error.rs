use std::path::PathBuf;

use reqwest::StatusCode;
use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("failed to read configuration file '{}': {source}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to deserialize configuration file '{}': {source}", path.display()))]
    ConfigDeserialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[snafu(display("could not create repository '{name}': HTTP: {status}, {body}"))]
    CreateRepository {
        name: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("could not unmarshal repositories: {source}"))]
    Decode { source: serde_json::Error },
    #[snafu(display("could not delete repository '{name}': HTTP: {status}, {body}"))]
    DeleteRepository {
        name: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("failed to deserialize repository definition: {source}"))]
    DefinitionDeserialize { source: serde_json::Error },
    #[snafu(display("failed to interact with local file: {source}"))]
    File { source: std::io::Error },
    #[snafu(display("failed to build http client: {source}"))]
    HttpClientInit { source: reqwest::Error },
    #[snafu(display("failed to look up password for '{username}' in the keychain: {reason}"))]
    Keychain { username: String, reason: String },
    #[snafu(display("could not list repositories: HTTP: {status}, {body}"))]
    ListRepositories { status: StatusCode, body: String },
    #[snafu(display("repository {field} was not given and is not set in the definition"))]
    MissingField { field: &'static str },
    #[snafu(display("no repository manager url was configured"))]
    MissingUrl,
    #[snafu(display("could not read repository '{name}': HTTP: {status}, {body}"))]
    ReadRepository {
        name: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("repository '{name}' does not exist"))]
    RepositoryNotFound { name: String },
    #[snafu(display("failed to make request to repository manager: {source}"))]
    Request { source: reqwest::Error },
    #[snafu(display("failed to read response body from repository manager: {source}"))]
    ResponseBody { source: reqwest::Error },
    #[snafu(display("failed to serialize to json: {source}"))]
    Serialize { source: serde_json::Error },
    #[snafu(display("could not update repository '{name}': HTTP: {status}, {body}"))]
    UpdateRepository {
        name: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("invalid url detected: {source}"))]
    Url { source: url::ParseError },
}
