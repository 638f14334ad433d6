use std::path::{Path, PathBuf};

use clap::Parser;
use snafu::{OptionExt, ResultExt};

use nexus_repo::error;
use nexus_repo::models::Repository;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[command(version, about = "Create a repository from a json definition", long_about = None)]
pub struct Create {
    /// File holding the repository definition
    file: PathBuf,
    /// Repository format, e.g. maven2 (defaults to the definition's format)
    #[arg(short, long)]
    format: Option<String>,
    /// hosted, proxy or group (defaults to the definition's type)
    #[arg(short = 't', long = "type")]
    repository_type: Option<String>,
}

impl Create {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = load_definition(&self.file).await?;
        let format = discriminator(self.format.as_deref(), &repository.format, "format")?;
        let repository_type = discriminator(
            self.repository_type.as_deref(),
            &repository.repository_type,
            "type",
        )?;
        ctx.client()
            .create(&repository, format, repository_type)
            .await?;
        info!("created {}/{} repository '{}'", format, repository_type, repository.name);
        Ok(())
    }
}

/// Read a repository definition from a json file
pub(crate) async fn load_definition(path: &Path) -> Result<Repository, error::Error> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .context(error::FileSnafu)?;
    serde_json::from_str(&contents).context(error::DefinitionDeserializeSnafu)
}

/// Pick the flag value if given, otherwise what the definition says
pub(crate) fn discriminator<'a>(
    flag: Option<&'a str>,
    definition: &'a str,
    field: &'static str,
) -> Result<&'a str, error::Error> {
    flag.or(Some(definition).filter(|x| !x.is_empty()))
        .context(error::MissingFieldSnafu { field })
}
