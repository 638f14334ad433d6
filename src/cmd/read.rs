use clap::Parser;
use snafu::{OptionExt, ResultExt};

use nexus_repo::error;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[command(version, about = "Show the configuration of a repository", long_about = None)]
pub struct Read {
    name: String,
}

impl Read {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = ctx
            .client()
            .read(&self.name)
            .await?
            .context(error::RepositoryNotFoundSnafu {
                name: self.name.as_str(),
            })?;
        println!(
            "{}",
            serde_json::to_string_pretty(&repository).context(error::SerializeSnafu)?
        );
        Ok(())
    }
}
