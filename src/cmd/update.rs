use std::path::PathBuf;

use clap::Parser;

use nexus_repo::error;

use super::context::Ctx;
use super::create::{discriminator, load_definition};

#[derive(Parser, Debug)]
#[command(version, about = "Replace the configuration of a repository", long_about = None)]
pub struct Update {
    name: String,
    /// File holding the new repository definition
    file: PathBuf,
    #[arg(short, long)]
    format: Option<String>,
    #[arg(short = 't', long = "type")]
    repository_type: Option<String>,
}

impl Update {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repository = load_definition(&self.file).await?;
        let format = discriminator(self.format.as_deref(), &repository.format, "format")?;
        let repository_type = discriminator(
            self.repository_type.as_deref(),
            &repository.repository_type,
            "type",
        )?;
        ctx.client()
            .update(&self.name, &repository, format, repository_type)
            .await?;
        info!("updated repository '{}'", self.name);
        Ok(())
    }
}
