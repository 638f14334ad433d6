use clap::Parser;

use nexus_repo::error;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[command(version, about = "Delete a repository and its content", long_about = None)]
pub struct Delete {
    name: String,
}

impl Delete {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        ctx.client().delete(&self.name).await?;
        info!("deleted repository '{}'", self.name);
        Ok(())
    }
}
