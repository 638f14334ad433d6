use clap::Parser;

use nexus_repo::error;
use nexus_repo::models::Repository;

use super::context::Ctx;

#[derive(Parser, Debug)]
#[clap(version, about = "List the repositories on the server", long_about = None)]
pub struct List {}

impl List {
    pub async fn run(&self, ctx: &Ctx) -> Result<(), error::Error> {
        let repositories = ctx.client().list().await?;
        for line in lines(&repositories) {
            println!("{line}");
        }
        Ok(())
    }
}

fn lines(repositories: &[Repository]) -> Vec<String> {
    repositories
        .iter()
        .map(|x| format!("{}\t{}\t{}", x.name, x.format, x.repository_type))
        .collect()
}
