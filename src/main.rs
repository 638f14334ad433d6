#[macro_use]
extern crate tracing;

use clap::Parser;
use cmd::{
    context::{Ctx, ServerArgs},
    create::Create,
    delete::Delete,
    list::List,
    read::Read,
    update::Update,
};

mod cmd;

#[derive(Parser, Debug)]
#[command(version, about = "Manage repositories on a nexus repository manager", long_about = None)]
struct Args {
    #[command(flatten)]
    server: ServerArgs,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    Create(Create),
    Read(Read),
    Update(Update),
    Delete(Delete),
    List(List),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let ctx = Ctx::init(&args.server).await?;

    match args.command {
        Commands::Create(cmd) => cmd.run(&ctx).await?,
        Commands::Read(cmd) => cmd.run(&ctx).await?,
        Commands::Update(cmd) => cmd.run(&ctx).await?,
        Commands::Delete(cmd) => cmd.run(&ctx).await?,
        Commands::List(cmd) => cmd.run(&ctx).await?,
    }
    Ok(())
}
