//! Action entry point
//!
//! Thin glue: read inputs, wire up the collaborators, run the engine,
//! exit non-zero when the aggregated result is unsuccessful.

mod inputs;

use anyhow::Result;
use gh_backport_core::{Backport, RunResult};
use gh_backport_git::CliGit;
use gh_backport_github::{octocrab::Octocrab, OctocrabClient, TokenResolver};
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting gh-backport");
    match run().await {
        Ok(result) if result.success() => {
            info!("Backport run finished successfully");
        }
        Ok(_) => {
            error!("Backport run finished with failed target branches");
            std::process::exit(1);
        }
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<RunResult> {
    let ctx = inputs::load()?;

    let token = TokenResolver::new(ctx.token.clone()).get_token().await?;
    let octocrab = Octocrab::builder().personal_token(token).build()?;
    let github = OctocrabClient::new(
        Arc::new(octocrab),
        ctx.config.repo_owner.clone(),
        ctx.config.repo_name.clone(),
    );
    let git = CliGit::new(&ctx.workspace);

    Backport::new(Arc::new(github), Arc::new(git), ctx.config)
        .run()
        .await
}
