//! ecsd: render a deployment template, register its task definition and
//! roll it out as a service or run it once to completion.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ecsd_client::EcsHttpClient;
use ecsd_core::Deployer;
use ecsd_observe::logger_init;

mod cli;
mod config;
mod error;
mod template;

use crate::{cli::Cli, config::EnvironmentConfig, template::Deployment};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger_init(&cli.logger_config()).context("logger setup failed")?;

    let env_config = EnvironmentConfig::load(&cli.config, std::env::vars_os())
        .context("config stage failed")?;

    let raw = std::fs::read_to_string(&cli.template)
        .with_context(|| format!("template stage failed: reading {}", cli.template.display()))?;
    let rendered = template::render(&raw, &env_config).context("template stage failed")?;

    let mut deployment = Deployment::parse(&rendered).context("template stage failed")?;
    deployment
        .inject_environment(&env_config)
        .context("config stage failed")?;

    if cli.debug {
        println!("{rendered}");
        return Ok(());
    }

    let client = EcsHttpClient::new(&cli.client_config()).context("client setup failed")?;
    info!(endpoint = client.endpoint(), cluster = %env_config.cluster, "scheduler client ready");

    let deployer = Deployer::new(Arc::new(client), env_config.cluster.clone());
    let report = deployer
        .deploy(
            cli.kind,
            &deployment.task,
            deployment.service.as_ref(),
            &cli.poll_policy(),
        )
        .await
        .context("deploy stage failed")?;

    info!(
        kind = %report.kind,
        task_definition = %report.task_definition,
        service = report.service.as_deref().unwrap_or("-"),
        "deploy success"
    );
    Ok(())
}
