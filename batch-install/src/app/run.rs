//! Batch install run

use std::future::Future;
use std::time::Duration;

use tracing::info;

use crate::app::inputs::Inputs;
use crate::app::options::InstallOptions;
use crate::errors::InstallError;
use crate::http::batch::{build_url, BatchApi};
use crate::http::client::HttpClient;
use crate::manifest::payload::PayloadBuilder;
use crate::models::batch::Payload;
use crate::report::Reporter;
use crate::workers::poller;

/// Build the payload, submit it and follow the batch to completion
pub async fn run<R>(options: &InstallOptions, inputs: &Inputs, reporter: &R) -> Result<(), InstallError>
where
    R: Reporter + ?Sized,
{
    let builder = PayloadBuilder::new(options.workspace.as_deref(), inputs);
    let payload = builder.build(&options.source).await?;

    let url = build_url(options.instance.as_deref())?;
    let client = HttpClient::new(url, options.credentials.clone())?;

    install_batch(options, &client, &payload, reporter, tokio::time::sleep).await
}

/// Submit an already-built payload and poll it with the given client
pub async fn install_batch<A, R, S, F>(
    options: &InstallOptions,
    api: &A,
    payload: &Payload,
    reporter: &R,
    sleep_fn: S,
) -> Result<(), InstallError>
where
    A: BatchApi + ?Sized,
    R: Reporter + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let submitted = api.submit(payload).await?;
    info!("Batch submitted with status '{}'", submitted.status);

    poller::run(&options.poller, api, reporter, submitted, sleep_fn).await
}
