// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::{bail, Result};
use log::{error, info};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use triggered::{Listener, Trigger};

use crate::config::Configuration;
use crate::context::Context;
use crate::http::http_service;
use crate::registry::ServiceRegistry;

/// Main runtime managing the explorer HTTP service.
#[allow(missing_debug_implementations)]
pub struct Explorer {
    handle: JoinHandle<()>,
    shutdown_signal: Trigger,
    exit_handle: Listener,
}

impl Explorer {
    /// Loads the service registry and starts the HTTP service.
    ///
    /// Fails when the registry can not be loaded or is invalid, the explorer can not render
    /// anything without it.
    pub async fn start(config: Configuration) -> Result<Self> {
        let client = reqwest::Client::new();

        let registry =
            ServiceRegistry::load(&config.services, &client, &config.default_service_id).await?;
        info!(
            "Serving {} GraphQL services from {}",
            registry.services().len(),
            config.services
        );

        let context = Context::new(config, registry, client);

        let (shutdown_signal, shutdown_handle) = triggered::trigger();
        let (exit_signal, exit_handle) = triggered::trigger();
        let (tx_ready, rx_ready) = oneshot::channel();

        let handle = tokio::spawn(async move {
            info!("Start HTTP service");

            if let Err(err) = http_service(context, shutdown_handle, tx_ready).await {
                error!("HTTP service failed: {}", err);
            }

            // Inform subscribers that the service stopped
            exit_signal.trigger();
        });

        // The ready sender gets dropped without sending when the server could not be bound
        if rx_ready.await.is_err() {
            bail!("Failed starting HTTP service");
        }

        Ok(Self {
            handle,
            shutdown_signal,
            exit_handle,
        })
    }

    /// This future resolves when the HTTP service stopped.
    ///
    /// It can be used to exit the application as a stopped service usually means that something
    /// went wrong.
    pub async fn on_exit(&self) {
        self.exit_handle.clone().await;
    }

    /// Stops the HTTP service and waits until it is fully shut down.
    pub async fn shutdown(self) {
        self.shutdown_signal.trigger();

        if self.handle.await.is_err() {
            error!("HTTP service panicked during shutdown");
        }
    }
}
