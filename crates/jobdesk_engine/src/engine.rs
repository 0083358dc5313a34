use std::sync::Arc;

use jobdesk_core::Effect;
use jobdesk_logging::{desk_debug, desk_info, desk_trace};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::dispatch::ActionDispatcher;
use crate::preview::read_data_url;
use crate::transport::{ReqwestTransport, Transport, TransportSettings};
use crate::{DispatchError, EngineEvent};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: Url,
    pub transport: TransportSettings,
}

impl EngineConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            transport: TransportSettings::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine must be created inside a tokio runtime")]
    NoRuntime,
    #[error("failed to build http transport: {0}")]
    Transport(#[from] DispatchError),
}

/// Runs effects on the ambient tokio runtime and reports back as [`EngineEvent`]s.
pub struct EngineHandle {
    dispatcher: Arc<ActionDispatcher>,
    runtime: Handle,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    event_rx: mpsc::UnboundedReceiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(config.transport)?;
        Self::with_transport(Arc::new(transport), config.base_url)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, base_url: Url) -> Result<Self, EngineError> {
        let runtime = Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            dispatcher: Arc::new(ActionDispatcher::new(transport, base_url)),
            runtime,
            event_tx,
            event_rx,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn run(&self, effect: Effect) {
        if self.shutdown.is_cancelled() {
            desk_debug!("Engine shut down; dropping {:?}", effect);
            return;
        }

        match effect {
            Effect::Dispatch {
                request_id,
                endpoint,
            } => {
                desk_info!("Dispatch request_id={} endpoint={}", request_id, endpoint.name());
                let dispatcher = self.dispatcher.clone();
                let event_tx = self.event_tx.clone();
                let shutdown = self.shutdown.clone();
                self.runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => {
                            desk_trace!("Request {} abandoned on shutdown", request_id);
                        }
                        outcome = dispatcher.dispatch(&endpoint) => {
                            let _ = event_tx.send(EngineEvent::ActionFinished { request_id, outcome });
                        }
                    }
                });
            }
            Effect::ScheduleReversion(pending) => {
                desk_debug!(
                    "Reverting {} to {} in {:?}",
                    pending.element,
                    pending.restore_class,
                    pending.delay
                );
                let event_tx = self.event_tx.clone();
                let shutdown = self.shutdown.clone();
                self.runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => {
                            desk_trace!("Reversion of {} cancelled", pending.element);
                        }
                        _ = tokio::time::sleep(pending.delay) => {
                            let _ = event_tx.send(EngineEvent::ReversionDue(pending));
                        }
                    }
                });
            }
            Effect::ReadAsDataUrl { path, target } => {
                let event_tx = self.event_tx.clone();
                let shutdown = self.shutdown.clone();
                self.runtime.spawn(async move {
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => {
                            desk_trace!("Preview read of {} abandoned on shutdown", path.display());
                        }
                        read = read_data_url(&path) => match read {
                            Ok(data_url) => {
                                let _ = event_tx.send(EngineEvent::PreviewRead { target, data_url });
                            }
                            Err(err) => {
                                desk_debug!("Preview read failed: {}", err);
                            }
                        }
                    }
                });
            }
            Effect::SubmitForm { form } => {
                desk_info!("Form {} passed the guard", form);
                let _ = self.event_tx.send(EngineEvent::FormSubmitted { form });
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<EngineEvent> {
        self.event_rx.recv().await
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Cancel in-flight requests, pending reversions and preview reads, as on page unload.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
