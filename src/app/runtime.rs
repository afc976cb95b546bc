use crate::catalog::{api_worker_loop, ProductApi};
use crate::error::{ProdtuiError, Result};
use crate::render::protocol::{ApiCommand, ApiResponse};
use crate::render::Effects;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;

const COMMAND_QUEUE_DEPTH: usize = 64;

/// The API worker task plus both ends the event loop talks to it through.
pub struct ApiWorkerHandle {
    commands: Sender<ApiCommand>,
    pub responses: Receiver<ApiResponse>,
    task: JoinHandle<()>,
}

impl ApiWorkerHandle {
    pub fn spawn(api: Arc<dyn ProductApi>) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (response_tx, response_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let task = tokio::spawn(api_worker_loop(command_rx, response_tx, api));
        Self {
            commands: command_tx,
            responses: response_rx,
            task,
        }
    }

    /// Forward the commands in `effects`. Returns `false` once the controller asked to quit.
    pub async fn dispatch(&self, effects: Effects) -> Result<bool> {
        for command in effects.commands {
            self.commands
                .send(command)
                .await
                .map_err(|_| ProdtuiError::WorkerUnavailable)?;
        }
        Ok(!effects.quit)
    }

    /// Stop the worker, giving queued commands up to `grace` to finish.
    ///
    /// Responses still in flight are drained and dropped so the worker never blocks on a full
    /// response queue. A request still pending after `grace` is aborted.
    pub async fn shutdown(mut self, grace: Duration) {
        // try_send: a full queue behind a stalled request must not block quitting
        let _ = self.commands.try_send(ApiCommand::Shutdown);
        let drained = tokio::time::timeout(grace, async {
            while self.responses.recv().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            log::debug!("api worker still busy after {:?}, aborting", grace);
            self.task.abort();
        }
        match self.task.await {
            Ok(()) => {}
            Err(err) if err.is_cancelled() => {}
            Err(err) => log::warn!("api worker ended abnormally: {}", err),
        }
    }
}
