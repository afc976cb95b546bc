//! Application orchestration layer
//!
//! Wires the terminal, the input thread, the controller and the API worker together and runs
//! the event loop. State lives in the [`ViewModel`]; this module only moves events between
//! components.

mod runtime;

use crate::catalog::ProductApi;
use crate::error::{ProdtuiError, Result};
use crate::input::{spawn_input_thread, InputAction};
use crate::render::ui::{UIRenderer, ViewModel};
use crate::render::ProductController;
use runtime::ApiWorkerHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How long queued requests may still run after the user quits.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    api: Arc<dyn ProductApi>,
    ui_renderer: Box<dyn UIRenderer>,
    /// Shown in the status line
    service_label: String,
}

impl Application {
    pub fn new(
        api: Arc<dyn ProductApi>,
        ui_renderer: Box<dyn UIRenderer>,
        service_label: impl Into<String>,
    ) -> Self {
        Self {
            api,
            ui_renderer,
            service_label: service_label.into(),
        }
    }

    /// Take over the terminal and run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.run_with_input(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            log::warn!("input thread panicked");
        }
        self.ui_renderer.cleanup()?;
        result
    }

    /// Event loop over an arbitrary source of input actions.
    ///
    /// Ends when the controller asks to quit or the input source closes.
    pub async fn run_with_input(
        &mut self,
        mut input_rx: UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view = ViewModel::new(self.service_label.clone(), width, height);
        let mut controller = ProductController::new();
        let mut worker = ApiWorkerHandle::spawn(Arc::clone(&self.api));

        let mut running = worker.dispatch(controller.initial_load(&mut view)).await?;
        self.ui_renderer.render(&view)?;

        while running {
            tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => {
                        let effects = controller.process_action(action, &mut view);
                        running = worker.dispatch(effects).await?;
                    }
                    None => running = false,
                },
                response = worker.responses.recv() => match response {
                    Some(response) => {
                        let effects = controller.handle_response(response, &mut view);
                        running = worker.dispatch(effects).await?;
                    }
                    None => return Err(ProdtuiError::WorkerUnavailable),
                },
            }

            if running {
                self.ui_renderer.render(&view)?;
            }
        }

        worker.shutdown(SHUTDOWN_GRACE).await;
        Ok(())
    }
}
