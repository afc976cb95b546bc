use crate::catalog::ProductApi;
use crate::render::protocol::{ApiCommand, ApiResponse, WriteKind};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the API worker, executing commands from the controller one at a time in arrival order.
pub async fn api_worker_loop(
    mut rx: Receiver<ApiCommand>,
    tx: Sender<ApiResponse>,
    api: Arc<dyn ProductApi>,
) {
    let worker = WorkerState { api };

    while let Some(cmd) = rx.recv().await {
        let outcome = worker.handle_command(cmd).await;
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
    debug!("api worker stopped");
}

struct WorkerState {
    api: Arc<dyn ProductApi>,
}

impl WorkerState {
    async fn handle_command(&self, cmd: ApiCommand) -> HandlerOutcome {
        match cmd {
            ApiCommand::FetchList { request_id } => {
                HandlerOutcome::respond(ApiResponse::ListLoaded {
                    request_id,
                    result: self.api.list_products().await,
                })
            }
            ApiCommand::Lookup { request_id, id } => {
                let result = self.api.find_product(&id).await;
                HandlerOutcome::respond(ApiResponse::LookupCompleted {
                    request_id,
                    id,
                    result,
                })
            }
            ApiCommand::Create { request_id, draft } => {
                HandlerOutcome::respond(ApiResponse::WriteCompleted {
                    request_id,
                    kind: WriteKind::Create,
                    result: self.api.create_product(&draft).await,
                })
            }
            ApiCommand::Update {
                request_id,
                id,
                draft,
            } => HandlerOutcome::respond(ApiResponse::WriteCompleted {
                request_id,
                kind: WriteKind::Update,
                result: self.api.update_product(&id, &draft).await,
            }),
            ApiCommand::Delete { request_id, id } => {
                HandlerOutcome::respond(ApiResponse::WriteCompleted {
                    request_id,
                    kind: WriteKind::Delete,
                    result: self.api.delete_product(&id).await,
                })
            }
            ApiCommand::Shutdown => HandlerOutcome::exit(),
        }
    }
}

struct HandlerOutcome {
    response: Option<ApiResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: ApiResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
