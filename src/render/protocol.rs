//! Protocol definitions shared between the controller and the API worker.

use crate::catalog::{ApiResult, Product, ProductDraft, ProductId};

/// Identifier attached to worker requests so responses can be correlated.
pub type RequestId = u64;

/// The write operations the controller can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
    Delete,
}

/// Commands sent from the controller to the API worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    FetchList {
        request_id: RequestId,
    },
    Lookup {
        request_id: RequestId,
        id: ProductId,
    },
    Create {
        request_id: RequestId,
        draft: ProductDraft,
    },
    Update {
        request_id: RequestId,
        id: ProductId,
        draft: ProductDraft,
    },
    Delete {
        request_id: RequestId,
        id: ProductId,
    },
    Shutdown,
}

impl ApiCommand {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            ApiCommand::FetchList { request_id }
            | ApiCommand::Lookup { request_id, .. }
            | ApiCommand::Create { request_id, .. }
            | ApiCommand::Update { request_id, .. }
            | ApiCommand::Delete { request_id, .. } => Some(*request_id),
            ApiCommand::Shutdown => None,
        }
    }
}

/// Responses emitted by the API worker back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    ListLoaded {
        request_id: RequestId,
        result: ApiResult<Vec<Product>>,
    },
    LookupCompleted {
        request_id: RequestId,
        id: ProductId,
        result: ApiResult<Vec<Product>>,
    },
    WriteCompleted {
        request_id: RequestId,
        kind: WriteKind,
        result: ApiResult<()>,
    },
}

impl ApiResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            ApiResponse::ListLoaded { request_id, .. }
            | ApiResponse::LookupCompleted { request_id, .. }
            | ApiResponse::WriteCompleted { request_id, .. } => *request_id,
        }
    }
}
