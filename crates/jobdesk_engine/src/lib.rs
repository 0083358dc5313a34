//! Jobdesk engine: HTTP dispatch, timers and effect execution.
mod dispatch;
mod engine;
mod preview;
mod session;
mod transport;
mod types;

pub use dispatch::{dispatch_and_confirm, ActionDispatcher};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use preview::{encode_data_url, mime_for_path, read_data_url, PreviewError};
pub use session::ConsoleSession;
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{DispatchError, DispatchOutcome, EngineEvent, FailureKind};
