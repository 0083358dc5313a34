//! Jobdesk core: page model, status indicator and the pure state machine.
mod dom;
mod effect;
mod endpoint;
pub mod form;
pub mod host_gate;
pub mod indicator;
mod msg;
pub mod preview;
mod settings;
mod state;
mod update;
mod view_model;

pub use dom::{ClassList, Element, ElementId, ElementKind, InputControl, InputType, Page};
pub use effect::Effect;
pub use endpoint::{Endpoint, EndpointError, JobFilter, JobId};
pub use indicator::{Confirmation, IndicatorStyle, PendingReversion};
pub use msg::{ActionResult, Msg};
pub use settings::ConsoleSettings;
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::PageView;
