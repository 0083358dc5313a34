use std::path::PathBuf;

use crate::{ElementId, Endpoint, PendingReversion, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch {
        request_id: RequestId,
        endpoint: Endpoint,
    },
    ScheduleReversion(PendingReversion),
    SubmitForm { form: ElementId },
    ReadAsDataUrl { path: PathBuf, target: ElementId },
}
