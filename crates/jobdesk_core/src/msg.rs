use crate::{ElementId, Endpoint, PendingReversion, RequestId};

/// How an action request ended, as far as the page cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// The server answered JSON `true`.
    Confirmed,
    /// The server answered with anything other than `true`.
    Declined,
    /// Transport, status or decode failure.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page finished loading on `host` (host plus optional port).
    PageLoaded { host: String },
    /// User clicked an action button.
    ActionClicked {
        endpoint: Endpoint,
        trigger: ElementId,
    },
    /// Engine finished an action request.
    ActionResolved {
        request_id: RequestId,
        result: ActionResult,
    },
    /// Reversion timer fired.
    ReversionDue(PendingReversion),
    /// User submitted a form.
    FormSubmitted { form: ElementId },
    /// File selection changed on `input`; `preview` is the image to update.
    FileInputChanged { input: ElementId, preview: ElementId },
    /// Engine finished reading a preview file.
    PreviewLoaded { target: ElementId, data_url: String },
    /// Page is going away; outstanding work is abandoned.
    PageUnloaded,
    /// Fallback for placeholder wiring.
    NoOp,
}
