use std::sync::Arc;

use jobdesk_core::Endpoint;
use jobdesk_logging::{desk_debug, desk_warn};
use url::Url;

use crate::{DispatchError, DispatchOutcome, FailureKind, Transport};

/// GET `url` and call `on_success(args)` only if the body is JSON `true`.
///
/// Nothing is raised to the caller: declines and failures come back as
/// [`DispatchOutcome`] values and are logged.
pub async fn dispatch_and_confirm<A, F>(
    transport: &dyn Transport,
    url: &Url,
    on_success: F,
    args: A,
) -> DispatchOutcome
where
    F: FnOnce(A),
{
    let outcome = DispatchOutcome::from_response(transport.get_json(url).await);
    match &outcome {
        DispatchOutcome::Confirmed => on_success(args),
        DispatchOutcome::Declined(value) => {
            desk_debug!("Server declined {} with {}", url, value);
        }
        DispatchOutcome::Failed(err) => {
            desk_warn!("Request to {} failed: {}", url, err);
        }
    }
    outcome
}

/// Sends action requests to endpoints under one base URL.
pub struct ActionDispatcher {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl ActionDispatcher {
    pub fn new(transport: Arc<dyn Transport>, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn dispatch(&self, endpoint: &Endpoint) -> DispatchOutcome {
        self.dispatch_then(endpoint, |()| {}, ()).await
    }

    /// Like [`dispatch_and_confirm`], with the URL built from `endpoint`.
    pub async fn dispatch_then<A, F>(&self, endpoint: &Endpoint, on_success: F, args: A) -> DispatchOutcome
    where
        F: FnOnce(A),
    {
        let url = match endpoint.url(&self.base_url) {
            Ok(url) => url,
            Err(err) => {
                desk_warn!("Cannot build url for {}: {}", endpoint.name(), err);
                return DispatchOutcome::Failed(DispatchError::new(
                    FailureKind::InvalidUrl,
                    err.to_string(),
                ));
            }
        };
        dispatch_and_confirm(self.transport.as_ref(), &url, on_success, args).await
    }
}
