use std::io::Write;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use jobdesk_core::{
    AppState, ConsoleSettings, ElementId, ElementKind, Endpoint, InputControl, InputType, JobId,
    Msg, Page,
};
use jobdesk_engine::{ConsoleSession, DispatchError, EngineHandle, FailureKind, Transport};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::time::Instant;
use url::Url;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobdesk_logging::initialize_for_tests);
}

/// Records requested URLs and answers with a fixed response.
struct ScriptedTransport {
    response: Result<Value, DispatchError>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn answering(response: Result<Value, DispatchError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, DispatchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.response.clone()
    }
}

fn base() -> Url {
    Url::parse("http://localhost:8080/").unwrap()
}

fn session_with(page: Page, transport: Arc<ScriptedTransport>) -> ConsoleSession {
    let engine = EngineHandle::with_transport(transport, base()).unwrap();
    ConsoleSession::new(AppState::new(page, ConsoleSettings::default()), engine)
}

fn job_row(icon: &str) -> (Page, ElementId, ElementId) {
    let mut page = Page::new();
    let button = page.create_element("button", "btn btn-outline-primary", ElementKind::Plain);
    let icon = page.create_element("i", &format!("bi {icon}"), ElementKind::Plain);
    page.append_child(button, icon);
    (page, button, icon)
}

fn classes(session: &ConsoleSession, id: ElementId) -> String {
    session.state().page().class_list(id).unwrap().to_string()
}

#[tokio::test(start_paused = true)]
async fn queue_job_flips_icon_then_reverts_after_five_seconds() {
    init_logging();
    let transport = ScriptedTransport::answering(Ok(json!(true)));
    let (page, button, icon) = job_row("bi-cloud-arrow-up");
    let mut session = session_with(page, transport.clone());

    session.send(Msg::ActionClicked {
        endpoint: Endpoint::QueueJob(JobId::from(42)),
        trigger: button,
    });
    assert!(session.next_event().await);
    assert_eq!(classes(&session, icon), "bi bi-check-circle");
    assert_eq!(session.state().view().confirmed, vec![icon]);
    let flipped_at = Instant::now();

    // Let the reversion task register its timer before moving the clock.
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(4999)).await;
    assert_eq!(session.pump(), 0);
    assert_eq!(classes(&session, icon), "bi bi-check-circle");

    assert!(session.next_event().await);
    assert!(flipped_at.elapsed() >= Duration::from_millis(5000));
    assert_eq!(classes(&session, icon), "bi bi-cloud-arrow-up");
    assert_eq!(
        transport.requested(),
        vec!["http://localhost:8080/job/42/queue".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn declined_and_failed_requests_leave_icon_alone() {
    init_logging();
    let responses = [
        Ok(json!(false)),
        Ok(Value::Null),
        Err(DispatchError::new(FailureKind::Network, "connection reset")),
    ];
    for response in responses {
        let transport = ScriptedTransport::answering(response);
        let (page, button, icon) = job_row("bi-trash");
        let mut session = session_with(page, transport.clone());

        session.send(Msg::ActionClicked {
            endpoint: Endpoint::DeleteJob(JobId::from("b7")),
            trigger: button,
        });
        assert!(session.next_event().await);

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(session.pump(), 0);
        assert_eq!(classes(&session, icon), "bi bi-trash");
        assert_eq!(session.state().view().in_flight, 0);
        assert_eq!(transport.requested().len(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn repeated_success_keeps_one_timer() {
    init_logging();
    let transport = ScriptedTransport::answering(Ok(json!(true)));
    let (page, button, icon) = job_row("bi-save");
    let mut session = session_with(page, transport.clone());

    session.send(Msg::ActionClicked {
        endpoint: Endpoint::Save,
        trigger: button,
    });
    session.send(Msg::ActionClicked {
        endpoint: Endpoint::Save,
        trigger: button,
    });
    assert!(session.next_event().await);
    assert!(session.next_event().await);
    assert_eq!(classes(&session, icon), "bi bi-check-circle");

    assert!(session.next_event().await);
    assert_eq!(classes(&session, icon), "bi bi-save");

    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(30)).await;
    assert_eq!(session.pump(), 0);
    assert_eq!(classes(&session, icon), "bi bi-save");
    assert_eq!(transport.requested().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_reversion() {
    init_logging();
    let transport = ScriptedTransport::answering(Ok(json!(true)));
    let (page, button, icon) = job_row("bi-youtube");
    let mut session = session_with(page, transport.clone());

    session.send(Msg::ActionClicked {
        endpoint: Endpoint::SetYoutubeInfoAll,
        trigger: button,
    });
    assert!(session.next_event().await);
    session.shutdown();

    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(session.pump(), 0);
    assert_eq!(classes(&session, icon), "bi bi-check-circle");

    session.send(Msg::ActionClicked {
        endpoint: Endpoint::QueueAllReady,
        trigger: button,
    });
    tokio::task::yield_now().await;
    assert_eq!(transport.requested().len(), 1);
    assert_eq!(session.state().view().in_flight, 0);
}

#[tokio::test]
async fn shutdown_clears_requests_still_in_flight() {
    init_logging();
    let transport = ScriptedTransport::answering(Ok(json!(true)));
    let (page, button, icon) = job_row("bi-trash");
    let mut session = session_with(page, transport.clone());

    session.send(Msg::ActionClicked {
        endpoint: Endpoint::DeleteJob(JobId::from(9)),
        trigger: button,
    });
    assert_eq!(session.state().view().in_flight, 1);
    session.shutdown();
    assert_eq!(session.state().view().in_flight, 0);

    let waited = tokio::time::timeout(Duration::from_millis(50), session.next_event()).await;
    assert!(waited.is_err());
    assert_eq!(classes(&session, icon), "bi bi-trash");
}

fn upload_form(required_value: &str) -> (Page, ElementId) {
    let mut page = Page::new();
    let form = page.create_element("form", "needs-validation", ElementKind::Form);
    let title = page.create_element(
        "input",
        "form-control",
        ElementKind::Input(
            InputControl::new(InputType::Text)
                .required()
                .with_value(required_value),
        ),
    );
    page.append_child(form, title);
    (page, form)
}

#[tokio::test]
async fn invalid_form_is_blocked_without_a_request() {
    init_logging();
    let transport = ScriptedTransport::answering(Ok(json!(true)));
    let (page, form) = upload_form("");
    let mut session = session_with(page, transport.clone());

    assert!(session.send(Msg::FormSubmitted { form }));
    assert_eq!(session.pump(), 0);

    assert!(session.take_submitted_forms().is_empty());
    assert!(classes(&session, form).contains("was-validated"));
    assert!(transport.requested().is_empty());
}

#[tokio::test]
async fn valid_form_goes_through() {
    init_logging();
    let transport = ScriptedTransport::answering(Ok(json!(true)));
    let (page, form) = upload_form("Lofi mix");
    let mut session = session_with(page, transport.clone());

    session.send(Msg::FormSubmitted { form });
    assert_eq!(session.pump(), 1);

    assert_eq!(session.take_submitted_forms(), vec![form]);
    assert!(classes(&session, form).contains("was-validated"));
}

fn preview_page(file: std::path::PathBuf) -> (Page, ElementId, ElementId) {
    let mut page = Page::new();
    let input = page.create_element(
        "input",
        "form-control",
        ElementKind::Input(InputControl {
            files: vec![file],
            ..InputControl::new(InputType::File)
        }),
    );
    let img = page.create_element("img", "img-fluid", ElementKind::Image { src: None });
    (page, input, img)
}

#[tokio::test]
async fn selected_image_is_previewed_as_data_url() {
    init_logging();
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"hi").unwrap();
    file.flush().unwrap();

    let (page, input, img) = preview_page(file.path().to_path_buf());
    let mut session = session_with(page, ScriptedTransport::answering(Ok(json!(true))));

    session.send(Msg::FileInputChanged { input, preview: img });
    assert!(session.next_event().await);

    assert_eq!(
        session.state().page().image_src(img),
        Some("data:image/png;base64,aGk=")
    );
}

#[tokio::test]
async fn preview_read_finishing_after_shutdown_is_dropped() {
    init_logging();
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.write_all(b"frame").unwrap();
    file.flush().unwrap();

    let (page, input, img) = preview_page(file.path().to_path_buf());
    let mut session = session_with(page, ScriptedTransport::answering(Ok(json!(true))));

    session.send(Msg::FileInputChanged { input, preview: img });
    session.shutdown();
    let waited = tokio::time::timeout(Duration::from_millis(200), session.next_event()).await;

    assert!(waited.is_err());
    assert_eq!(session.state().page().image_src(img), None);
}

#[tokio::test]
async fn unreadable_image_leaves_preview_empty() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (page, input, img) = preview_page(dir.path().join("gone.png"));
    let mut session = session_with(page, ScriptedTransport::answering(Ok(json!(true))));

    session.send(Msg::FileInputChanged { input, preview: img });
    let waited = tokio::time::timeout(Duration::from_millis(200), session.next_event()).await;

    assert!(waited.is_err());
    assert_eq!(session.state().page().image_src(img), None);
}
