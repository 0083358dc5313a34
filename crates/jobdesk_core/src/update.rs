use crate::form::{guard_submit, SubmitEvent};
use crate::host_gate::gate_login_control;
use crate::indicator::{revert, show_confirmation, Confirmation};
use crate::preview::{apply_preview, selected_file};
use crate::{ActionResult, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded { host } => {
            let (page, settings) = state.split_mut();
            let disabled = page
                .element_by_dom_id(&settings.login_control_id)
                .is_some_and(|control| {
                    gate_login_control(
                        page,
                        control,
                        &host,
                        &settings.dev_host,
                        &settings.disabled_class,
                    )
                });
            if disabled {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ActionClicked { endpoint, trigger } => {
            if state.is_unloaded()
                || !endpoint.is_action()
                || state.page().element(trigger).is_none()
            {
                return (state, Vec::new());
            }
            let request_id = state.begin_request(trigger);
            vec![Effect::Dispatch {
                request_id,
                endpoint,
            }]
        }
        Msg::ActionResolved { request_id, result } => {
            let Some(trigger) = state.finish_request(request_id) else {
                return (state, Vec::new());
            };
            match result {
                ActionResult::Confirmed => confirm_trigger(&mut state, trigger),
                ActionResult::Declined | ActionResult::Failed => Vec::new(),
            }
        }
        Msg::ReversionDue(pending) => {
            let (page, _) = state.split_mut();
            if revert(page, &pending) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FormSubmitted { form } => {
            let mut event = SubmitEvent::default();
            let (page, settings) = state.split_mut();
            let before = page.class_list(form).cloned();
            guard_submit(page, form, &settings.form_guard, &mut event);
            if page.class_list(form).cloned() != before {
                state.mark_dirty();
            }
            if event.default_prevented || state.page().element(form).is_none() {
                Vec::new()
            } else {
                vec![Effect::SubmitForm { form }]
            }
        }
        Msg::FileInputChanged { input, preview } => match selected_file(state.page(), input) {
            Some(path) if !state.is_unloaded() => vec![Effect::ReadAsDataUrl {
                path,
                target: preview,
            }],
            _ => Vec::new(),
        },
        Msg::PreviewLoaded { target, data_url } => {
            let (page, _) = state.split_mut();
            if apply_preview(page, target, data_url) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PageUnloaded => {
            state.unload();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// The icon lives in the trigger's first child.
fn confirm_trigger(state: &mut AppState, trigger: crate::ElementId) -> Vec<Effect> {
    let Some(icon) = state.page().first_child(trigger) else {
        return Vec::new();
    };
    let (page, settings) = state.split_mut();
    match show_confirmation(page, icon, &settings.indicator) {
        Confirmation::Armed(pending) => {
            state.mark_dirty();
            vec![Effect::ScheduleReversion(pending)]
        }
        Confirmation::AlreadyConfirmed | Confirmation::NoIconClass => Vec::new(),
    }
}
