use crate::{ElementId, Page};

pub const DEV_HOST: &str = "localhost:8080";
pub const LOGIN_CONTROL_ID: &str = "google-login";
pub const DISABLED_CLASS: &str = "disabled";

/// Disable `control` unless the page is served from `dev_host`.
///
/// `host` is the host with its optional port, as in `location.host`.
/// Hosts compare ASCII case-insensitively.
/// Returns whether the control was disabled.
pub fn gate_login_control(
    page: &mut Page,
    control: ElementId,
    host: &str,
    dev_host: &str,
    disabled_class: &str,
) -> bool {
    if host.eq_ignore_ascii_case(dev_host) {
        return false;
    }
    match page.class_list_mut(control) {
        Some(classes) => {
            classes.add(disabled_class);
            true
        }
        None => false,
    }
}
