use crate::form::FormGuardClasses;
use crate::host_gate::{DEV_HOST, DISABLED_CLASS, LOGIN_CONTROL_ID};
use crate::IndicatorStyle;

/// Page-level behavior knobs. Defaults match the server-rendered templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub indicator: IndicatorStyle,
    pub form_guard: FormGuardClasses,
    pub dev_host: String,
    pub login_control_id: String,
    pub disabled_class: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            indicator: IndicatorStyle::default(),
            form_guard: FormGuardClasses::default(),
            dev_host: DEV_HOST.to_string(),
            login_control_id: LOGIN_CONTROL_ID.to_string(),
            disabled_class: DISABLED_CLASS.to_string(),
        }
    }
}
