//! Submit-time form guard and native constraint validation.
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{ElementId, ElementKind, InputControl, InputType, Page};

pub const NEEDS_VALIDATION_CLASS: &str = "needs-validation";
pub const WAS_VALIDATED_CLASS: &str = "was-validated";

// HTML "valid e-mail address" grammar.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityFlag {
    ValueMissing,
    TooShort,
    TooLong,
    TypeMismatch,
    BadInput,
    RangeUnderflow,
    RangeOverflow,
    PatternMismatch,
}

/// Submission event as seen by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitEvent {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl SubmitEvent {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Class names the guard looks for and applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormGuardClasses {
    pub marker: String,
    pub validated: String,
}

impl Default for FormGuardClasses {
    fn default() -> Self {
        Self {
            marker: NEEDS_VALIDATION_CLASS.to_string(),
            validated: WAS_VALIDATED_CLASS.to_string(),
        }
    }
}

/// Intercept a submission of `form`.
///
/// Unmarked forms are left alone. Marked forms always gain the validated
/// class; invalid ones also get the event cancelled.
pub fn guard_submit(page: &mut Page, form: ElementId, classes: &FormGuardClasses, event: &mut SubmitEvent) {
    let marked = page
        .class_list(form)
        .is_some_and(|list| list.contains(&classes.marker));
    if !marked {
        return;
    }

    if !check_validity(page, form) {
        event.prevent_default();
        event.stop_propagation();
    }

    if let Some(list) = page.class_list_mut(form) {
        list.add(&classes.validated);
    }
}

/// `true` when every input under `form` satisfies its constraints.
pub fn check_validity(page: &Page, form: ElementId) -> bool {
    page.descendants(form)
        .into_iter()
        .filter_map(|id| page.element(id).and_then(|element| element.input()))
        .all(|control| validity_flags(control).is_empty())
}

/// Inputs under `form` that fail validation, with their flags.
pub fn invalid_controls(page: &Page, form: ElementId) -> Vec<(ElementId, Vec<ValidityFlag>)> {
    page.descendants(form)
        .into_iter()
        .filter_map(|id| match &page.element(id)?.kind {
            ElementKind::Input(control) => {
                let flags = validity_flags(control);
                (!flags.is_empty()).then_some((id, flags))
            }
            _ => None,
        })
        .collect()
}

pub fn validity_flags(control: &InputControl) -> Vec<ValidityFlag> {
    let mut flags = Vec::new();

    if control.input_type == InputType::File {
        if control.required && control.files.is_empty() {
            flags.push(ValidityFlag::ValueMissing);
        }
        return flags;
    }

    let value = control.value.as_str();
    if value.is_empty() {
        if control.required {
            flags.push(ValidityFlag::ValueMissing);
        }
        return flags;
    }

    let char_len = value.chars().count();
    if control.min_length.is_some_and(|min| char_len < min) {
        flags.push(ValidityFlag::TooShort);
    }
    if control.max_length.is_some_and(|max| char_len > max) {
        flags.push(ValidityFlag::TooLong);
    }

    match control.input_type {
        InputType::Email if !is_valid_email(value) => flags.push(ValidityFlag::TypeMismatch),
        InputType::Url if Url::parse(value).is_err() => flags.push(ValidityFlag::TypeMismatch),
        InputType::Number => match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => {
                if control.min.is_some_and(|min| number < min) {
                    flags.push(ValidityFlag::RangeUnderflow);
                }
                if control.max.is_some_and(|max| number > max) {
                    flags.push(ValidityFlag::RangeOverflow);
                }
            }
            _ => flags.push(ValidityFlag::BadInput),
        },
        _ => {}
    }

    if let Some(pattern) = control.pattern.as_deref() {
        // Browsers ignore a pattern that does not compile.
        if let Ok(regex) = Regex::new(&format!("^(?:{pattern})$")) {
            if !regex.is_match(value) {
                flags.push(ValidityFlag::PatternMismatch);
            }
        }
    }

    flags
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}
