//! Self-reverting status icon.
//!
//! An indicator element carries exactly one icon class (for example
//! `bi-cloud-arrow-up`). Confirming swaps it for the confirmed class and
//! hands back a [`PendingReversion`] that the caller schedules; reverting
//! swaps the recorded class back.
use std::time::Duration;

use crate::{ElementId, Page};

pub const DEFAULT_ICON_PREFIX: &str = "bi-";
pub const DEFAULT_CONFIRMED_CLASS: &str = "bi-check-circle";
pub const DEFAULT_REVERT_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorStyle {
    pub icon_prefix: String,
    pub confirmed_class: String,
    pub revert_after: Duration,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            icon_prefix: DEFAULT_ICON_PREFIX.to_string(),
            confirmed_class: DEFAULT_CONFIRMED_CLASS.to_string(),
            revert_after: DEFAULT_REVERT_AFTER,
        }
    }
}

/// A confirmed indicator waiting to get its previous icon back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReversion {
    pub element: ElementId,
    pub restore_class: String,
    pub confirmed_class: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// The icon was swapped; schedule the reversion.
    Armed(PendingReversion),
    /// The element already shows the confirmed class. Nothing changed.
    AlreadyConfirmed,
    /// The element is missing or has no icon-prefixed class. Nothing changed.
    NoIconClass,
}

/// Swap the element's icon for the confirmed class.
pub fn show_confirmation(page: &mut Page, element: ElementId, style: &IndicatorStyle) -> Confirmation {
    let Some(classes) = page.class_list_mut(element) else {
        return Confirmation::NoIconClass;
    };
    if classes.contains(&style.confirmed_class) {
        return Confirmation::AlreadyConfirmed;
    }
    let Some(previous) = classes.first_with_prefix(&style.icon_prefix).map(ToOwned::to_owned) else {
        return Confirmation::NoIconClass;
    };
    classes.replace(&previous, &style.confirmed_class);
    Confirmation::Armed(PendingReversion {
        element,
        restore_class: previous,
        confirmed_class: style.confirmed_class.clone(),
        delay: style.revert_after,
    })
}

/// Put the recorded icon back. Returns `false` if the confirmed class is gone.
pub fn revert(page: &mut Page, pending: &PendingReversion) -> bool {
    page.class_list_mut(pending.element)
        .map(|classes| classes.replace(&pending.confirmed_class, &pending.restore_class))
        .unwrap_or(false)
}

pub fn is_confirmed(page: &Page, element: ElementId, style: &IndicatorStyle) -> bool {
    page.class_list(element)
        .map(|classes| classes.contains(&style.confirmed_class))
        .unwrap_or(false)
}
