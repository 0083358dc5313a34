use std::time::Duration;

use jobdesk_core::indicator::{is_confirmed, revert, show_confirmation};
use jobdesk_core::{Confirmation, ElementKind, IndicatorStyle, Page};
use pretty_assertions::assert_eq;

fn classes(page: &Page, id: jobdesk_core::ElementId) -> String {
    page.class_list(id).unwrap().to_string()
}

#[test]
fn confirmation_swaps_icon_and_reversion_restores_it() {
    let style = IndicatorStyle::default();
    for icon in ["bi-cloud-arrow-up", "bi-trash", "bi-save", "bi-youtube"] {
        let mut page = Page::new();
        let el = page.create_element("i", &format!("bi {icon} fs-5"), ElementKind::Plain);

        let pending = match show_confirmation(&mut page, el, &style) {
            Confirmation::Armed(pending) => pending,
            other => panic!("expected armed confirmation, got {other:?}"),
        };
        assert_eq!(classes(&page, el), "bi bi-check-circle fs-5");
        assert_eq!(pending.restore_class, icon);
        assert_eq!(pending.delay, Duration::from_millis(5000));
        assert!(is_confirmed(&page, el, &style));

        assert!(revert(&mut page, &pending));
        assert_eq!(classes(&page, el), format!("bi {icon} fs-5"));
    }
}

#[test]
fn second_confirmation_is_a_noop() {
    let style = IndicatorStyle::default();
    let mut page = Page::new();
    let el = page.create_element("i", "bi-cloud-arrow-up", ElementKind::Plain);

    let first = show_confirmation(&mut page, el, &style);
    let snapshot = page.clone();
    let second = show_confirmation(&mut page, el, &style);

    assert!(matches!(first, Confirmation::Armed(_)));
    assert_eq!(second, Confirmation::AlreadyConfirmed);
    assert_eq!(page, snapshot);
    assert_eq!(page.class_list(el).unwrap().len(), 1);
}

#[test]
fn first_prefixed_class_wins() {
    let style = IndicatorStyle::default();
    let mut page = Page::new();
    let el = page.create_element("i", "spin bi-hourglass bi-arrow-repeat", ElementKind::Plain);

    let Confirmation::Armed(pending) = show_confirmation(&mut page, el, &style) else {
        panic!("expected armed confirmation");
    };
    assert_eq!(pending.restore_class, "bi-hourglass");
    assert_eq!(classes(&page, el), "spin bi-check-circle bi-arrow-repeat");
}

#[test]
fn element_without_icon_class_is_left_alone() {
    let style = IndicatorStyle::default();
    let mut page = Page::new();
    let el = page.create_element("span", "badge text-bg-light", ElementKind::Plain);

    assert_eq!(show_confirmation(&mut page, el, &style), Confirmation::NoIconClass);
    assert_eq!(classes(&page, el), "badge text-bg-light");
}

#[test]
fn reversion_after_external_change_does_nothing() {
    let style = IndicatorStyle::default();
    let mut page = Page::new();
    let el = page.create_element("i", "bi-trash", ElementKind::Plain);

    let Confirmation::Armed(pending) = show_confirmation(&mut page, el, &style) else {
        panic!("expected armed confirmation");
    };
    page.class_list_mut(el).unwrap().remove("bi-check-circle");

    assert!(!revert(&mut page, &pending));
    assert_eq!(classes(&page, el), "");
}

#[test]
fn custom_style_is_honoured() {
    let style = IndicatorStyle {
        icon_prefix: "fa-".into(),
        confirmed_class: "fa-check".into(),
        revert_after: Duration::from_millis(1500),
    };
    let mut page = Page::new();
    let el = page.create_element("i", "fa fa-upload", ElementKind::Plain);

    let Confirmation::Armed(pending) = show_confirmation(&mut page, el, &style) else {
        panic!("expected armed confirmation");
    };
    assert_eq!(classes(&page, el), "fa fa-check");
    assert_eq!(pending.delay, Duration::from_millis(1500));
}
