use std::path::PathBuf;

use crate::{ElementId, ElementKind, InputType, Page};

/// First file selected in a file input, if any.
pub fn selected_file(page: &Page, input: ElementId) -> Option<PathBuf> {
    match &page.element(input)?.kind {
        ElementKind::Input(control) if control.input_type == InputType::File => {
            control.files.first().cloned()
        }
        _ => None,
    }
}

/// Point the preview image at a freshly read data URL.
pub fn apply_preview(page: &mut Page, target: ElementId, data_url: String) -> bool {
    page.set_image_src(target, data_url)
}
