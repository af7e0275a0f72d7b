//! ページ内スクロール

use shiptrack_ui_common::{ScrollBehavior, ScrollSurface};
use web_sys::{Document, Element, ScrollIntoViewOptions};

pub struct DomScrollSurface {
    document: Document,
}

impl DomScrollSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn to_web_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

impl ScrollSurface for DomScrollSurface {
    type Target = Element;

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn scroll_into_view(&self, target: &Element, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(to_web_behavior(behavior));
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
