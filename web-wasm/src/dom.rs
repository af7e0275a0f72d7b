//! DOM要素へのバインディング
//!
//! `document.getElementById` で毎回引き直す。

use shiptrack_ui_common::{BarElement, ContainerElement, ElementLookup, Visibility};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// スタイルと本文を書き換えるHTML要素
#[derive(Clone)]
pub struct DomElement(HtmlElement);

impl DomElement {
    pub fn element(&self) -> &HtmlElement {
        &self.0
    }

    fn set_style(&self, property: &str, value: &str) {
        // 書き込み失敗（読み取り専用の宣言ブロック等）は無視する
        let _ = self.0.style().set_property(property, value);
    }
}

impl BarElement for DomElement {
    fn set_width(&self, percentage: u8) {
        self.set_style("width", &format!("{}%", percentage));
    }

    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }
}

impl ContainerElement for DomElement {
    fn set_visibility(&self, visibility: Visibility) {
        self.set_style("display", visibility.display_value());
    }
}

/// 現在のドキュメントから要素を引く
#[derive(Clone)]
pub struct DomLookup {
    document: Document,
}

impl DomLookup {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// `window.document` が無い環境（Worker等）では `None`
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn html_element(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(DomElement)
    }
}

impl ElementLookup for DomLookup {
    type Bar = DomElement;
    type Container = DomElement;

    fn bar(&self, id: &str) -> Option<DomElement> {
        self.html_element(id)
    }

    fn container(&self, id: &str) -> Option<DomElement> {
        self.html_element(id)
    }
}
