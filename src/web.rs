//! Browser bindings built on `web-sys`.
use crate::{
    error::HostError,
    host::{HostDocument, HostElement, HostWindow},
    pattern::Pattern,
    print::{self, ARTICLE_CONTENT_SELECTOR},
    visualizer::PatternVisualizer,
};
use js_sys::Array;
use wasm_bindgen::{prelude::*, JsCast};

fn host_error(value: JsValue) -> HostError {
    HostError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn js_error(err: impl std::error::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[derive(Debug, Clone)]
pub struct WebDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// The document of the current global window.
    pub fn current() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or_else(|| HostError("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| HostError("window has no document".into()))?;

        Ok(Self { window, document })
    }
}

impl HostDocument for WebDocument {
    type Element = WebElement;
    type Window = WebWindow;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn query_selector(&self, selector: &str) -> Result<Option<WebElement>, HostError> {
        let element = self.document.query_selector(selector).map_err(host_error)?;
        Ok(element.map(WebElement))
    }

    fn open_window(&self) -> Result<Option<WebWindow>, HostError> {
        let window = self
            .window
            .open_with_url_and_target("", "_blank")
            .map_err(host_error)?;
        Ok(window.map(WebWindow))
    }
}

#[derive(Debug, Clone)]
pub struct WebElement(web_sys::Element);

impl HostElement for WebElement {
    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn clear_children(&self) {
        self.0.set_inner_html("");
    }

    fn append_markup(&self, markup: &str) -> Result<(), HostError> {
        self.0
            .insert_adjacent_html("beforeend", markup)
            .map_err(host_error)
    }

    fn child_count(&self) -> usize {
        self.0.child_element_count() as usize
    }
}

#[derive(Debug, Clone)]
pub struct WebWindow(web_sys::Window);

impl WebWindow {
    fn document(&self) -> Result<web_sys::Document, HostError> {
        self.0
            .document()
            .ok_or_else(|| HostError("print window has no document".into()))
    }
}

impl HostWindow for WebWindow {
    fn write(&self, html: &str) -> Result<(), HostError> {
        let text = Array::of1(&JsValue::from_str(html));
        self.document()?.write(&text).map_err(host_error)
    }

    fn close_document(&self) -> Result<(), HostError> {
        self.document()?.close().map_err(host_error)
    }

    fn print_on_load(&self) -> Result<(), HostError> {
        let window = self.0.clone();
        let onload = Closure::once_into_js(move || {
            if let Err(err) = window.print() {
                web_sys::console::error_1(&err);
            }
        });

        self.0.set_onload(Some(onload.unchecked_ref()));
        Ok(())
    }
}

/// Prints the page's article content.
#[wasm_bindgen(js_name = downloadArticle)]
pub fn download_article() -> Result<(), JsValue> {
    let document = WebDocument::current().map_err(js_error)?;
    print::download_article(&document, ARTICLE_CONTENT_SELECTOR).map_err(js_error)?;
    Ok(())
}

/// Renders a JSON pattern description into the element with id `container_id`.
#[wasm_bindgen(js_name = renderPattern)]
pub fn render_pattern(container_id: &str, pattern_json: &str) -> Result<(), JsValue> {
    let document = WebDocument::current().map_err(js_error)?;
    let pattern = Pattern::from_json(pattern_json).map_err(js_error)?;

    PatternVisualizer::new(&document, container_id, &pattern).map_err(js_error)?;
    Ok(())
}
