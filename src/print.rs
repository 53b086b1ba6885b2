//! Print-ready copies of article content.
use crate::{
    error::PrintError,
    host::{HostDocument, HostElement, HostWindow},
};
use askama::Template;
use tracing::{debug, warn};

pub const ARTICLE_CONTENT_SELECTOR: &str = ".article-content";
pub const DEFAULT_TITLE: &str = "Kite Laundry Production Article";

/// A standalone HTML5 document with inlined print styling and no external resources.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "print.html")]
pub struct PrintDocument {
    title: String,
    body: String,
}

impl PrintDocument {
    /// `body` is markup and is embedded verbatim; `title` is plain text.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Opens article content in a new window and prints it.
#[derive(Debug, Clone)]
pub struct ArticlePrinter {
    selector: String,
    title: String,
}

impl Default for ArticlePrinter {
    fn default() -> Self {
        Self {
            selector: ARTICLE_CONTENT_SELECTOR.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ArticlePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builds the print document from the element matching the selector.
    pub fn collect<D: HostDocument>(&self, document: &D) -> Result<PrintDocument, PrintError> {
        let Some(content) = document.query_selector(&self.selector)? else {
            warn!(selector = %self.selector, "no article content to print");
            return Err(PrintError::ContentNotFound(self.selector.clone()));
        };

        Ok(PrintDocument::new(self.title.clone(), content.inner_html()))
    }

    /// Writes the print document into a new window and prints it once the window has loaded.
    ///
    /// Nothing is opened when the article content is missing.
    pub fn print<D: HostDocument>(&self, document: &D) -> Result<D::Window, PrintError> {
        let print_document = self.collect(document)?;

        let Some(window) = document.open_window()? else {
            warn!("print window was blocked");
            return Err(PrintError::PopupBlocked);
        };
        debug!(title = %print_document.title(), "writing print document");

        window.write(&print_document.render()?)?;
        window.close_document()?;
        window.print_on_load()?;
        Ok(window)
    }
}

/// Prints the element of `document` matching `selector` with the default title.
pub fn download_article<D: HostDocument>(
    document: &D,
    selector: &str,
) -> Result<D::Window, PrintError> {
    ArticlePrinter::new().selector(selector).print(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryDocument, MemoryElement};
    use difference::assert_diff;

    #[test]
    fn print_document_html() {
        let doc = PrintDocument::new("Tubes & Tails", "<h1>Tube</h1>\n<p>Cut one sleeve.</p>");
        let html = doc.render().unwrap();

        assert_diff!(
            html.as_str(),
            "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Tubes &amp; Tails</title>
<style>
body {
    font-family: Arial, sans-serif;
    line-height: 1.6;
    color: #333;
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
}
@media print {
    body {
        margin: 0;
        padding: 0;
    }
}
</style>
</head>
<body>
<h1>Tube</h1>
<p>Cut one sleeve.</p>
</body>
</html>",
            "\n",
            0
        );
    }

    #[test]
    fn print_article() {
        let doc = MemoryDocument::new();
        doc.insert_selector(
            ARTICLE_CONTENT_SELECTOR,
            MemoryElement::with_markup("<p>Sew the sleeve.</p>"),
        );

        let window = download_article(&doc, ARTICLE_CONTENT_SELECTOR).unwrap();

        let html = window.html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Kite Laundry Production Article</title>"));
        assert!(html.contains("<body>\n<p>Sew the sleeve.</p>\n</body>"));
        assert!(window.is_closed());

        // printing waits for the load event
        assert_eq!(window.print_count(), 0);
        window.finish_loading();
        assert_eq!(window.print_count(), 1);
    }

    #[test]
    fn missing_content_opens_nothing() {
        let doc = MemoryDocument::new();

        let err = download_article(&doc, ARTICLE_CONTENT_SELECTOR).unwrap_err();

        assert!(matches!(err, PrintError::ContentNotFound(selector) if selector == ".article-content"));
        assert!(doc.windows().is_empty());
    }

    #[test]
    fn blocked_window() {
        let doc = MemoryDocument::new();
        doc.insert_selector("#article", MemoryElement::with_markup("<p>x</p>"));
        doc.block_popups(true);

        let err = ArticlePrinter::new()
            .selector("#article")
            .title("Banner")
            .print(&doc)
            .unwrap_err();

        assert!(matches!(err, PrintError::PopupBlocked));
    }

    #[test]
    fn custom_title() {
        let doc = MemoryDocument::new();
        doc.insert_selector(ARTICLE_CONTENT_SELECTOR, MemoryElement::with_markup("<p>x</p>"));

        let print_document = ArticlePrinter::new().title("<Cone>").collect(&doc).unwrap();

        assert_eq!(print_document.title(), "<Cone>");
        let html = print_document.render().unwrap();
        assert!(html.contains("<title>&lt;Cone&gt;</title>"));
        assert!(html.contains("<body>\n<p>x</p>\n</body>"));
    }
}
