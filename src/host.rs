//! Page abstractions
//!
//! The printer and the visualizer only reach the page through these traits. Handles follow DOM
//! semantics: they are cheap to clone, share the underlying node and mutate through `&self`.
use crate::error::HostError;

pub trait HostDocument {
    type Element: HostElement;
    type Window: HostWindow;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Returns the first element matching a CSS `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, HostError>;

    /// Opens a new top-level browsing context.
    ///
    /// Returns `Ok(None)` when the platform refuses to open it (e.g. a popup blocker).
    fn open_window(&self) -> Result<Option<Self::Window>, HostError>;
}

pub trait HostElement {
    fn inner_html(&self) -> String;

    fn clear_children(&self);

    /// Parses `markup` and appends the resulting nodes as the last children.
    fn append_markup(&self, markup: &str) -> Result<(), HostError>;

    fn child_count(&self) -> usize;
}

pub trait HostWindow {
    /// Writes `html` into the window's document stream.
    fn write(&self, html: &str) -> Result<(), HostError>;

    /// Finishes the document stream started by [`HostWindow::write`].
    fn close_document(&self) -> Result<(), HostError>;

    /// Opens the print dialog once, after the window has finished loading.
    fn print_on_load(&self) -> Result<(), HostError>;
}

pub mod memory {
    //! In-memory page, for tests and headless use.
    use super::{HostDocument, HostElement, HostWindow};
    use crate::error::HostError;
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    #[derive(Debug, Default)]
    struct DocumentState {
        elements: HashMap<String, MemoryElement>,
        selectors: HashMap<String, MemoryElement>,
        block_popups: bool,
        windows: Vec<MemoryWindow>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct MemoryDocument {
        state: Rc<RefCell<DocumentState>>,
    }

    impl MemoryDocument {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers `element` under `id` and returns a handle to it.
        pub fn insert_element(&self, id: &str, element: MemoryElement) -> MemoryElement {
            self.state
                .borrow_mut()
                .elements
                .insert(id.to_string(), element.clone());
            element
        }

        /// Makes `element` the match for `selector`. Selectors are compared verbatim.
        pub fn insert_selector(&self, selector: &str, element: MemoryElement) -> MemoryElement {
            self.state
                .borrow_mut()
                .selectors
                .insert(selector.to_string(), element.clone());
            element
        }

        pub fn block_popups(&self, blocked: bool) {
            self.state.borrow_mut().block_popups = blocked;
        }

        /// Windows opened so far, oldest first.
        pub fn windows(&self) -> Vec<MemoryWindow> {
            self.state.borrow().windows.clone()
        }
    }

    impl HostDocument for MemoryDocument {
        type Element = MemoryElement;
        type Window = MemoryWindow;

        fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
            self.state.borrow().elements.get(id).cloned()
        }

        fn query_selector(&self, selector: &str) -> Result<Option<MemoryElement>, HostError> {
            Ok(self.state.borrow().selectors.get(selector).cloned())
        }

        fn open_window(&self) -> Result<Option<MemoryWindow>, HostError> {
            let mut state = self.state.borrow_mut();
            if state.block_popups {
                return Ok(None);
            }

            let window = MemoryWindow::default();
            state.windows.push(window.clone());
            Ok(Some(window))
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct MemoryElement {
        children: Rc<RefCell<Vec<String>>>,
    }

    impl MemoryElement {
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates an element whose content is a single child.
        pub fn with_markup(markup: &str) -> Self {
            let element = Self::new();
            element.children.borrow_mut().push(markup.to_string());
            element
        }
    }

    impl HostElement for MemoryElement {
        fn inner_html(&self) -> String {
            self.children.borrow().concat()
        }

        fn clear_children(&self) {
            self.children.borrow_mut().clear();
        }

        fn append_markup(&self, markup: &str) -> Result<(), HostError> {
            self.children.borrow_mut().push(markup.to_string());
            Ok(())
        }

        fn child_count(&self) -> usize {
            self.children.borrow().len()
        }
    }

    #[derive(Debug, Default)]
    struct WindowState {
        html: String,
        closed: bool,
        loaded: bool,
        print_pending: bool,
        print_count: usize,
    }

    #[derive(Debug, Clone, Default)]
    pub struct MemoryWindow {
        state: Rc<RefCell<WindowState>>,
    }

    impl MemoryWindow {
        /// Everything written to the document so far.
        pub fn html(&self) -> String {
            self.state.borrow().html.clone()
        }

        pub fn is_closed(&self) -> bool {
            self.state.borrow().closed
        }

        pub fn print_count(&self) -> usize {
            self.state.borrow().print_count
        }

        /// Fires the load event. Has no effect until the document is closed.
        pub fn finish_loading(&self) {
            let mut state = self.state.borrow_mut();
            if !state.closed || state.loaded {
                return;
            }

            state.loaded = true;
            if state.print_pending {
                state.print_pending = false;
                state.print_count += 1;
            }
        }
    }

    impl HostWindow for MemoryWindow {
        fn write(&self, html: &str) -> Result<(), HostError> {
            let mut state = self.state.borrow_mut();
            if state.closed {
                return Err(HostError("document stream is closed".into()));
            }
            state.html.push_str(html);
            Ok(())
        }

        fn close_document(&self) -> Result<(), HostError> {
            self.state.borrow_mut().closed = true;
            Ok(())
        }

        fn print_on_load(&self) -> Result<(), HostError> {
            let mut state = self.state.borrow_mut();
            if state.loaded {
                // the load event has already fired
                return Ok(());
            }
            state.print_pending = true;
            Ok(())
        }
    }
}
