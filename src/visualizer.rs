//! Pattern schematics mounted into a page container.
use crate::{
    color::CANVAS_BORDER,
    error::VisualizerError,
    host::{HostDocument, HostElement},
    layout::{LayoutConfig, LayoutEngine, PatternLayoutEngine},
    mir::{self, Stroke},
    pattern::Pattern,
    renderer::{Renderer, SVGRenderer},
};
use tracing::debug;

const CANVAS_BORDER_WIDTH: f64 = 1.0;

/// Renders a pattern as an SVG canvas inside a container element.
///
/// The container's previous content is replaced on every render.
#[derive(Debug)]
pub struct PatternVisualizer<E: HostElement> {
    container: E,
    engine: PatternLayoutEngine,
    drawing: mir::Document,
}

impl<E: HostElement> PatternVisualizer<E> {
    /// Looks up `container_id` in `document` and renders `pattern` into it.
    pub fn new<D>(document: &D, container_id: &str, pattern: &Pattern) -> Result<Self, VisualizerError>
    where
        D: HostDocument<Element = E>,
    {
        Self::with_config(document, container_id, pattern, LayoutConfig::default())
    }

    pub fn with_config<D>(
        document: &D,
        container_id: &str,
        pattern: &Pattern,
        config: LayoutConfig,
    ) -> Result<Self, VisualizerError>
    where
        D: HostDocument<Element = E>,
    {
        config.validate()?;
        let container = document
            .element_by_id(container_id)
            .ok_or_else(|| VisualizerError::ContainerNotFound(container_id.to_string()))?;

        let engine = PatternLayoutEngine::new(config);
        let (drawing, svg) = prepare(&engine, pattern)?;
        mount(&container, &svg)?;

        Ok(Self {
            container,
            engine,
            drawing,
        })
    }

    /// Replaces the container content with a fresh drawing of `pattern`.
    ///
    /// The container is left untouched when the pattern cannot be drawn.
    pub fn render(&mut self, pattern: &Pattern) -> Result<(), VisualizerError> {
        let (drawing, svg) = prepare(&self.engine, pattern)?;
        mount(&self.container, &svg)?;

        self.drawing = drawing;
        Ok(())
    }

    pub fn container(&self) -> &E {
        &self.container
    }

    /// The drawing produced by the last render.
    pub fn drawing(&self) -> &mir::Document {
        &self.drawing
    }
}

fn prepare(
    engine: &PatternLayoutEngine,
    pattern: &Pattern,
) -> Result<(mir::Document, String), VisualizerError> {
    debug!(pieces = pattern.pieces().len(), "rendering pattern");

    let drawing = draw_pattern(engine, pattern)?;
    let svg = SVGRenderer::new().render_to_string(&drawing)?;
    Ok((drawing, svg))
}

fn mount(container: &impl HostElement, svg: &str) -> Result<(), VisualizerError> {
    container.clear_children();
    container.append_markup(svg)?;
    Ok(())
}

/// Lays out `pattern` on a bordered canvas sized by `engine`.
pub fn draw_pattern(
    engine: &impl LayoutEngine,
    pattern: &Pattern,
) -> Result<mir::Document, VisualizerError> {
    let mut drawing = mir::Document::new(engine.canvas_size())
        .with_border(Stroke::new(CANVAS_BORDER, CANVAS_BORDER_WIDTH));

    engine.draw_pattern(pattern, &mut drawing)?;
    Ok(drawing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ConfigError,
        host::memory::{MemoryDocument, MemoryElement},
        pattern::{Piece, Position},
    };

    fn pattern(n: usize) -> Pattern {
        let pieces = (0..n)
            .map(|i| Piece::new(200.0, 100.0, Position::new(0.0, i as f64 * 10.0)))
            .collect();
        Pattern::new(pieces).unwrap()
    }

    #[test]
    fn mount_into_container() {
        let doc = MemoryDocument::new();
        let container = doc.insert_element("preview", MemoryElement::with_markup("<p>loading</p>"));

        let visualizer = PatternVisualizer::new(&doc, "preview", &pattern(3)).unwrap();

        assert_eq!(container.child_count(), 1);
        let html = container.inner_html();
        assert!(html.starts_with("<svg height=\"600\""));
        assert!(!html.contains("loading"));
        assert_eq!(visualizer.drawing().rects().count(), 3);
    }

    #[test]
    fn render_replaces_content() {
        let doc = MemoryDocument::new();
        let container = doc.insert_element("preview", MemoryElement::new());

        let mut visualizer = PatternVisualizer::new(&doc, "preview", &pattern(2)).unwrap();
        let first = container.child_count();

        visualizer.render(&pattern(4)).unwrap();

        assert_eq!(container.child_count(), first);
        assert_eq!(visualizer.drawing().rects().count(), 4);
        assert_eq!(container.inner_html().matches("<svg").count(), 1);
        assert_eq!(container.inner_html().matches("Reinforcement").count(), 3);
    }

    #[test]
    fn missing_container() {
        let doc = MemoryDocument::new();
        let err = PatternVisualizer::new(&doc, "nowhere", &pattern(1)).unwrap_err();

        assert!(matches!(err, VisualizerError::ContainerNotFound(id) if id == "nowhere"));
    }

    #[test]
    fn alternate_canvas() {
        let doc = MemoryDocument::new();
        let container = doc.insert_element("preview", MemoryElement::new());
        let config = LayoutConfig {
            canvas_width: 400.0,
            canvas_height: 300.0,
            ..LayoutConfig::default()
        };

        PatternVisualizer::with_config(&doc, "preview", &pattern(1), config).unwrap();

        assert!(container.inner_html().contains("viewBox=\"0 0 400 300\""));
    }

    #[test]
    fn invalid_config_keeps_content() {
        let doc = MemoryDocument::new();
        let container = doc.insert_element("preview", MemoryElement::with_markup("<p>loading</p>"));
        let config = LayoutConfig {
            scale: f64::NAN,
            ..LayoutConfig::default()
        };

        let err = PatternVisualizer::with_config(&doc, "preview", &pattern(2), config).unwrap_err();

        assert!(matches!(err, VisualizerError::Config(ConfigError::InvalidScale(_))));
        assert_eq!(container.inner_html(), "<p>loading</p>");
    }

    #[test]
    fn drawing_matches_mounted_svg() {
        let doc = MemoryDocument::new();
        let container = doc.insert_element("preview", MemoryElement::new());

        let mut visualizer = PatternVisualizer::new(&doc, "preview", &pattern(1)).unwrap();
        assert_eq!(visualizer.drawing().border(), Some(&Stroke::new(CANVAS_BORDER, 1.0)));
        assert_eq!(visualizer.drawing().rects().count(), 1);

        visualizer.render(&pattern(3)).unwrap();
        let svg = SVGRenderer::new().render_to_string(visualizer.drawing()).unwrap();
        assert_eq!(container.inner_html(), svg);
    }
}
