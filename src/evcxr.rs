//! Evcxr extension
use crate::{
    error::VisualizerError,
    layout::{LayoutConfig, PatternLayoutEngine},
    pattern::Pattern,
    renderer::{Renderer, SVGRenderer},
    visualizer,
};

/// See https://github.com/google/evcxr/blob/main/evcxr_jupyter/README.md#custom-output
pub trait CustomDisplay {
    fn evcxr_display(&self);
}

pub struct SVGOutput {
    svg: String,
}

impl SVGOutput {
    pub fn new(svg: String) -> Self {
        Self { svg }
    }

    fn content_block(&self) -> String {
        format!(
            "EVCXR_BEGIN_CONTENT image/svg+xml\n{}\nEVCXR_END_CONTENT",
            self.svg
        )
    }
}

impl CustomDisplay for SVGOutput {
    fn evcxr_display(&self) {
        println!("{}", self.content_block());
    }
}

pub fn draw_pattern(
    pattern: &Pattern,
    config: LayoutConfig,
) -> Result<impl CustomDisplay, VisualizerError> {
    config.validate()?;
    let engine = PatternLayoutEngine::new(config);
    let drawing = visualizer::draw_pattern(&engine, pattern)?;
    let svg = SVGRenderer::new().render_to_string(&drawing)?;

    Ok(SVGOutput::new(svg))
}
