//! Signature canvas state machine
//!
//! This module connects:
//! - Pointer input (mouse and touch adapters over one coordinate mapping)
//! - The renderer (segment rasterization behind [`StrokeRenderer`])
//! - Stroke retention (for per-stroke undo)
//! - Capture (PNG data URI encoding on save)
//!
//! States: `Blank` → `Drawing` on pointer-down, `Drawing` → `IdleDirty` on
//! pointer-up or leave, `IdleDirty` → `Drawing` for further strokes and
//! `IdleDirty` → `Blank` on clear. Save is only accepted from `IdleDirty`.

mod input;
mod stroke;
mod surface_ops;
mod undo;

use guestbook_config::{ConfigError, SignatureConfig};

use crate::layout::CanvasLayout;
use crate::pen::PenStyle;
use crate::renderer::{SoftwareRenderer, StrokeRenderer};
use crate::stroke::Stroke;
use crate::transform::CoordinateMapper;

/// Capture lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasState {
    /// Nothing committed; initial state and the state after clear
    #[default]
    Blank,
    /// Pointer held, a stroke is being appended to
    Drawing,
    /// At least one stroke committed, pointer up
    IdleDirty,
}

/// Freehand signature canvas over a renderer
///
/// A canvas built with [`SignatureCanvas::detached`] has no drawing surface;
/// every operation on it is a no-op and save yields nothing.
pub struct SignatureCanvas<R: StrokeRenderer = SoftwareRenderer> {
    pub(crate) config: SignatureConfig,
    pub(crate) layout: CanvasLayout,
    pub(crate) mapper: CoordinateMapper,
    /// None when the environment offers no drawing surface
    pub(crate) renderer: Option<R>,
    pub(crate) state: CanvasState,
    /// Stroke in progress (Some only while Drawing)
    pub(crate) active: Option<Stroke>,
    /// Committed strokes in drawing order
    pub(crate) strokes: Vec<Stroke>,
    pub(crate) next_stroke_id: u64,
}

impl SignatureCanvas<SoftwareRenderer> {
    /// Create a canvas backed by the software rasterizer at the initial layout
    pub fn new(config: SignatureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = CanvasLayout::initial(&config);
        let (width, height) = layout.physical_size(config.density_multiplier);
        let pen = PenStyle::new(config.buffer_stroke_width(), config.stroke_color);
        let renderer = SoftwareRenderer::new(width, height, pen, config.background_color);
        Self::with_renderer(config, renderer)
    }
}

impl<R: StrokeRenderer> SignatureCanvas<R> {
    /// Create a canvas over an existing renderer, reinitialized to the initial layout
    ///
    /// The configuration is validated before any buffer is allocated.
    pub fn with_renderer(config: SignatureConfig, mut renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = CanvasLayout::initial(&config);
        let (width, height) = layout.physical_size(config.density_multiplier);
        if renderer.size() != (width, height) {
            renderer.reinitialize(width, height);
        } else {
            renderer.clear();
        }
        Ok(Self::build(config, layout, Some(renderer)))
    }

    /// Create a canvas with no drawing surface
    pub fn detached(config: SignatureConfig) -> Self {
        let layout = CanvasLayout::initial(&config);
        Self::build(config, layout, None)
    }

    fn build(config: SignatureConfig, layout: CanvasLayout, renderer: Option<R>) -> Self {
        let mapper = CoordinateMapper::new(layout, config.density_multiplier);
        Self {
            config,
            layout,
            mapper,
            renderer,
            state: CanvasState::Blank,
            active: None,
            strokes: Vec::new(),
            next_stroke_id: 0,
        }
    }

    pub fn state(&self) -> CanvasState {
        self.state
    }

    /// True while nothing has been drawn since the last clear or resize
    pub fn is_empty(&self) -> bool {
        self.state == CanvasState::Blank
    }

    pub fn is_drawing(&self) -> bool {
        self.state == CanvasState::Drawing
    }

    /// Whether a save would currently produce a result
    pub fn can_save(&self) -> bool {
        self.state == CanvasState::IdleDirty && self.renderer.is_some()
    }

    /// Number of committed strokes
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn layout(&self) -> CanvasLayout {
        self.layout
    }

    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    /// The drawing surface, if the environment provided one
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn has_surface(&self) -> bool {
        self.renderer.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_canvas_creation() {
        let canvas = canvas();
        assert_eq!(canvas.state(), CanvasState::Blank);
        assert!(canvas.is_empty());
        assert!(!canvas.can_save());
        assert_eq!(canvas.layout(), CanvasLayout::new(800, 400));
        assert_eq!(canvas.renderer().map(|r| r.size()), Some((1600, 800)));
        assert!(canvas.renderer().unwrap().surface().is_uniform(WHITE));
    }

    #[test]
    fn test_with_renderer_reinitializes() {
        let pen = PenStyle::new(6.0, BLACK);
        let mut renderer = SoftwareRenderer::new(10, 10, pen, WHITE);
        renderer.begin_stroke(guestbook_ipc::Point::new(5.0, 5.0));

        let canvas = SignatureCanvas::with_renderer(SignatureConfig::default(), renderer).unwrap();
        let surface = canvas.renderer().unwrap().surface();
        assert_eq!((surface.width, surface.height), (1600, 800));
        assert!(surface.is_uniform(WHITE));
    }

    #[test]
    fn test_density_multiplier_is_explicit() {
        let config = SignatureConfig {
            density_multiplier: 3.0,
            ..Default::default()
        };
        let canvas = SignatureCanvas::new(config).unwrap();
        assert_eq!(canvas.mapper().density, 3.0);
        assert_eq!(canvas.renderer().unwrap().size(), (2400, 1200));
        assert_eq!(canvas.renderer().unwrap().pen().width, 9.0);
    }

    #[test]
    fn test_invalid_config_allocates_nothing() {
        let config = SignatureConfig {
            density_multiplier: 1e6,
            ..Default::default()
        };
        assert!(matches!(
            SignatureCanvas::new(config),
            Err(ConfigError::InvalidDensity(_))
        ));

        let config = SignatureConfig {
            density_multiplier: 0.0,
            ..Default::default()
        };
        assert!(SignatureCanvas::new(config).is_err());

        let pen = PenStyle::new(6.0, BLACK);
        let renderer = SoftwareRenderer::new(4, 4, pen, WHITE);
        let config = SignatureConfig {
            max_width: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            SignatureCanvas::with_renderer(config, renderer),
            Err(ConfigError::BufferTooLarge { .. })
        ));
    }
}
