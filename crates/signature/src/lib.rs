//! Guest book signature capture engine
//!
//! This crate provides the freehand signature pipeline used by the guest form:
//! - [`surface`] - CPU RGBA8 raster initialized to opaque white
//! - [`pen`] - Round-capped segment rasterization
//! - [`stroke`] - Append-only point sequences in buffer space
//! - [`renderer`] - The narrow [`StrokeRenderer`] seam and its software implementation
//! - [`transform`] - Viewport to buffer coordinate mapping
//! - [`layout`] - Canvas sizing for a container width
//! - [`canvas`] - The capture state machine
//! - [`dialog`] - Modal dialog and form field around the canvas
//! - [`encode`] - PNG data URI encoding and decoding

pub mod canvas;
pub mod dialog;
pub mod encode;
pub mod layout;
pub mod pen;
pub mod renderer;
pub mod stroke;
pub mod surface;
pub mod transform;

pub use canvas::{CanvasState, SignatureCanvas};
pub use dialog::{ResizeHub, ResizeSubscription, SignatureCallback, SignatureDialog, SignatureField};
pub use encode::{
    CaptureResult, DecodedSignature, EncodeError, data_uri_to_png, decode_data_uri, decode_png,
    encode_capture, encode_data_uri, encode_png, png_to_data_uri,
};
pub use layout::CanvasLayout;
pub use pen::PenStyle;
pub use renderer::{SoftwareRenderer, StrokeRenderer};
pub use stroke::Stroke;
pub use surface::CpuSurface;
pub use transform::CoordinateMapper;
pub use guestbook_config::{ConfigError, SignatureConfig};
