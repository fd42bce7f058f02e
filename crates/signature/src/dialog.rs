//! Signature dialog and the form field that hosts it
//!
//! The dialog owns a canvas and, while open, a resize subscription on the
//! host's [`ResizeHub`]. The field owns the saved capture and the single
//! change callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use guestbook_ipc::{InputEvent, ViewportRect};
use tracing::{debug, info};

use crate::canvas::SignatureCanvas;
use crate::encode::CaptureResult;
use crate::renderer::{SoftwareRenderer, StrokeRenderer};

/// Change callback: `Some(data_uri)` after a save, `None` after the form clears it
pub type SignatureCallback = Box<dyn FnMut(Option<&str>)>;

type PendingWidth = Cell<Option<f32>>;

/// Container resize notifications on the UI thread
///
/// The host calls [`ResizeHub::notify`] with each new container width; every
/// live subscription keeps the latest width until its owner polls it.
#[derive(Debug, Clone, Default)]
pub struct ResizeHub {
    listeners: Rc<RefCell<Vec<Weak<PendingWidth>>>>,
}

impl ResizeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stops receiving widths when the guard drops
    pub fn subscribe(&self) -> ResizeSubscription {
        let pending = Rc::new(Cell::new(None));
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.strong_count() > 0);
        listeners.push(Rc::downgrade(&pending));
        ResizeSubscription { pending }
    }

    /// Deliver a container width to every live subscription
    pub fn notify(&self, container_width: f32) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.strong_count() > 0);
        for pending in listeners.iter().filter_map(Weak::upgrade) {
            pending.set(Some(container_width));
        }
        listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }
}

/// Live resize registration, released on drop
#[derive(Debug)]
pub struct ResizeSubscription {
    pending: Rc<PendingWidth>,
}

impl ResizeSubscription {
    /// Latest width delivered since the last call, if any
    pub fn take_pending(&self) -> Option<f32> {
        self.pending.take()
    }
}

/// Modal capture dialog around a [`SignatureCanvas`]
pub struct SignatureDialog<R: StrokeRenderer = SoftwareRenderer> {
    canvas: SignatureCanvas<R>,
    subscription: Option<ResizeSubscription>,
}

impl<R: StrokeRenderer> SignatureDialog<R> {
    pub fn new(canvas: SignatureCanvas<R>) -> Self {
        Self {
            canvas,
            subscription: None,
        }
    }

    /// Open and lay the canvas out for the container
    ///
    /// Opening an already open dialog does nothing.
    pub fn open(&mut self, hub: &ResizeHub, container_width: f32) {
        if self.is_open() {
            return;
        }
        self.subscription = Some(hub.subscribe());
        self.canvas.resize(container_width);
        info!("Signature dialog opened");
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    /// Container resized; only acts while the dialog is open
    pub fn on_container_resize(&mut self, container_width: f32) {
        if !self.is_open() {
            debug!("Resize while closed, ignoring");
            return;
        }
        self.canvas.resize(container_width);
    }

    /// Apply the latest width delivered by the hub, if any
    pub fn poll_resize(&mut self) -> bool {
        let Some(width) = self.subscription.as_ref().and_then(ResizeSubscription::take_pending)
        else {
            return false;
        };
        self.on_container_resize(width);
        true
    }

    /// Route a pointer event to the canvas while open
    pub fn handle_input(&mut self, event: &InputEvent, rect: ViewportRect) {
        if self.is_open() {
            self.canvas.handle_input(event, rect);
        }
    }

    /// Reset the drawing surface; the saved signature is untouched
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    pub fn undo(&mut self) -> bool {
        self.canvas.undo_last_stroke()
    }

    /// Whether the save control is enabled
    pub fn can_save(&self) -> bool {
        self.is_open() && self.canvas.can_save()
    }

    /// Capture the signature and close on success
    pub fn save(&mut self) -> Option<CaptureResult> {
        if !self.is_open() {
            return None;
        }
        let capture = self.canvas.save()?;
        self.close();
        Some(capture)
    }

    /// Close without saving; releases the resize subscription
    pub fn close(&mut self) {
        if self.subscription.take().is_some() {
            info!("Signature dialog closed");
        }
    }

    pub fn canvas(&self) -> &SignatureCanvas<R> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut SignatureCanvas<R> {
        &mut self.canvas
    }
}

/// Form-side holder of the saved signature
pub struct SignatureField<R: StrokeRenderer = SoftwareRenderer> {
    dialog: SignatureDialog<R>,
    saved: Option<CaptureResult>,
    on_signature_change: Option<SignatureCallback>,
}

impl<R: StrokeRenderer> SignatureField<R> {
    pub fn new(dialog: SignatureDialog<R>) -> Self {
        Self {
            dialog,
            saved: None,
            on_signature_change: None,
        }
    }

    pub fn with_callback(mut self, callback: SignatureCallback) -> Self {
        self.on_signature_change = Some(callback);
        self
    }

    pub fn dialog(&self) -> &SignatureDialog<R> {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut SignatureDialog<R> {
        &mut self.dialog
    }

    /// Save from the dialog; fires the callback once with the data URI
    pub fn save_from_dialog(&mut self) -> bool {
        let Some(capture) = self.dialog.save() else {
            return false;
        };
        if let Some(callback) = self.on_signature_change.as_mut() {
            callback(Some(&capture.data_uri));
        }
        self.saved = Some(capture);
        true
    }

    /// Remove the saved signature from the form; fires the callback with None
    pub fn clear_saved(&mut self) {
        if self.saved.take().is_none() {
            return;
        }
        if let Some(callback) = self.on_signature_change.as_mut() {
            callback(None);
        }
    }

    /// Data URI to submit, kept until cleared so a failed submit can be retried
    pub fn signature_data(&self) -> Option<&str> {
        self.saved.as_ref().map(|c| c.data_uri.as_str())
    }

    pub fn has_signature(&self) -> bool {
        self.saved.is_some()
    }
}
