use std::collections::HashMap;

use crate::events::{CanvasEventKind, PointerEvent};

pub type CanvasCallback = Box<dyn Fn(&PointerEvent)>;

/// Canvas widget side of the wiring: accepts one callback per event kind.
pub trait CanvasEventSource {
    /// Registers `callback` for `kind`, replacing a previously registered one.
    fn set_callback_on_event(&mut self, kind: CanvasEventKind, callback: CanvasCallback);
}

/// Callback table a canvas widget raises its events through.
#[derive(Default)]
pub struct CanvasCallbacks {
    callbacks: HashMap<CanvasEventKind, CanvasCallback>,
}

impl CanvasCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the callback registered for `kind`. Returns false if there is none.
    pub fn raise(&self, kind: CanvasEventKind, event: &PointerEvent) -> bool {
        match self.callbacks.get(&kind) {
            Some(cb) => {
                cb(event);
                true
            }
            None => false,
        }
    }

    /// Same as [`CanvasCallbacks::raise`] for widgets that report events by name.
    pub fn raise_named(&self, name: &str, event: &PointerEvent) -> bool {
        match CanvasEventKind::from_name(name) {
            Some(kind) => self.raise(kind, event),
            None => {
                log::debug!("no canvas event named {name}");
                false
            }
        }
    }

    pub fn is_registered(&self, kind: CanvasEventKind) -> bool {
        self.callbacks.contains_key(&kind)
    }
}

impl CanvasEventSource for CanvasCallbacks {
    fn set_callback_on_event(&mut self, kind: CanvasEventKind, callback: CanvasCallback) {
        self.callbacks.insert(kind, callback);
    }
}
