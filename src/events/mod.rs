mod canvas;
mod intent;
mod sink;

pub use canvas::{CanvasEventKind, ClickKind, Pointer, PointerEvent};
pub use intent::Intent;
pub use sink::{EventHub, EventSink};
