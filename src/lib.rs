mod accessor;
mod controller;
mod fetch;
mod graph;
mod settings;
mod source;
mod timing;

pub mod events;

pub use self::accessor::{
    EdgeId, GraphAccessor, GraphIngest, IngestError, IngestOptions, NodeId, NodeObject,
};
pub use self::controller::{Collaborators, InteractionController};
pub use self::events::{
    CanvasEventKind, ClickKind, EventHub, EventSink, Intent, Pointer, PointerEvent,
};
pub use self::fetch::{ChainError, FetchClient, FetchError, Spawner};
pub use self::graph::{CanvasGraph, CanvasNode, DEFAULT_NODE_RADIUS};
pub use self::settings::{SettingsController, INFERRED_RELATIONSHIP_TYPE};
pub use self::source::{CanvasCallback, CanvasCallbacks, CanvasEventSource};
pub use self::timing::{
    ClickTimer, Clock, InstantClock, ManualClock, Scheduler, TimerQueue, DOUBLE_CLICK_THRESHOLD,
};
