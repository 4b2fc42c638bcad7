use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::{debug, error, info, trace, warn};

use crate::accessor::{GraphAccessor, GraphIngest, IngestOptions, NodeId, NodeObject};
use crate::events::{CanvasEventKind, ClickKind, EventSink, Intent, PointerEvent};
use crate::fetch::{ChainError, FetchClient, Spawner};
use crate::settings::SettingsController;
use crate::source::CanvasEventSource;
use crate::timing::{ClickTimer, Clock, Scheduler, DOUBLE_CLICK_THRESHOLD};

/// Everything the controller talks to besides the graph itself.
pub struct Collaborators {
    pub ingest: Rc<dyn GraphIngest>,
    pub fetch: Rc<dyn FetchClient>,
    pub bus: Rc<dyn EventSink>,
    pub clock: Rc<dyn Clock>,
    pub scheduler: Rc<dyn Scheduler>,
    pub spawner: Rc<dyn Spawner>,
}

struct Inner<G> {
    graph: Rc<RefCell<G>>,
    deps: Collaborators,
    settings: SettingsController,
    click_timer: ClickTimer,
}

/// Turns canvas pointer events into intents, fetches and graph changes.
///
/// The controller is a cheap handle: clones share the same state, so it can be
/// captured by canvas callbacks and by its own delayed click checks. It runs
/// entirely on the thread delivering canvas events.
///
/// A tap is only handled as a click once [`DOUBLE_CLICK_THRESHOLD`] has passed
/// without a double click, so the first half of a double click never opens the
/// node panel.
pub struct InteractionController<G: GraphAccessor> {
    inner: Rc<Inner<G>>,
}

impl<G: GraphAccessor> Clone for InteractionController<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<G: GraphAccessor + 'static> InteractionController<G> {
    pub fn new(graph: Rc<RefCell<G>>, deps: Collaborators) -> Self {
        Self::with_settings(graph, deps, SettingsController::default())
    }

    pub fn with_settings(
        graph: Rc<RefCell<G>>,
        deps: Collaborators,
        settings: SettingsController,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                graph,
                deps,
                settings,
                click_timer: ClickTimer::default(),
            }),
        }
    }

    /// Subscribes the controller to every event kind the canvas raises.
    pub fn register_canvas_events(&self, source: &mut impl CanvasEventSource) {
        for kind in CanvasEventKind::ALL {
            let this = self.clone();
            source.set_callback_on_event(kind, Box::new(move |e| this.handle(kind, e)));
        }
    }

    pub fn handle(&self, kind: CanvasEventKind, event: &PointerEvent) {
        trace!("canvas event {} on {:?}", kind.as_str(), event.nodes);
        match kind {
            CanvasEventKind::Click => self.on_click(event),
            CanvasEventKind::DoubleClick => self.on_double_click(event),
            CanvasEventKind::Context => self.on_context(event),
            CanvasEventKind::Hold => self.on_hold(event),
            CanvasEventKind::HoverNode => self.on_hover(event),
            CanvasEventKind::BlurNode => self.on_blur(),
            CanvasEventKind::DragStart => self.on_drag_start(event),
        }
    }

    pub fn on_click(&self, event: &PointerEvent) {
        self.emit(Intent::CloseContext);
        self.emit(Intent::CloseTooltip);

        let tapped_at = self.inner.deps.clock.now();
        // a later check would compare against the same or a newer double click
        if !self.inner.click_timer.is_single_click(tapped_at) {
            debug!("tap at {tapped_at:?} is part of a double click");
            return;
        }

        // the scheduler is owned by the controller, so hold it weakly
        let weak: Weak<Inner<G>> = Rc::downgrade(&self.inner);
        let event = event.clone();
        self.inner.deps.scheduler.schedule(
            DOUBLE_CLICK_THRESHOLD,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    debug!("tap at {tapped_at:?} outlived its controller");
                    return;
                };
                let this = Self { inner };
                if this.inner.click_timer.is_single_click(tapped_at) {
                    this.on_single_click(&event);
                } else {
                    debug!("tap at {tapped_at:?} suppressed by double click");
                }
            }),
        );
    }

    fn on_single_click(&self, event: &PointerEvent) {
        // long press is answered by hold
        if event.kind != ClickKind::Tap {
            debug!("ignoring {:?} click", event.kind);
            return;
        }

        let node = event.node();
        self.inner
            .graph
            .borrow_mut()
            .check_selection_rectangle(node, event.modifiers, event);

        let Some(id) = node else {
            return;
        };
        let Some(obj) = self.resolve(id) else {
            return;
        };

        if event.shift() {
            self.explore(&obj);
        } else {
            self.emit(Intent::ShowNodePanel(obj));
        }
    }

    pub fn on_double_click(&self, event: &PointerEvent) {
        self.inner
            .click_timer
            .record_double_click(self.inner.deps.clock.now());

        let Some(id) = event.node() else {
            return;
        };
        let Some(obj) = self.resolve(id) else {
            return;
        };

        if !event.shift() {
            self.expand(&obj);
            return;
        }

        if obj.base_type == self.inner.settings.inferred_relationship_type {
            debug!("not exploring inferred relationship {}", obj.id);
            return;
        }
        self.explore(&obj);
    }

    pub fn on_context(&self, event: &PointerEvent) {
        if event.node().is_none() || !event.shift() {
            return;
        }

        let mut g = self.inner.graph.borrow_mut();
        for id in &event.nodes {
            g.delete_node(id);
        }
    }

    pub fn on_hold(&self, event: &PointerEvent) {
        self.inner.graph.borrow_mut().unselect_all();

        let found = self.inner.graph.borrow().node_at(event.pointer.canvas);
        let Some(id) = found else {
            return;
        };

        let (properties, node_type) = {
            let g = self.inner.graph.borrow();
            (g.node_properties(&id), g.node_type(&id))
        };
        self.emit(Intent::ShowLabelPanel {
            properties,
            node_type,
            id,
        });
    }

    pub fn on_hover(&self, event: &PointerEvent) {
        self.emit(Intent::HoverNode(event.clone()));
    }

    pub fn on_blur(&self) {
        self.emit(Intent::BlurNode);
    }

    pub fn on_drag_start(&self, event: &PointerEvent) {
        self.inner.graph.borrow_mut().set_dragging_node(true);
        self.emit(Intent::CloseTooltip);

        if !event.ctrl() {
            self.inner.graph.borrow_mut().release_nodes(&event.nodes);
            return;
        }

        let mut g = self.inner.graph.borrow_mut();
        let group = neighbourhood(&*g, &event.nodes);
        g.select_nodes(&group);
        g.release_nodes(&group);
    }

    /// Fetches the neighborhood of `node` and merges it with layout and selection.
    /// Nodes without an explore locator are left alone.
    pub fn explore(&self, node: &NodeObject) {
        let Some(url) = node.explore.as_deref() else {
            debug!("node {} cannot be explored", node.id);
            return;
        };

        info!("exploring {} via {url}", node.id);
        let response = self.inner.deps.fetch.request(url);
        let ingest = Rc::clone(&self.inner.deps.ingest);
        let origin = node.id.clone();

        self.spawn_chain(
            async move {
                let resp = response.await?;
                ingest.on_graph_response(resp, IngestOptions::EXPLORE, &origin)?;
                Ok::<_, ChainError>(())
            }
            .boxed_local(),
        );
    }

    fn expand(&self, node: &NodeObject) {
        let Some(url) = node.href.as_deref() else {
            debug!("node {} has no href", node.id);
            return;
        };

        info!("fetching {} via {url}", node.id);
        let response = self.inner.deps.fetch.request(url);
        let ingest = Rc::clone(&self.inner.deps.ingest);
        let origin = node.id.clone();

        self.spawn_chain(
            async move {
                let resp = response.await?;
                let instances = ingest.on_graph_response(resp, IngestOptions::EXPAND, &origin)?;
                ingest.load_instances_attributes(0, instances).await?;
                Ok::<_, ChainError>(())
            }
            .boxed_local(),
        );
    }

    fn spawn_chain(&self, chain: LocalBoxFuture<'static, Result<(), ChainError>>) {
        let bus = Rc::clone(&self.inner.deps.bus);
        let task = async move {
            if let Err(err) = chain.await {
                warn!("fetch chain failed: {err}");
                bus.send(Intent::ErrorMessage(err.to_string()));
            }
        };

        if let Err(err) = self.inner.deps.spawner.spawn_local(task.boxed_local()) {
            error!("failed to spawn fetch chain: {err}");
        }
    }

    fn resolve(&self, id: &NodeId) -> Option<NodeObject> {
        let obj = self.inner.graph.borrow().node(id);
        if obj.is_none() {
            debug!("node {id} is gone from the graph");
        }
        obj
    }

    fn emit(&self, intent: Intent) {
        self.inner.deps.bus.send(intent);
    }

    pub fn graph(&self) -> Rc<RefCell<G>> {
        Rc::clone(&self.inner.graph)
    }

    pub fn settings(&self) -> &SettingsController {
        &self.inner.settings
    }

    pub fn last_double_click_at(&self) -> Option<Duration> {
        self.inner.click_timer.last_double_click_at()
    }

    /// Forgets the last double click. Pending click checks are not cancelled.
    pub fn reset(&self) {
        self.inner.click_timer.reset();
    }
}

/// Dragged nodes together with their one-hop neighbors, without duplicates.
fn neighbourhood<G: GraphAccessor + ?Sized>(g: &G, dragged: &[NodeId]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut group = Vec::new();
    for id in dragged {
        for n in g.connected_nodes(id).into_iter().chain([id.clone()]) {
            if seen.insert(n.clone()) {
                group.push(n);
            }
        }
    }
    group
}
