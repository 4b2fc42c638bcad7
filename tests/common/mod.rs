#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use canvas_intents::{
    CanvasGraph, Collaborators, EventHub, FetchClient, FetchError, GraphIngest, IngestError,
    IngestOptions, Intent, InteractionController, ManualClock, NodeId, NodeObject, TimerQueue,
};
use egui::Pos2;
use futures::executor::LocalPool;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use serde_json::Value;

pub fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

/// Answers with canned responses and remembers every requested url.
#[derive(Default)]
pub struct FakeFetch {
    pub requests: RefCell<Vec<String>>,
    responses: RefCell<HashMap<String, Result<Value, FetchError>>>,
}

impl FakeFetch {
    pub fn respond(&self, url: &str, resp: Result<Value, FetchError>) {
        self.responses.borrow_mut().insert(url.to_string(), resp);
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl FetchClient for FakeFetch {
    fn request(&self, url: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        self.requests.borrow_mut().push(url.to_string());
        let resp = self
            .responses
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or(Ok(Value::Null));
        future::ready(resp).boxed_local()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestCall {
    pub response: Value,
    pub options: IngestOptions,
    pub origin: NodeId,
}

/// Records merges. Instances come from the `instances` array of the response.
#[derive(Default)]
pub struct FakeIngest {
    pub calls: RefCell<Vec<IngestCall>>,
    pub attribute_loads: Rc<RefCell<Vec<(usize, Vec<NodeId>)>>>,
    pub fail_ingest: RefCell<Option<IngestError>>,
    pub fail_attributes: RefCell<Option<IngestError>>,
}

impl GraphIngest for FakeIngest {
    fn on_graph_response(
        &self,
        response: Value,
        options: IngestOptions,
        origin: &NodeId,
    ) -> Result<Vec<NodeId>, IngestError> {
        self.calls.borrow_mut().push(IngestCall {
            response: response.clone(),
            options,
            origin: origin.clone(),
        });
        if let Some(err) = self.fail_ingest.borrow().clone() {
            return Err(err);
        }

        let instances = response
            .get("instances")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).map(NodeId::from).collect())
            .unwrap_or_default();
        Ok(instances)
    }

    fn load_instances_attributes(
        &self,
        start: usize,
        instances: Vec<NodeId>,
    ) -> LocalBoxFuture<'static, Result<(), IngestError>> {
        let loads = Rc::clone(&self.attribute_loads);
        let fail = self.fail_attributes.borrow().clone();
        async move {
            loads.borrow_mut().push((start, instances));
            match fail {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
        .boxed_local()
    }
}

pub struct Harness {
    pub controller: InteractionController<CanvasGraph>,
    pub graph: Rc<RefCell<CanvasGraph>>,
    pub clock: Rc<ManualClock>,
    pub timers: Rc<TimerQueue>,
    pub pool: LocalPool,
    pub fetch: Rc<FakeFetch>,
    pub ingest: Rc<FakeIngest>,
    pub hub: Rc<EventHub>,
    pub intents: Rc<RefCell<Vec<Intent>>>,
}

impl Harness {
    pub fn new(graph: CanvasGraph) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let graph = Rc::new(RefCell::new(graph));
        let clock = Rc::new(ManualClock::new());
        let timers = Rc::new(TimerQueue::new(clock.clone()));
        let pool = LocalPool::new();
        let fetch = Rc::new(FakeFetch::default());
        let ingest = Rc::new(FakeIngest::default());
        let hub = Rc::new(EventHub::new());

        let intents = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&intents);
        hub.subscribe(move |intent| sink.borrow_mut().push(intent.clone()));

        let controller = InteractionController::new(
            Rc::clone(&graph),
            Collaborators {
                ingest: ingest.clone(),
                fetch: fetch.clone(),
                bus: hub.clone(),
                clock: clock.clone(),
                scheduler: timers.clone(),
                spawner: Rc::new(pool.spawner()),
            },
        );

        Self {
            controller,
            graph,
            clock,
            timers,
            pool,
            fetch,
            ingest,
            hub,
            intents,
        }
    }

    /// Fresh wiring to the same fakes, for a second controller.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            ingest: self.ingest.clone(),
            fetch: self.fetch.clone(),
            bus: self.hub.clone(),
            clock: self.clock.clone(),
            scheduler: self.timers.clone(),
            spawner: Rc::new(self.pool.spawner()),
        }
    }

    /// Moves virtual time, fires due click checks and drives fetch chains.
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
        self.timers.run_due();
        self.pool.run_until_stalled();
    }

    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.intents.borrow().iter().map(Intent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.names().into_iter().filter(|n| *n == name).count()
    }

    pub fn clear(&self) {
        self.intents.borrow_mut().clear();
    }

    pub fn errors(&self) -> Vec<String> {
        self.intents
            .borrow()
            .iter()
            .filter_map(|i| match i {
                Intent::ErrorMessage(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn node_panels(&self) -> Vec<NodeId> {
        self.intents
            .borrow()
            .iter()
            .filter_map(|i| match i {
                Intent::ShowNodePanel(n) => Some(n.id.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Two people, a company without explore locator and an inferred relationship
/// connecting the people.
pub fn knowledge_graph() -> CanvasGraph {
    let mut g = CanvasGraph::new();
    g.add_node(
        NodeObject::new("alice", "person")
            .with_label("Alice")
            .with_href("/kb/concept/alice")
            .with_explore("/kb/explore/alice")
            .with_property("name", "Alice")
            .with_property("age", "31"),
        Pos2::new(0., 0.),
    );
    g.add_node(
        NodeObject::new("bob", "person")
            .with_href("/kb/concept/bob")
            .with_explore("/kb/explore/bob"),
        Pos2::new(50., 0.),
    );
    g.add_node(
        NodeObject::new("acme", "company").with_href("/kb/concept/acme"),
        Pos2::new(100., 0.),
    );
    g.add_node(
        NodeObject::new("knows", "inferred-relationship")
            .with_href("/kb/concept/knows")
            .with_explore("/kb/explore/knows"),
        Pos2::new(25., 40.),
    );
    g.add_edge(&id("knows"), &id("alice"));
    g.add_edge(&id("knows"), &id("bob"));
    g.add_edge(&id("bob"), &id("acme"));
    g
}
