use std::cell::RefCell;
use std::rc::Rc;

use super::intent::Intent;

/// Receiver of intents emitted by the controller.
///
/// Implemented for closures `Fn(Intent)`, [`crossbeam::channel::Sender<Intent>`]
/// and [`EventHub`]. Delivery is fire-and-forget: a sink never reports back.
pub trait EventSink {
    fn send(&self, intent: Intent);
}

impl<F> EventSink for F
where
    F: Fn(Intent),
{
    fn send(&self, intent: Intent) {
        self(intent);
    }
}

impl EventSink for crossbeam::channel::Sender<Intent> {
    fn send(&self, intent: Intent) {
        // receiver gone means nobody listens anymore
        if let Err(err) = crossbeam::channel::Sender::send(self, intent) {
            log::debug!("dropping intent {}: receiver disconnected", err.0.name());
        }
    }
}

type Subscriber = Rc<dyn Fn(&Intent)>;

/// Application bus. Subscribers run synchronously in registration order.
///
/// A subscriber added while an intent is being emitted only sees later intents.
#[derive(Default)]
pub struct EventHub {
    subscribers: RefCell<Vec<Subscriber>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, f: impl Fn(&Intent) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(f));
    }

    /// Subscribes only to intents published under `name`.
    pub fn on(&self, name: &'static str, f: impl Fn(&Intent) + 'static) {
        self.subscribe(move |intent| {
            if intent.name() == name {
                f(intent);
            }
        });
    }

    pub fn emit(&self, intent: &Intent) {
        log::trace!("emit {}", intent.name());
        // snapshot so subscribers may subscribe while handling
        let subscribers = self.subscribers.borrow().clone();
        for s in subscribers {
            s(intent);
        }
    }

    pub fn subscribers_num(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl EventSink for EventHub {
    fn send(&self, intent: Intent) {
        self.emit(&intent);
    }
}
