//! Minimal named-topic publish/subscribe emitter.
//!
//! Handlers run synchronously, in subscription order, on the thread that
//! emits. Handlers must not call back into the emitter's owner; they should
//! write to shared state the owner reads afterwards.

use rustc_hash::FxHashMap;

type Handler<T> = Box<dyn FnMut(&T)>;

/// Token returned by [`Emitter::on`]; pass it to [`Emitter::off`] to
/// unsubscribe.
#[derive(Debug)]
pub struct Subscription {
    topic: String,
    id: u64,
}

impl Subscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

pub struct Emitter<T> {
    topics: FxHashMap<String, Vec<(u64, Handler<T>)>>,
    next_id: u64,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self {
            topics: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub fn on(&mut self, topic: impl Into<String>, handler: impl FnMut(&T) + 'static) -> Subscription {
        let topic = topic.into();
        let id = self.next_id;
        self.next_id += 1;
        self.topics
            .entry(topic.clone())
            .or_default()
            .push((id, Box::new(handler)));
        Subscription { topic, id }
    }

    pub fn off(&mut self, subscription: Subscription) {
        if let Some(handlers) = self.topics.get_mut(&subscription.topic) {
            handlers.retain(|(id, _)| *id != subscription.id);
            if handlers.is_empty() {
                self.topics.remove(&subscription.topic);
            }
        }
    }

    pub fn emit(&mut self, topic: &str, payload: &T) {
        if let Some(handlers) = self.topics.get_mut(topic) {
            for (_, handler) in handlers.iter_mut() {
                handler(payload);
            }
        }
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("topics", &self.topics.len())
            .finish()
    }
}
