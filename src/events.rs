//! Minimal observer list, used by hosts to request a re-resolve when input arrives.

/// Handle returned by [`Event::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// An ordered list of handlers called with `&T` on every trigger.
pub struct Event<T> {
    next_id: u64,
    handlers: Vec<(HandlerId, Box<dyn FnMut(&T)>)>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Appends `handler`; handlers run in subscription order.
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn trigger(&mut self, data: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(data);
        }
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Event").field("handlers", &self.handlers.len()).finish()
    }
}
