//! State management for widgetboard.
//!
//! State follows the Elm Architecture: `State + Message → State`. A [`Store`]
//! owns one state value, applies messages to it and notifies subscribers
//! after every message that changed something.
//!
//! # Examples
//!
//! ```
//! use widgetboard_core::{State, Store, Transition};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum CounterMessage {
//!     Increment,
//!     Reset,
//! }
//!
//! impl State for Counter {
//!     type Message = CounterMessage;
//!
//!     fn update(&mut self, msg: Self::Message) -> Transition {
//!         match msg {
//!             CounterMessage::Increment => self.count += 1,
//!             CounterMessage::Reset if self.count == 0 => return Transition::Unchanged,
//!             CounterMessage::Reset => self.count = 0,
//!         }
//!         Transition::Changed
//!     }
//! }
//!
//! let mut store = Store::new(Counter::default());
//! store.dispatch(CounterMessage::Increment);
//! assert_eq!(store.state().count, 1);
//! ```

use serde::{Deserialize, Serialize};

/// Application state trait.
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync {
    /// Message type for state updates
    type Message: Send;

    /// Apply a message.
    ///
    /// Must either apply the whole change or leave state untouched.
    fn update(&mut self, msg: Self::Message) -> Transition;
}

/// Outcome of applying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; subscribers are notified
    Changed,
    /// Message was a no-op
    Unchanged,
}

impl Transition {
    /// Whether the state changed.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Type alias for state change subscribers.
type Subscriber<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Store manages a state value and its subscribers.
pub struct Store<S: State> {
    state: S,
    subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
    next_subscription: u64,
}

impl<S: State> Store<S> {
    /// Create a new store with initial state.
    pub const fn new(initial: S) -> Self {
        Self {
            state: initial,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Get current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Dispatch a message to update state.
    pub fn dispatch(&mut self, msg: S::Message) -> Transition {
        let transition = self.state.update(msg);
        if transition.is_changed() {
            self.notify_subscribers();
        }
        transition
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify_subscribers(&self) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl<S: State + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
