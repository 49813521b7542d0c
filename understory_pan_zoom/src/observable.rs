// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A current value plus synchronous change notifications.
//!
//! ## Minimal example
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use understory_pan_zoom::Observable;
//!
//! let mut value = Observable::new(1.0_f64);
//! let seen = Rc::new(Cell::new(0.0));
//! let sink = seen.clone();
//! let id = value.subscribe(move |v| sink.set(*v));
//!
//! value.set(2.0);
//! assert_eq!(seen.get(), 2.0);
//!
//! assert!(value.unsubscribe(id));
//! value.set(3.0);
//! assert_eq!(seen.get(), 2.0);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Handle identifying one subscription on an [`Observable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Holds a value and notifies subscribers whenever it changes.
///
/// Writes that leave the value equal to the current one are ignored and do
/// not notify. Listeners run synchronously, in subscription order, from
/// inside [`Observable::set`].
pub struct Observable<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T: PartialEq> Observable<T> {
    /// Creates an observable holding `value` with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Stores `value` and notifies subscribers if it differs from the
    /// current value.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
        true
    }

    /// Registers `listener` to be called after every change.
    ///
    /// The listener is not called with the current value.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscription. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}
