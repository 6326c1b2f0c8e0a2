// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::event::{EventCast, Listener};
use crate::runtime::{self, ShouldRender};

/// A handle to some state `S` owned by a [`stateful`](super::stateful) view.
///
/// The render closure receives a `&Hook<S>` and can read the state with
/// [`get`](Hook::get) or [`with`](Hook::with), and create event handlers
/// with [`bind`](Hook::bind).
pub struct Hook<S> {
    inner: Rc<RefCell<S>>,
}

impl<S> Hook<S> {
    pub(crate) fn new(state: S) -> Self {
        Hook {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    /// Bind a closure to a mutable reference of the state. The closure runs
    /// when the event it is attached to fires; its return value decides
    /// whether the view re-renders (see
    /// [`ShouldRender`](crate::runtime::ShouldRender) — plain `()` closures
    /// always render).
    pub fn bind<E, F, O>(&self, callback: F) -> Bound<S, E, F>
    where
        S: 'static,
        E: EventCast,
        F: Fn(&mut S, &E) -> O + 'static,
        O: ShouldRender,
    {
        Bound {
            state: self.inner.clone(),
            callback,
            _event: PhantomData,
        }
    }

    /// Get the value of state if state implements `Copy`.
    pub fn get(&self) -> S
    where
        S: Copy,
    {
        *self.inner.borrow()
    }

    /// Read the state through a shared reference.
    pub fn with<R>(&self, reader: impl FnOnce(&S) -> R) -> R {
        reader(&self.inner.borrow())
    }

    /// Create a [`Signal`] for updating this state from outside the view
    /// tree, without a DOM event.
    pub fn signal(&self) -> Signal<S> {
        Signal {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// An event handler bound to the state of a [`stateful`](super::stateful)
/// view, created with [`Hook::bind`].
pub struct Bound<S, E, F> {
    state: Rc<RefCell<S>>,
    callback: F,
    _event: PhantomData<fn(E)>,
}

impl<S, E, F, O> Listener<E> for Bound<S, E, F>
where
    S: 'static,
    E: EventCast,
    F: Fn(&mut S, &E) -> O + 'static,
    O: ShouldRender,
{
    fn handle(&self, e: &E) {
        // The state borrow is released before the render runs, so the
        // render closure can read the hook again.
        let then = {
            let mut state = self.state.borrow_mut();

            (self.callback)(&mut state, e).then()
        };

        if then.should_render() {
            runtime::update();
        }
    }
}

/// A weak handle to the state of a [`stateful`](super::stateful) view.
///
/// Unlike [`Hook`], a `Signal` can outlive its view: updates after the
/// state has been dropped are no-ops.
pub struct Signal<S> {
    inner: Weak<RefCell<S>>,
}

impl<S> Signal<S> {
    /// Update the state behind this `Signal`.
    ///
    /// ```
    /// # use wisp::prelude::*;
    /// fn example(count: Signal<i32>) {
    ///     // increment count and trigger a render
    ///     count.update(|count| *count += 1);
    ///
    ///     // increment count if less than 10, only render on change
    ///     count.update(|count| {
    ///         if *count < 10 {
    ///             *count += 1;
    ///             Then::Render
    ///         } else {
    ///             Then::Stop
    ///         }
    ///     })
    /// }
    /// ```
    pub fn update<F, O>(&self, mutator: F)
    where
        F: FnOnce(&mut S) -> O,
        O: ShouldRender,
    {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };

        let render = {
            let mut state = inner.borrow_mut();

            mutator(&mut state).should_render()
        };

        if render {
            runtime::update();
        }
    }

    /// Same as [`update`](Signal::update), but it never renders updates.
    pub fn update_silent<F>(&self, mutator: F)
    where
        F: FnOnce(&mut S),
    {
        if let Some(inner) = self.inner.upgrade() {
            mutator(&mut inner.borrow_mut());
        }
    }

    /// Replace the entire state with a new value and trigger an update.
    pub fn set(&self, val: S) {
        self.update(move |s| *s = val);
    }
}

impl<S> Clone for Signal<S> {
    fn clone(&self) -> Self {
        Signal {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Then;

    #[test]
    fn hook_reads() {
        let hook = Hook::new(42_u32);

        assert_eq!(hook.get(), 42);
        assert_eq!(hook.with(|n| n + 1), 43);
    }

    #[test]
    fn signal_updates_state() {
        let hook = Hook::new(0_u32);
        let signal = hook.signal();

        signal.update(|n| *n += 1);
        signal.update_silent(|n| *n += 1);
        signal.set(10);

        assert_eq!(hook.get(), 10);
    }

    #[test]
    fn signal_respects_then() {
        let hook = Hook::new(0_u32);
        let signal = hook.signal();

        signal.update(|n| {
            if *n < 5 {
                *n += 1;
                Then::Render
            } else {
                Then::Stop
            }
        });

        assert_eq!(hook.get(), 1);
    }

    #[test]
    fn signal_outliving_state_is_inert() {
        let signal = {
            let hook = Hook::new(String::from("gone"));
            hook.signal()
        };

        signal.update(|s| s.push('!'));
        signal.set(String::from("new"));
    }
}
