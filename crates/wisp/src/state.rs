// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Utilities for building stateful views
//!
//! Simple views are rebuilt from scratch by their parents and have no way
//! to change on their own. To make an app interactive the [`stateful`]
//! function creates a view that owns some mutable state: event handlers
//! bound to it with [`Hook::bind`] can mutate that state and have the view
//! re-rendered.

use crate::dom::Mountable;
use crate::View;

mod hook;
mod into_state;

pub use hook::{Bound, Hook, Signal};
pub use into_state::IntoState;

/// Create a stateful [`View`] over some mutable state. The state
/// needs to be created using the [`IntoState`] trait.
///
/// ```
/// # use wisp::prelude::*;
/// // `IntoState` is implemented for primitive values
/// let int_view = stateful(0_i32, |count: &Hook<i32>| "TODO");
///
/// // Any other state can be created with an initializer closure...
/// let string_view = stateful(|| String::from("foo"), |text: &Hook<String>| "TODO");
///
/// // ...or a function with no parameters
/// let vec_view = stateful(Vec::<i32>::new, |counts: &Hook<Vec<i32>>| "TODO");
/// ```
///
/// The render closure runs on the initial build and on every subsequent
/// update. The view it returns captures state by value (see
/// [`Hook::get`]); it cannot borrow from the hook.
pub fn stateful<S, F, V>(state: S, render: F) -> Stateful<S, F>
where
    S: IntoState,
    F: Fn(&Hook<S::State>) -> V,
    V: View,
{
    Stateful { state, render }
}

pub struct Stateful<S, F> {
    state: S,
    render: F,
}

pub struct StatefulProduct<S, P> {
    hook: Hook<S>,
    product: P,
}

impl<S, F, V> View for Stateful<S, F>
where
    S: IntoState,
    F: Fn(&Hook<S::State>) -> V,
    V: View,
{
    type Product = StatefulProduct<S::State, V::Product>;

    fn build(self) -> Self::Product {
        let hook = Hook::new(self.state.init());
        let product = (self.render)(&hook).build();

        StatefulProduct { hook, product }
    }

    fn update(self, p: &mut Self::Product) {
        (self.render)(&p.hook).update(&mut p.product)
    }
}

impl<S, P> Mountable for StatefulProduct<S, P>
where
    S: 'static,
    P: Mountable,
{
    fn mount(&self, parent: &web_sys::Node) {
        self.product.mount(parent);
    }

    fn unmount(&self) {
        self.product.unmount();
    }
}
