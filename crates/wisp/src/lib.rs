// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Wisp
//!
//! _Small declarative web interfaces._
//!
//! Key features:
//!
//! * Components are plain functions returning opaque [`impl View`](View) types.
//! * A builder API for HTML: [`html::div`], [`html::button`] and friends, no macros.
//! * State management with [`stateful`](state::stateful) and event handling with
//!   [`Hook::bind`](state::Hook::bind).
//! * Updates are surgical: changing an integer or a string rewrites the exact
//!   [`Text` node](https://developer.mozilla.org/en-US/docs/Web/API/Text) it was
//!   rendered to, and nothing else.
//!
//! ### Example
//!
//! ```no_run
//! use wisp::prelude::*;
//!
//! fn app() -> impl View {
//!     stateful(0_u32, |count: &Hook<u32>| {
//!         div()
//!             .child(h1().child("Counter"))
//!             .child(
//!                 button()
//!                     .on_click(count.bind(|count, _: &MouseEvent| *count += 1))
//!                     .child("Clicked ")
//!                     .child(count.get())
//!                     .child(" times"),
//!             )
//!     })
//! }
//!
//! fn main() {
//!     wisp::start(app);
//! }
//! ```
//!
//! The render closure runs on every update. Views it returns are transient
//! descriptions: [`build`](View::build) turns them into products owning real
//! DOM nodes, and subsequent renders [`update`](View::update) those products
//! in place, diffing values against memos so untouched nodes are never
//! written to.

#[cfg(all(
    target_arch = "wasm32",
    feature = "rlsf",
    not(target_feature = "atomics")
))]
#[global_allocator]
static A: rlsf::SmallGlobalTlsf = rlsf::SmallGlobalTlsf::new();

pub mod diff;
pub mod dom;
pub mod event;
pub mod html;
pub mod runtime;
pub mod state;

mod value;

pub use runtime::start;
pub use value::TextProduct;

/// The prelude module with most commonly used types.
///
/// Intended use is:
/// ```
/// use wisp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::diff::Static;
    pub use crate::event::{Event, KeyboardEvent, MouseEvent};
    pub use crate::html::{button, div, el, h1, p, span, El};
    pub use crate::runtime::Then;
    pub use crate::state::{stateful, Hook, IntoState, Signal};
    pub use crate::View;
}

use dom::Mountable;

/// Trait that describes types that can be rendered in the DOM.
pub trait View {
    /// The product owns the DOM nodes rendered from this view and
    /// any memos it needs to update them.
    type Product: Mountable;

    /// Build a product that can be mounted in the DOM from this view.
    fn build(self) -> Self::Product;

    /// Update the product and apply changes to the DOM if necessary.
    fn update(self, p: &mut Self::Product);
}

/// The empty view, rendering nothing.
impl View for () {
    type Product = ();

    fn build(self) {}

    fn update(self, _: &mut ()) {}
}

/// Pairs of views render in order. Together with the empty view this is how
/// child lists compose: [`El::child`](html::El::child) nests pairs to the
/// left, preserving document order.
impl<A, B> View for (A, B)
where
    A: View,
    B: View,
{
    type Product = (A::Product, B::Product);

    fn build(self) -> Self::Product {
        (self.0.build(), self.1.build())
    }

    fn update(self, p: &mut Self::Product) {
        self.0.update(&mut p.0);
        self.1.update(&mut p.1);
    }
}
