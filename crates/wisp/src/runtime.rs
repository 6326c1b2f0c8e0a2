// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::{Cell, RefCell};

use wasm_bindgen::UnwrapThrowExt;

use crate::dom::{self, Mountable};
use crate::View;

/// Describes whether or not a component should be rendered after a state
/// change. For uses see:
///
/// * [`Hook::bind`](crate::state::Hook::bind)
/// * [`Signal::update`](crate::state::Signal::update)
pub trait ShouldRender: 'static {
    fn should_render(self) -> bool;

    fn then(self) -> Then;
}

/// Closures without return type always update their view.
impl ShouldRender for () {
    fn should_render(self) -> bool {
        true
    }

    fn then(self) -> Then {
        Then::Render
    }
}

/// An enum that implements the [`ShouldRender`](ShouldRender) trait.
pub enum Then {
    /// This is a silent update
    Stop,
    /// Render the view after this update
    Render,
}

impl ShouldRender for Then {
    fn should_render(self) -> bool {
        match self {
            Then::Stop => false,
            Then::Render => true,
        }
    }

    fn then(self) -> Then {
        self
    }
}

thread_local! {
    static INIT: Cell<bool> = const { Cell::new(false) };

    static RUNTIME: RefCell<Option<Box<dyn FnMut()>>> = const { RefCell::new(None) };
}

/// Start the app by mounting the given root component in the document
/// `body`. Subsequent calls are no-ops: there is one runtime per page.
pub fn start<F, V>(render: F)
where
    F: Fn() -> V + 'static,
    V: View,
{
    if INIT.get() {
        return;
    }
    INIT.set(true);

    init_panic_hook();

    let mut product = render().build();

    let body = dom::document().body().expect_throw("document has no body");
    product.mount(&body);

    RUNTIME.with(|runtime| {
        *runtime.borrow_mut() = Some(Box::new(move || render().update(&mut product)));
    });
}

/// Re-render the mounted root component.
///
/// The runtime slot is emptied for the duration of the render, so a state
/// change triggered from within a render (a cyclical update) finds no
/// runtime and is silently dropped rather than recursing.
pub(crate) fn update() {
    let taken = RUNTIME.with(|runtime| runtime.borrow_mut().take());

    if let Some(mut render) = taken {
        render();

        RUNTIME.with(|runtime| *runtime.borrow_mut() = Some(render));
    }
}

fn init_panic_hook() {
    // Only enable console hook on debug builds
    #[cfg(debug_assertions)]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_always_renders() {
        assert!(().should_render());
        assert!(matches!(().then(), Then::Render));
    }

    #[test]
    fn then_maps_to_itself() {
        assert!(Then::Render.should_render());
        assert!(!Then::Stop.should_render());
        assert!(matches!(Then::Stop.then(), Then::Stop));
    }

    #[test]
    fn update_without_a_mounted_root_is_inert() {
        update();
        update();
    }
}
