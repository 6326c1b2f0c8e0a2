// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Utilities for handling DOM events

use std::marker::PhantomData;
use std::ops::Deref;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Element, HtmlElement};

/// Types that can be cast from a raw [`web_sys::Event`] reference.
pub trait EventCast: 'static {
    #[doc(hidden)]
    fn cast(e: &web_sys::Event) -> &Self;
}

impl EventCast for web_sys::Event {
    fn cast(e: &web_sys::Event) -> &Self {
        e
    }
}

macro_rules! event {
    ($(#[doc = $doc:literal] $event:ident,)*) => {
        $(
            #[doc = concat!("Smart wrapper around a ", $doc, " which includes the type information of the event target")]
            #[repr(transparent)]
            pub struct $event<T = HtmlElement> {
                event: web_sys::$event,
                _target: PhantomData<T>,
            }

            impl<T: 'static> EventCast for $event<T> {
                fn cast(e: &web_sys::Event) -> &Self {
                    // All web-sys event types are transparent wrappers over
                    // the same JS object reference, as is this one.
                    unsafe { &*(e as *const _ as *const Self) }
                }
            }

            impl<T> Deref for $event<T> {
                type Target = web_sys::$event;

                fn deref(&self) -> &Self::Target {
                    &self.event
                }
            }

            impl<T> $event<T> {
                /// Return the element this event was dispatched to.
                ///
                /// This method shadows over the [`Event::target`](web_sys::Event::target)
                /// method provided by `web-sys` and makes it infallible.
                pub fn target(&self) -> HtmlElement {
                    self.event.target().unwrap_throw().unchecked_into()
                }

                /// Return the element this event's listener is attached to,
                /// with the type the listener was registered for.
                pub fn current_target(&self) -> T
                where
                    T: JsCast,
                {
                    self.event.current_target().unwrap_throw().unchecked_into()
                }
            }
        )*
    };
}

event! {
    /// [`web_sys::Event`](web_sys::Event)
    Event,
    /// [`web_sys::KeyboardEvent`](web_sys::KeyboardEvent)
    KeyboardEvent,
    /// [`web_sys::MouseEvent`](web_sys::MouseEvent)
    MouseEvent,
}

/// Types that can handle an event of type `E`. Implemented by plain
/// `Fn(&E)` closures and by state-bound handlers created with
/// [`Hook::bind`](crate::state::Hook::bind).
pub trait Listener<E>
where
    E: EventCast,
    Self: Sized + 'static,
{
    fn handle(&self, e: &E);
}

impl<F, E> Listener<E> for F
where
    F: Fn(&E) + 'static,
    E: EventCast,
{
    fn handle(&self, e: &E) {
        self(e)
    }
}

/// A listener slot on an element builder. Elements start out with the
/// empty slot `()`; [`El::on`](crate::html::El::on) fills it with [`On`].
pub trait Binding {
    type Handle: 'static;

    fn attach(self, el: &Element) -> Self::Handle;
}

impl Binding for () {
    type Handle = ();

    fn attach(self, _: &Element) {}
}

/// A [`Listener`] bound to a named DOM event.
pub struct On<E, L> {
    event: &'static str,
    listener: L,
    _event: PhantomData<fn(E)>,
}

impl<E, L> On<E, L>
where
    E: EventCast,
    L: Listener<E>,
{
    pub(crate) fn new(event: &'static str, listener: L) -> Self {
        On {
            event,
            listener,
            _event: PhantomData,
        }
    }
}

impl<E, L> Binding for On<E, L>
where
    E: EventCast,
    L: Listener<E>,
{
    type Handle = ListenerHandle;

    fn attach(self, el: &Element) -> ListenerHandle {
        let listener = self.listener;
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            listener.handle(E::cast(&event));
        });

        el.add_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref())
            .expect_throw("failed to attach event listener");

        ListenerHandle { _closure: closure }
    }
}

/// Keeps the JavaScript side of an attached listener alive for as long as
/// the element product holding it. Listeners are attached once, when the
/// element is first built; handlers capture only stable state handles, so
/// there is nothing to rebind on update.
pub struct ListenerHandle {
    _closure: Closure<dyn FnMut(web_sys::Event)>,
}
