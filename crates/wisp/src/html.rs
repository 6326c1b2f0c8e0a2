// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builders for HTML element views.
//!
//! ```no_run
//! use wisp::html::{div, h1};
//! use wisp::View;
//!
//! fn header() -> impl View {
//!     div().class("masthead").child(h1().child("Hello!"))
//! }
//! ```

use wasm_bindgen::UnwrapThrowExt;
use web_sys::{Element, Node};

use crate::dom::{self, Mountable};
use crate::event::{Binding, EventCast, Listener, MouseEvent, On};
use crate::View;

/// An element view under construction.
///
/// Children accumulate in `C` as left-nested view pairs; at most one
/// listener occupies `L`. Classes and attributes are applied when the
/// element is first built and never touched again — dynamic content
/// belongs in child text views.
pub struct El<C = (), L = ()> {
    tag: &'static str,
    class: Option<&'static str>,
    attrs: Vec<(&'static str, String)>,
    listener: L,
    children: C,
}

/// Create a builder for an arbitrary element.
pub const fn el(tag: &'static str) -> El {
    El {
        tag,
        class: None,
        attrs: Vec::new(),
        listener: (),
        children: (),
    }
}

macro_rules! tags {
    ($($tag:ident),*) => {
        $(
            #[doc = concat!("Create a builder for a `<", stringify!($tag), ">` element.")]
            pub const fn $tag() -> El {
                el(stringify!($tag))
            }
        )*
    };
}

tags!(button, div, h1, p, span);

impl<C, L> El<C, L>
where
    C: View,
{
    /// Set the `class` attribute.
    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Append a child view: another element, or anything rendering to text.
    pub fn child<V>(self, view: V) -> El<(C, V), L>
    where
        V: View,
    {
        El {
            tag: self.tag,
            class: self.class,
            attrs: self.attrs,
            listener: self.listener,
            children: (self.children, view),
        }
    }
}

impl<C> El<C, ()>
where
    C: View,
{
    /// Attach a listener for the named DOM event.
    pub fn on<E, L>(self, event: &'static str, listener: L) -> El<C, On<E, L>>
    where
        E: EventCast,
        L: Listener<E>,
    {
        El {
            tag: self.tag,
            class: self.class,
            attrs: self.attrs,
            listener: On::new(event, listener),
            children: self.children,
        }
    }

    /// Attach a listener for the `click` event.
    pub fn on_click<L>(self, listener: L) -> El<C, On<MouseEvent, L>>
    where
        L: Listener<MouseEvent>,
    {
        self.on("click", listener)
    }
}

pub struct ElProduct<C, H> {
    el: Element,
    children: C,
    _listener: H,
}

impl<C, L> View for El<C, L>
where
    C: View,
    L: Binding,
{
    type Product = ElProduct<C::Product, L::Handle>;

    fn build(self) -> Self::Product {
        let el = dom::create_element(self.tag);

        if let Some(class) = self.class {
            el.set_class_name(class);
        }

        for (name, value) in &self.attrs {
            el.set_attribute(name, value)
                .expect_throw("invalid attribute name");
        }

        let children = self.children.build();
        children.mount(&el);

        let listener = self.listener.attach(&el);

        ElProduct {
            el,
            children,
            _listener: listener,
        }
    }

    fn update(self, p: &mut Self::Product) {
        self.children.update(&mut p.children);
    }
}

impl<C, H> Mountable for ElProduct<C, H>
where
    C: Mountable,
    H: 'static,
{
    fn mount(&self, parent: &Node) {
        dom::append(parent, &self.el);
    }

    fn unmount(&self) {
        self.el.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_metadata() {
        let el = el("nav").class("top").attr("id", "main-nav");

        assert_eq!(el.tag, "nav");
        assert_eq!(el.class, Some("top"));
        assert_eq!(el.attrs, [("id", String::from("main-nav"))]);
    }

    #[test]
    fn children_nest_in_document_order() {
        let el = div().child("a").child("b").child("c");

        let ((((), a), b), c) = el.children;

        assert_eq!([a, b, c], ["a", "b", "c"]);
    }

    #[test]
    fn tag_shorthands() {
        assert_eq!(button().tag, "button");
        assert_eq!(h1().tag, "h1");
        assert_eq!(p().tag, "p");
        assert_eq!(span().tag, "span");
    }
}
