// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mounting products in the DOM.

use wasm_bindgen::UnwrapThrowExt;
use web_sys::{Document, Element, Node, Text};

/// Types that hold rendered DOM nodes.
///
/// A product may consist of any number of nodes (element products hold one,
/// pair products hold the nodes of both halves), so mounting and unmounting
/// are expressed against a parent rather than as a single node handle.
pub trait Mountable: 'static {
    /// Append every node of this product to `parent`, in document order.
    fn mount(&self, parent: &Node);

    /// Detach every node of this product from its parent.
    fn unmount(&self);
}

impl Mountable for () {
    fn mount(&self, _: &Node) {}

    fn unmount(&self) {}
}

impl<A, B> Mountable for (A, B)
where
    A: Mountable,
    B: Mountable,
{
    fn mount(&self, parent: &Node) {
        self.0.mount(parent);
        self.1.mount(parent);
    }

    fn unmount(&self) {
        self.0.unmount();
        self.1.unmount();
    }
}

pub(crate) fn document() -> Document {
    web_sys::window()
        .expect_throw("no window")
        .document()
        .expect_throw("window has no document")
}

pub(crate) fn create_element(tag: &str) -> Element {
    document()
        .create_element(tag)
        .expect_throw("invalid element tag")
}

pub(crate) fn create_text(data: &str) -> Text {
    document().create_text_node(data)
}

pub(crate) fn append(parent: &Node, child: &Node) {
    parent.append_child(child).expect_throw("failed to append node");
}

pub(crate) fn remove(node: &Node) {
    if let Some(parent) = node.parent_node() {
        let _ = parent.remove_child(node);
    }
}
