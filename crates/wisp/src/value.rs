// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use web_sys::{Node, Text};

use crate::diff::Diff;
use crate::dom::{self, Mountable};
use crate::View;

/// Product of a value rendered to a single [`Text`](web_sys::Text) node.
pub struct TextProduct<M> {
    memo: M,
    node: Text,
}

impl<M> Mountable for TextProduct<M>
where
    M: 'static,
{
    fn mount(&self, parent: &Node) {
        dom::append(parent, &self.node);
    }

    fn unmount(&self) {
        dom::remove(&self.node);
    }
}

impl View for &'static str {
    type Product = TextProduct<&'static str>;

    fn build(self) -> Self::Product {
        TextProduct {
            memo: self.into_memo(),
            node: dom::create_text(self),
        }
    }

    fn update(self, p: &mut Self::Product) {
        if self.diff(&mut p.memo) {
            p.node.set_data(self);
        }
    }
}

impl View for bool {
    type Product = TextProduct<bool>;

    fn build(self) -> Self::Product {
        TextProduct {
            memo: self.into_memo(),
            node: dom::create_text(bool_str(self)),
        }
    }

    fn update(self, p: &mut Self::Product) {
        if self.diff(&mut p.memo) {
            p.node.set_data(bool_str(self));
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

macro_rules! int_views {
    ($($ty:ty),*) => {
        $(
            impl View for $ty {
                type Product = TextProduct<$ty>;

                fn build(self) -> Self::Product {
                    let mut buf = itoa::Buffer::new();

                    TextProduct {
                        memo: self.into_memo(),
                        node: dom::create_text(buf.format(self)),
                    }
                }

                fn update(self, p: &mut Self::Product) {
                    if self.diff(&mut p.memo) {
                        let mut buf = itoa::Buffer::new();

                        p.node.set_data(buf.format(self));
                    }
                }
            }
        )*
    };
}

int_views!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
