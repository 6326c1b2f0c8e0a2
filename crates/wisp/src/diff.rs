// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controlling when rendered values touch the DOM.

use crate::View;

/// Values that can be diffed against a memo kept from the previous render.
///
/// [`diff`](Diff::diff) must update the memo when it reports a change, so
/// that a value only ever writes to the DOM once per change.
pub trait Diff: Copy {
    type Memo: 'static;

    fn into_memo(self) -> Self::Memo;

    fn diff(self, memo: &mut Self::Memo) -> bool;
}

macro_rules! diff_copy {
    ($($ty:ty),*) => {
        $(
            impl Diff for $ty {
                type Memo = $ty;

                fn into_memo(self) -> $ty {
                    self
                }

                fn diff(self, memo: &mut $ty) -> bool {
                    if self != *memo {
                        *memo = self;
                        true
                    } else {
                        false
                    }
                }
            }
        )*
    };
}

diff_copy!(bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Diff for &'static str {
    type Memo = &'static str;

    fn into_memo(self) -> Self::Memo {
        self
    }

    fn diff(self, memo: &mut Self::Memo) -> bool {
        // Fast path: string literals render from fixed addresses, so a
        // pointer match means no change without walking the bytes.
        if std::ptr::eq(self, *memo) || self == *memo {
            false
        } else {
            *memo = self;
            true
        }
    }
}

/// Wrapper that never updates its inner view in the DOM after the initial
/// render. Updates of a `Static` subtree are skipped entirely.
pub struct Static<V>(pub V);

impl<V> View for Static<V>
where
    V: View,
{
    type Product = V::Product;

    fn build(self) -> Self::Product {
        self.0.build()
    }

    fn update(self, _: &mut Self::Product) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_diff_updates_memo_on_change() {
        let mut memo = 0_u32.into_memo();

        assert!(!0_u32.diff(&mut memo));
        assert!(1_u32.diff(&mut memo));
        assert_eq!(memo, 1);
        assert!(!1_u32.diff(&mut memo));
    }

    #[test]
    fn str_diff_by_pointer_and_content() {
        let label = "count";
        let mut memo = label.into_memo();

        // Same literal, same address.
        assert!(!label.diff(&mut memo));

        // Different address, equal content.
        let owned = String::from("count");
        let leaked: &'static str = Box::leak(owned.into_boxed_str());
        assert!(!leaked.diff(&mut memo));

        assert!("total".diff(&mut memo));
        assert_eq!(memo, "total");
    }
}
