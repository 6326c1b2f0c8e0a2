// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Trait for creating the initial state of a [`stateful`](super::stateful)
/// view: either a plain value, or a closure producing one.
pub trait IntoState {
    type State: 'static;

    fn init(self) -> Self::State;
}

impl<F, S> IntoState for F
where
    F: FnOnce() -> S,
    S: 'static,
{
    type State = S;

    fn init(self) -> S {
        self()
    }
}

macro_rules! into_state {
    ($($ty:ty),*) => {
        $(
            impl IntoState for $ty {
                type State = $ty;

                fn init(self) -> $ty {
                    self
                }
            }
        )*
    };
}

into_state! {
    bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    String, &'static str
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_their_own_state() {
        assert_eq!(42_u32.init(), 42);
        assert_eq!(true.init(), true);
        assert_eq!(String::from("foo").init(), "foo");
    }

    #[test]
    fn closures_initialize_state() {
        assert_eq!((|| 7_i32).init(), 7);
        assert_eq!(Vec::<u8>::new.init(), Vec::<u8>::new());
    }
}
