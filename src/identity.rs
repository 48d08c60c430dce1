//! Identity comparison used for change detection.
//!
//! Shared values (`Arc`) are compared by pointer, never by content: a reducer
//! signals "no change" by handing back the very same `Arc`. Scalars and
//! strings have no identity of their own and compare by value.

use std::sync::Arc;

/// Decides whether two values are the same for notification purposes.
pub trait Identical {
    fn identical(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identical for Arc<T> {
    fn identical(&self, other: &Self) -> bool {
        // Thin-pointer comparison; vtable pointers of `dyn` values may differ.
        Arc::as_ptr(self) as *const () == Arc::as_ptr(other) as *const ()
    }
}

impl<T: Identical> Identical for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.identical(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Identical> Identical for Vec<T> {
    fn identical(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.identical(b))
    }
}

impl<A: Identical, B: Identical> Identical for (A, B) {
    fn identical(&self, other: &Self) -> bool {
        self.0.identical(&other.0) && self.1.identical(&other.1)
    }
}

impl<A: Identical, B: Identical, C: Identical> Identical for (A, B, C) {
    fn identical(&self, other: &Self) -> bool {
        self.0.identical(&other.0) && self.1.identical(&other.1) && self.2.identical(&other.2)
    }
}

impl<'a> Identical for &'a str {
    fn identical(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! identical_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identical for $ty {
                fn identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identical_by_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);
