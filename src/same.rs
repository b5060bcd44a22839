use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Strict equality between two inputs of a component.
///
/// This is the comparison the default per-key comparator uses. Plain data
/// (numbers, strings, booleans) compares by value. Shared pointers compare by
/// identity: two `Rc`s are the same only if they point to the same
/// allocation, even if the pointees would compare equal. This way, a freshly
/// allocated closure or list produced by a parent's render is reported as a
/// change, exactly like a reference-equality memo would.
pub trait Same {
    /// Whether `self` and `other` are strictly the same input.
    fn same(&self, other: &Self) -> bool;
}

macro_rules! same_by_value {
    ($($ty:ty),* $(,)?) => {
        $(impl Same for $ty {
            #[inline]
            fn same(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

same_by_value! {
    (), bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    str, String,
}

// Floats follow strict equality: `NaN` is never the same as itself, so a
// `NaN` input always triggers a render.
impl Same for f32 {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Same for f64 {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: ?Sized> Same for Rc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Same for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Same + ?Sized> Same for &T {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        (**self).same(*other)
    }
}

impl<T: Same + ?Sized> Same for Box<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        (**self).same(&**other)
    }
}

impl<T: Same> Same for Option<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Same> Same for [T] {
    fn same(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same(b))
    }
}

impl<T: Same, const N: usize> Same for [T; N] {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self.as_slice().same(other.as_slice())
    }
}

impl<T: Same> Same for Vec<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self.as_slice().same(other.as_slice())
    }
}

impl<T> Same for Cow<'_, T>
where
    T: Same + ToOwned + ?Sized,
{
    #[inline]
    fn same(&self, other: &Self) -> bool {
        (**self).same(&**other)
    }
}

macro_rules! same_tuple {
    ($($param:tt $idx:tt),*) => {
        impl<$($param: Same),*> Same for ($($param,)*) {
            #[inline]
            fn same(&self, other: &Self) -> bool {
                true $(&& self.$idx.same(&other.$idx))*
            }
        }
    };
}

same_tuple! { A 0 }
same_tuple! { A 0, B 1 }
same_tuple! { A 0, B 1, C 2 }
same_tuple! { A 0, B 1, C 2, D 3 }
same_tuple! { A 0, B 1, C 2, D 3, E 4 }
same_tuple! { A 0, B 1, C 2, D 3, E 4, F 5 }
