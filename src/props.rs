use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};

use crate::diagnostics::{Diagnostic, Diagnostics};

/// The named inputs of a component.
///
/// A value of a `Props` type is one snapshot: the complete set of inputs a
/// component received for one render attempt. Its keys are ordered and stay
/// the same across the renders of one instance.
///
/// This is typically implemented through `#[derive(Props)]`, which creates
/// one key per field and compares fields with [`Same`](crate::Same).
/// [`Snapshot`](crate::Snapshot) implements it for dynamically shaped inputs.
pub trait Props {
    /// The key of the nested child content.
    ///
    /// The default comparator always treats this key as unchanged.
    const CHILDREN: &'static str = "children";

    /// The keys every instance of this type has, if they are known
    /// statically.
    fn shape() -> Option<&'static [&'static str]>
    where
        Self: Sized,
    {
        None
    }

    /// The keys of this snapshot, in order.
    fn keys(&self) -> Cow<'_, [&str]>;

    /// Whether the input at `key` is strictly the same in both snapshots.
    ///
    /// Returns `None` if either snapshot has no input with this key.
    fn same_key(&self, other: &Self, key: &str) -> Option<bool>;
}

/// The default per-key comparator, bound to a pair of snapshots.
///
/// Predicate dependencies receive this to build on the default behaviour.
pub struct Defaults<'a, P> {
    prev: &'a P,
    next: &'a P,
    label: &'a str,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, P: Props> Defaults<'a, P> {
    /// Bind the comparator to two snapshots.
    pub fn new(
        prev: &'a P,
        next: &'a P,
        label: &'a str,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self { prev, next, label, diagnostics }
    }

    /// Whether the input at `key` is unchanged.
    ///
    /// The children key always counts as unchanged. A key that is missing
    /// from either snapshot counts as changed.
    pub fn same(&self, key: &str) -> bool {
        if key == P::CHILDREN {
            return true;
        }

        match self.prev.same_key(self.next, key) {
            Some(same) => same,
            None => {
                self.diagnostics
                    .report(self.label, Diagnostic::UnknownKey(key.into()));
                false
            }
        }
    }

    /// The previous snapshot.
    pub fn prev(&self) -> &'a P {
        self.prev
    }

    /// The next snapshot.
    pub fn next(&self) -> &'a P {
        self.next
    }
}

impl<P> Debug for Defaults<'_, P> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Defaults").field("label", &self.label).finish_non_exhaustive()
    }
}

impl Props for () {
    fn shape() -> Option<&'static [&'static str]> {
        Some(&[])
    }

    fn keys(&self) -> Cow<'_, [&str]> {
        Cow::Borrowed(&[])
    }

    fn same_key(&self, _: &Self, _: &str) -> Option<bool> {
        None
    }
}
