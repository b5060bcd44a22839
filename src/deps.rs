use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::props::{Defaults, Props};

/// A custom comparison over two snapshots.
///
/// Returns `true` if the change between `prev` and `next` does not require a
/// render.
pub type Predicate<P> = Arc<dyn Fn(&P, &P, &Defaults<'_, P>) -> bool + Send + Sync>;

/// One entry of a dependency specification.
pub enum Dep<P> {
    /// An input compared with the default comparator.
    Key(Cow<'static, str>),
    /// A custom comparison.
    Predicate(Predicate<P>),
}

impl<P> Dep<P> {
    /// Create a key dependency.
    pub fn key(key: impl Into<Cow<'static, str>>) -> Self {
        Self::Key(key.into())
    }

    /// Create a predicate dependency.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&P, &P, &Defaults<'_, P>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }
}

impl<P> From<&'static str> for Dep<P> {
    fn from(key: &'static str) -> Self {
        Self::Key(key.into())
    }
}

impl<P> From<String> for Dep<P> {
    fn from(key: String) -> Self {
        Self::Key(key.into())
    }
}

impl<P> Clone for Dep<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Key(key) => Self::Key(key.clone()),
            Self::Predicate(f) => Self::Predicate(f.clone()),
        }
    }
}

impl<P> Debug for Dep<P> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Predicate(_) => f.pad("Predicate(..)"),
        }
    }
}

/// Declares which inputs decide whether a component must render again.
///
/// There are three shapes:
/// - [`Deps::all`]: every input counts, compared strictly. This is plain
///   memoization and the default.
/// - [`Deps::none`]: no input counts. Only the render deps channel can
///   trigger a render.
/// - A list of [entries](Dep): the component renders again if any entry
///   reports a change.
///
/// ```
/// # use depmemo::{Deps, Snapshot};
/// let deps: Deps<Snapshot> = Deps::on(["value"])
///     .when(|_, next: &Snapshot, defaults| {
///         defaults.same("other") || !next.get("other").is_some_and(|v| v.as_int() == Some(3))
///     });
/// assert_eq!(deps.entries().map(<[_]>::len), Some(2));
/// ```
pub struct Deps<P> {
    entries: Option<Vec<Dep<P>>>,
}

impl<P> Deps<P> {
    /// Depend on every input.
    pub fn all() -> Self {
        Self { entries: None }
    }

    /// Depend on no input at all.
    pub fn none() -> Self {
        Self { entries: Some(vec![]) }
    }

    /// Depend on the given entries.
    pub fn on<I>(entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Dep<P>>,
    {
        Self { entries: Some(entries.into_iter().map(Into::into).collect()) }
    }

    /// Add an entry.
    ///
    /// Adding to [`Deps::all`] switches to a list that only holds the new
    /// entry.
    pub fn with(mut self, dep: impl Into<Dep<P>>) -> Self {
        self.entries.get_or_insert_with(Vec::new).push(dep.into());
        self
    }

    /// Add a key entry.
    pub fn key(self, key: impl Into<Cow<'static, str>>) -> Self {
        self.with(Dep::key(key))
    }

    /// Add a predicate entry.
    pub fn when<F>(self, f: F) -> Self
    where
        F: Fn(&P, &P, &Defaults<'_, P>) -> bool + Send + Sync + 'static,
    {
        self.with(Dep::predicate(f))
    }

    /// The entries, or `None` if every input counts.
    pub fn entries(&self) -> Option<&[Dep<P>]> {
        self.entries.as_deref()
    }

    /// Whether every input counts.
    pub fn is_all(&self) -> bool {
        self.entries.is_none()
    }

    /// Whether no input counts.
    pub fn is_none(&self) -> bool {
        self.entries.as_ref().is_some_and(Vec::is_empty)
    }

    /// The key entries, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().flatten().filter_map(|dep| match dep {
            Dep::Key(key) => Some(key.as_ref()),
            Dep::Predicate(_) => None,
        })
    }
}

impl<P: Props> Deps<P> {
    /// The key entries that name no input of `P`.
    ///
    /// The children key always counts as known, since the default comparator
    /// treats it as unchanged whether or not `P` has it. Types without a
    /// static shape have no unknown keys.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        let shape = P::shape();
        self.keys().filter(move |key| match shape {
            Some(shape) => *key != P::CHILDREN && !shape.iter().any(|known| known == key),
            None => false,
        })
    }

    /// Check that every key entry names an input of `P`.
    pub fn validate(&self, component: &str) -> Result<()> {
        match self.unknown_keys().next() {
            Some(key) => Err(Error::UnknownKey {
                component: component.into(),
                key: key.into(),
            }),
            None => Ok(()),
        }
    }
}

impl<P> Default for Deps<P> {
    fn default() -> Self {
        Self::all()
    }
}

impl<P> Clone for Deps<P> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone() }
    }
}

impl<P> Debug for Deps<P> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.entries {
            None => f.pad("Deps::all()"),
            Some(entries) => f.debug_list().entries(entries).finish(),
        }
    }
}

impl<P, D: Into<Dep<P>>> FromIterator<D> for Deps<P> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self::on(iter)
    }
}
