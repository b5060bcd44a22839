use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::same::Same;
use crate::snapshot::Value;

/// The render deps channel: a side input that lets a parent force renders.
///
/// - [`RenderDeps::Unset`]: the parent did not pass anything. This behaves
///   like an empty list and leaves the decision to the dependencies.
/// - [`RenderDeps::Off`]: always render.
/// - [`RenderDeps::List`]: render whenever the list's length or any of its
///   values change between updates.
///
/// Values are compared position by position with [`Same`]: numbers and
/// strings by value, shared pointers and [opaque](Value::opaque) values by
/// identity.
///
/// A parent should build a fresh list on every render. Passing the very same
/// list twice is reported as a diagnostic.
#[derive(Clone, Default)]
pub enum RenderDeps {
    /// Nothing was passed.
    #[default]
    Unset,
    /// Opt out of memoization for this update.
    Off,
    /// The passed values.
    List(Arc<[Value]>),
}

const NO_VALUES: &[Value] = &[];

impl RenderDeps {
    /// Create a list of values.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Start building a list of values of different types.
    pub fn builder() -> RenderDepsBuilder {
        RenderDepsBuilder(vec![])
    }

    /// Whether this is [`RenderDeps::Off`].
    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }

    /// The values, or `None` if the channel is off.
    ///
    /// An unset channel has no values.
    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Self::Unset => Some(NO_VALUES),
            Self::Off => None,
            Self::List(values) => Some(&**values),
        }
    }

    /// The number of values. Zero when unset or off.
    pub fn len(&self) -> usize {
        self.values().map_or(0, <[Value]>::len)
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The position of the first value that is not the same in `other`.
    ///
    /// Only meaningful for channels of equal length.
    pub fn first_change(&self, other: &Self) -> Option<usize> {
        let (a, b) = (self.values()?, other.values()?);
        a.iter().zip(b).position(|(a, b)| !a.same(b))
    }

    /// Whether both are lists backed by the same allocation.
    pub fn shares_allocation(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: Into<Value>> From<Option<Vec<T>>> for RenderDeps {
    fn from(values: Option<Vec<T>>) -> Self {
        values.map_or(Self::Off, Self::new)
    }
}

impl<T: Into<Value>> From<Vec<T>> for RenderDeps {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl Debug for RenderDeps {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Unset => f.pad("Unset"),
            Self::Off => f.pad("Off"),
            Self::List(values) => f.debug_tuple("List").field(values).finish(),
        }
    }
}

/// Builds a [`RenderDeps`] list from values of different types.
#[derive(Debug, Clone, Default)]
pub struct RenderDepsBuilder(Vec<Value>);

impl RenderDepsBuilder {
    /// Append a value.
    pub fn push(mut self, value: impl Into<Value>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Finish the list.
    pub fn build(self) -> RenderDeps {
        RenderDeps::List(self.0.into())
    }
}

/// The full input of a memoized component: its props and the render deps
/// channel, which is kept apart from the props.
#[derive(Debug, Clone, Default)]
pub struct Input<P> {
    /// The component's props.
    pub props: P,
    /// The render deps channel.
    pub render_deps: RenderDeps,
}

impl<P> Input<P> {
    /// Create an input without render deps.
    pub fn new(props: P) -> Self {
        Self { props, render_deps: RenderDeps::Unset }
    }

    /// Set the render deps.
    pub fn with_render_deps(mut self, render_deps: impl Into<RenderDeps>) -> Self {
        self.render_deps = render_deps.into();
        self
    }
}

impl<P> From<P> for Input<P> {
    fn from(props: P) -> Self {
        Self::new(props)
    }
}
