use thiserror::Error;

use crate::renderer::InstanceId;

/// The error type for fallible operations of this crate.
///
/// Decisions themselves never fail. Errors only arise when wrapping a
/// component, building a dynamic snapshot, or addressing a renderer instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A key dependency names an input the component does not have.
    #[error("dependency `{key}` of `{component}` does not name an input")]
    UnknownKey {
        /// The label of the wrapped component.
        component: String,
        /// The offending key.
        key: String,
    },
    /// An input was inserted twice into a snapshot.
    #[error("input `{0}` is already part of the snapshot")]
    DuplicateKey(String),
    /// The instance was never mounted or was already unmounted.
    #[error("no component is mounted as {0}")]
    UnknownInstance(InstanceId),
}

/// A result with this crate's [`Error`] type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
