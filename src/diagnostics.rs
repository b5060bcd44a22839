use std::fmt::{self, Debug, Display, Formatter};

use parking_lot::Mutex;

/// A developer-facing warning about how a memoized component is used.
///
/// Diagnostics never change a decision. They are handed to a [`Diagnostics`]
/// sink while evaluation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The parent passed the very same render deps allocation on two
    /// consecutive updates. A channel that is not rebuilt on each parent
    /// render cannot reliably force a render later on.
    SharedRenderDeps,
    /// A key dependency names an input that is not part of the snapshot.
    UnknownKey(String),
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::SharedRenderDeps => f.write_str(
                "Render deps are the same object across parent renders. \
                 This should not happen.",
            ),
            Self::UnknownKey(key) => {
                write!(f, "dependency `{key}` does not name an input, rendering anyway")
            }
        }
    }
}

/// A sink for [diagnostics](Diagnostic).
///
/// Implemented for [`TracingDiagnostics`], [`RecordingDiagnostics`] and any
/// `Fn(&str, Diagnostic)` closure.
pub trait Diagnostics: Send + Sync {
    /// Report a diagnostic for the component with the given label.
    fn report(&self, component: &str, diagnostic: Diagnostic);
}

impl<F> Diagnostics for F
where
    F: Fn(&str, Diagnostic) + Send + Sync,
{
    fn report(&self, component: &str, diagnostic: Diagnostic) {
        self(component, diagnostic)
    }
}

/// Emits every diagnostic as a `tracing` warning.
///
/// This is the sink used unless another one is configured.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, component: &str, diagnostic: Diagnostic) {
        tracing::warn!(component, "{diagnostic}");
    }
}

/// Keeps every reported diagnostic in memory.
#[derive(Default)]
pub struct RecordingDiagnostics(Mutex<Vec<(String, Diagnostic)>>);

impl RecordingDiagnostics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Remove and return all recorded diagnostics, oldest first.
    pub fn take(&self) -> Vec<(String, Diagnostic)> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, component: &str, diagnostic: Diagnostic) {
        self.0.lock().push((component.into(), diagnostic));
    }
}

impl Debug for RecordingDiagnostics {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("RecordingDiagnostics").field(&*self.0.lock()).finish()
    }
}
