use crate::channel::{Input, RenderDeps};
use crate::deps::{Dep, Deps};
use crate::diagnostics::{Diagnostic, Diagnostics, TracingDiagnostics};
use crate::props::{Defaults, Props};

/// The outcome of comparing two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The cached output may be reused.
    Skip,
    /// The component must render again.
    Render(Reason),
}

impl Decision {
    /// Whether the render may be skipped.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

/// Why a component must render again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// The next render deps are off.
    RenderDepsOff,
    /// The previous render deps were off.
    RenderDepsResumed,
    /// The number of render deps changed.
    RenderDepsLength { prev: usize, next: usize },
    /// The render dep at this position changed.
    RenderDepsChanged { index: usize },
    /// Without a dependency list: the input with this key changed, or the
    /// inputs' shapes differ if there is no key.
    Props { key: Option<String> },
    /// The dependency entry at this position reported a change.
    Dependency { index: usize },
}

/// Whether a component may skip rendering `next`, given that it last
/// rendered `prev`.
///
/// Diagnostics are emitted through `tracing`. Use [`decide`] to pick another
/// sink or to learn why a render is necessary.
pub fn should_skip_render<P: Props>(prev: &Input<P>, next: &Input<P>, deps: &Deps<P>) -> bool {
    decide(prev, next, deps, "anonymous", &TracingDiagnostics).is_skip()
}

/// Decide whether a component labelled `label` must render `next`, given
/// that it last rendered `prev`.
///
/// The render deps channel takes precedence over the dependencies:
/// 1. Next render deps off, previous off, or a changed length: render.
/// 2. Any render dep changed: render.
/// 3. No dependency at all: skip.
/// 4. [`Deps::all`]: skip iff every input is the same.
/// 5. Otherwise, skip iff every entry reports no change.
///
/// Panics raised by predicates are not caught.
pub fn decide<P: Props>(
    prev: &Input<P>,
    next: &Input<P>,
    deps: &Deps<P>,
    label: &str,
    diagnostics: &dyn Diagnostics,
) -> Decision {
    let decision = evaluate(prev, next, deps, label, diagnostics);
    tracing::trace!(component = label, ?decision, "memo decision");
    decision
}

fn evaluate<P: Props>(
    prev: &Input<P>,
    next: &Input<P>,
    deps: &Deps<P>,
    label: &str,
    diagnostics: &dyn Diagnostics,
) -> Decision {
    if let Some(reason) = check_render_deps(&prev.render_deps, &next.render_deps, label, diagnostics) {
        return Decision::Render(reason);
    }

    let Some(entries) = deps.entries() else {
        return compare_all(&prev.props, &next.props);
    };

    let defaults = Defaults::new(&prev.props, &next.props, label, diagnostics);
    for (index, dep) in entries.iter().enumerate() {
        let unchanged = match dep {
            Dep::Key(key) => defaults.same(key),
            Dep::Predicate(f) => f(&prev.props, &next.props, &defaults),
        };

        if !unchanged {
            return Decision::Render(Reason::Dependency { index });
        }
    }

    Decision::Skip
}

/// Apply the render deps rules. Returns `None` if the channel does not force
/// a render.
fn check_render_deps(
    prev: &RenderDeps,
    next: &RenderDeps,
    label: &str,
    diagnostics: &dyn Diagnostics,
) -> Option<Reason> {
    let Some(next_values) = next.values() else {
        return Some(Reason::RenderDepsOff);
    };

    let Some(prev_values) = prev.values() else {
        return Some(Reason::RenderDepsResumed);
    };

    if prev_values.len() != next_values.len() {
        return Some(Reason::RenderDepsLength {
            prev: prev_values.len(),
            next: next_values.len(),
        });
    }

    if prev.shares_allocation(next) {
        diagnostics.report(label, Diagnostic::SharedRenderDeps);
    }

    prev.first_change(next).map(|index| Reason::RenderDepsChanged { index })
}

/// Plain memoization: every input must be the same, children included.
fn compare_all<P: Props>(prev: &P, next: &P) -> Decision {
    let keys = prev.keys();
    if keys.len() != next.keys().len() {
        return Decision::Render(Reason::Props { key: None });
    }

    match keys.iter().find(|key| prev.same_key(next, key) != Some(true)) {
        Some(key) => Decision::Render(Reason::Props { key: Some((*key).into()) }),
        None => Decision::Skip,
    }
}
