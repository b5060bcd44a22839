use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::channel::{Input, RenderDeps};
use crate::deps::Deps;
use crate::diagnostics::{Diagnostic, Diagnostics, TracingDiagnostics};
use crate::engine::{self, Decision};
use crate::error::Result;
use crate::props::Props;

/// A renderable component with props of type `P`.
///
/// Implemented for all `Fn(&P) -> O` closures.
pub trait Component<P> {
    /// What rendering produces.
    type Output;

    /// Render the component.
    ///
    /// `render_deps` is only `Some` if the memo wrapping this component was
    /// configured to pass them through.
    fn render(&self, props: &P, render_deps: Option<&RenderDeps>) -> Self::Output;

    /// A human-readable name, if one was assigned.
    fn display_name(&self) -> Option<&str> {
        None
    }

    /// The programmatic name of the component.
    fn name(&self) -> &str {
        short_name(std::any::type_name::<Self>())
    }
}

impl<P, O, F> Component<P> for F
where
    F: Fn(&P) -> O,
{
    type Output = O;

    fn render(&self, props: &P, _: Option<&RenderDeps>) -> O {
        self(props)
    }
}

/// A component that receives the render deps channel.
///
/// Use this together with [`MemoOptions::pass_render_deps`].
#[derive(Debug, Clone)]
pub struct WithRenderDeps<F>(pub F);

impl<P, O, F> Component<P> for WithRenderDeps<F>
where
    F: Fn(&P, Option<&RenderDeps>) -> O,
{
    type Output = O;

    fn render(&self, props: &P, render_deps: Option<&RenderDeps>) -> O {
        (self.0)(props, render_deps)
    }

    fn name(&self) -> &str {
        short_name(std::any::type_name::<F>())
    }
}

/// A component with an assigned display name.
#[derive(Debug, Clone)]
pub struct Named<C> {
    name: Cow<'static, str>,
    inner: C,
}

/// Assign a display name to a component.
pub fn named<C>(name: impl Into<Cow<'static, str>>, component: C) -> Named<C> {
    Named { name: name.into(), inner: component }
}

impl<P, C: Component<P>> Component<P> for Named<C> {
    type Output = C::Output;

    fn render(&self, props: &P, render_deps: Option<&RenderDeps>) -> Self::Output {
        self.inner.render(props, render_deps)
    }

    fn display_name(&self) -> Option<&str> {
        Some(&*self.name)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// The last path segment of a type name, without generic arguments.
fn short_name(name: &str) -> &str {
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::")
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .unwrap_or(name)
}

/// A comparator installed into a host: returns `true` if rendering `next`
/// may be skipped after `prev` was rendered.
pub type Comparator<P> = Arc<dyn Fn(&Input<P>, &Input<P>) -> bool + Send + Sync>;

/// The host capability to install a memoization comparator for one
/// component instance.
pub trait Scheduler<P> {
    /// Install `comparator` for the instance represented by `self`.
    fn register_comparator(&mut self, label: &str, comparator: Comparator<P>);
}

/// Options for [`Memo::with_options`].
#[derive(Debug, Clone, Default)]
pub struct MemoOptions {
    /// The label used in diagnostics. Defaults to the component's display
    /// name, then its programmatic name.
    pub label: Option<String>,
    /// Whether the wrapped component receives the render deps.
    pub pass_render_deps: bool,
}

/// A component wrapped with a dependency specification.
pub struct Memo<C, P> {
    component: C,
    deps: Arc<Deps<P>>,
    label: String,
    pass_render_deps: bool,
    diagnostics: Arc<dyn Diagnostics>,
}

/// Wrap a component so that it only renders again when `deps` say so.
///
/// The label, if any, is used in diagnostics only. With `pass_render_deps`,
/// the component receives the render deps channel.
///
/// A key dependency that `P` does not have is reported as a diagnostic. Use
/// [`try_wrap`] to turn it into an error instead.
pub fn wrap<C, P>(component: C, deps: Deps<P>, label: Option<&str>, pass_render_deps: bool) -> Memo<C, P>
where
    C: Component<P>,
    P: Props,
{
    let options = MemoOptions { label: label.map(Into::into), pass_render_deps };
    let memo = Memo::with_options(component, deps, options);
    for key in memo.deps.unknown_keys() {
        memo.diagnostics.report(&memo.label, Diagnostic::UnknownKey(key.into()));
    }
    memo
}

/// Like [`wrap`], but fails if a key dependency names an input `P` does not
/// have.
pub fn try_wrap<C, P>(
    component: C,
    deps: Deps<P>,
    label: Option<&str>,
    pass_render_deps: bool,
) -> Result<Memo<C, P>>
where
    C: Component<P>,
    P: Props,
{
    let options = MemoOptions { label: label.map(Into::into), pass_render_deps };
    let memo = Memo::with_options(component, deps, options);
    memo.deps.validate(&memo.label)?;
    Ok(memo)
}

impl<C, P> Memo<C, P>
where
    C: Component<P>,
    P: Props,
{
    /// Wrap a component with explicit options.
    pub fn with_options(component: C, deps: Deps<P>, options: MemoOptions) -> Self {
        let label = match options.label {
            Some(label) => label,
            None => component.display_name().unwrap_or(component.name()).to_owned(),
        };

        Self {
            component,
            deps: Arc::new(deps),
            label,
            pass_render_deps: options.pass_render_deps,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Send diagnostics to another sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The label used in diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The name shown by tooling, `Memo(<label>)`.
    pub fn display_name(&self) -> String {
        format!("Memo({})", self.label)
    }

    /// The name of the wrapper that strips the render deps,
    /// `MemoWrapper(<label>)`.
    pub fn wrapper_name(&self) -> String {
        format!("MemoWrapper({})", self.label)
    }

    /// The dependency specification.
    pub fn deps(&self) -> &Deps<P> {
        &self.deps
    }

    /// Whether the wrapped component receives the render deps.
    pub fn passes_render_deps(&self) -> bool {
        self.pass_render_deps
    }

    /// Decide whether `next` must be rendered after `prev`.
    pub fn decide(&self, prev: &Input<P>, next: &Input<P>) -> Decision {
        engine::decide(prev, next, &self.deps, &self.label, &*self.diagnostics)
    }

    /// Whether rendering `next` may be skipped after `prev`.
    pub fn should_skip(&self, prev: &Input<P>, next: &Input<P>) -> bool {
        self.decide(prev, next).is_skip()
    }

    /// Render the wrapped component.
    ///
    /// The render deps are stripped unless they are passed through.
    pub fn render(&self, input: &Input<P>) -> C::Output {
        let render_deps = self.pass_render_deps.then_some(&input.render_deps);
        self.component.render(&input.props, render_deps)
    }

    /// The comparator of this memo, bound to its dependencies.
    pub fn comparator(&self) -> Comparator<P>
    where
        P: 'static,
    {
        let deps = self.deps.clone();
        let label = self.label.clone();
        let diagnostics = self.diagnostics.clone();
        Arc::new(move |prev: &Input<P>, next: &Input<P>| {
            engine::decide(prev, next, &deps, &label, &*diagnostics).is_skip()
        })
    }

    /// Install this memo's comparator through the host's scheduler.
    pub fn register<S>(&self, scheduler: &mut S)
    where
        S: Scheduler<P> + ?Sized,
        P: 'static,
    {
        scheduler.register_comparator(&self.display_name(), self.comparator());
    }
}

impl<C, P> Debug for Memo<C, P> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Memo")
            .field("label", &self.label)
            .field("deps", &self.deps)
            .field("pass_render_deps", &self.pass_render_deps)
            .finish_non_exhaustive()
    }
}
