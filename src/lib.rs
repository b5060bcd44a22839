/*!
Selective re-rendering through partial-dependency memoization.

Component inputs often contain values that are freshly allocated on every
parent render: lists, shared closures, child content. A memo that compares
all inputs strictly renders again every time. This crate lets you declare
which inputs actually matter and skips renders when none of them changed.

```
use depmemo::{wrap, Deps, Input, Props, Renderer, Update};

#[derive(Props)]
struct Greeting {
    name: String,
    age: u32,
}

let memo = wrap(
    |props: &Greeting| format!("Hello, {}!", props.name),
    Deps::on(["name"]),
    Some("Greeting"),
    false,
);

let mut renderer = Renderer::new();
let id = renderer.mount(memo, Input::new(Greeting { name: "John".into(), age: 25 }));

// The age is not a dependency.
let next = Input::new(Greeting { name: "John".into(), age: 30 });
assert_eq!(renderer.update(id, next).unwrap(), Update::Skipped);

// The name is.
let next = Input::new(Greeting { name: "Jane".into(), age: 30 });
assert_eq!(renderer.update(id, next).unwrap(), Update::Rendered);
assert_eq!(renderer.output(id).unwrap(), "Hello, Jane!");
```

# Dependencies
A [`Deps`] specification is one of
- [`Deps::all`]: plain memoization, every input is compared strictly;
- [`Deps::none`]: never render because of input changes;
- a list of [entries](Dep): input keys, compared with the default
  comparator, and predicates that may build on it.

The default comparator uses [`Same`] but always treats the children input as
unchanged, since child content is rebuilt on every parent render. Predicates
that care about children can compare them structurally with [`content_eq`].

# Render deps
Next to its props, every [`Input`] carries a [`RenderDeps`] channel through
which a parent can force renders: turning it [off](RenderDeps::Off) always
renders, and changing its length or any of its values renders, whatever the
dependencies say.
*/

mod channel;
mod content;
mod deps;
mod diagnostics;
mod engine;
mod error;
mod memo;
mod props;
mod renderer;
mod same;
mod snapshot;

pub use crate::channel::{Input, RenderDeps, RenderDepsBuilder};
pub use crate::content::{content_eq, Content, Element};
pub use crate::deps::{Dep, Deps, Predicate};
pub use crate::diagnostics::{Diagnostic, Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use crate::engine::{decide, should_skip_render, Decision, Reason};
pub use crate::error::{Error, Result};
pub use crate::memo::{
    named, try_wrap, wrap, Comparator, Component, Memo, MemoOptions, Named, Scheduler,
    WithRenderDeps,
};
pub use crate::props::{Defaults, Props};
pub use crate::renderer::{InstanceId, Renderer, Update};
pub use crate::same::Same;
pub use crate::snapshot::{Snapshot, Value};

#[cfg(feature = "macros")]
pub use depmemo_macros::Props;
