use std::fmt::{self, Debug, Display, Formatter};

use slab::Slab;

use crate::channel::Input;
use crate::error::{Error, Result};
use crate::memo::{Comparator, Component, Memo, Scheduler};
use crate::props::Props;

/// Identifies a mounted component instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InstanceId(usize);

impl Display for InstanceId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "instance #{}", self.0)
    }
}

/// What happened during an update.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Update {
    /// The component rendered the new input.
    Rendered,
    /// The cached output was kept.
    Skipped,
}

/// A minimal host that owns mounted memoized components.
///
/// Each instance keeps the input it last rendered and the resulting output.
/// Updates consult the comparator the memo installed on mount and only
/// render when it does not allow skipping. A skipped update leaves the last
/// rendered input in place, so the next update is compared against it.
pub struct Renderer<P, O> {
    instances: Slab<Instance<P, O>>,
}

/// A mounted component instance.
struct Instance<P, O> {
    label: String,
    comparator: Option<Comparator<P>>,
    render: Box<dyn Fn(&Input<P>) -> O>,
    input: Input<P>,
    output: O,
    renders: usize,
}

/// The scheduler handed to a memo while it is mounted.
struct Slot<P> {
    label: Option<String>,
    comparator: Option<Comparator<P>>,
}

impl<P> Scheduler<P> for Slot<P> {
    fn register_comparator(&mut self, label: &str, comparator: Comparator<P>) {
        self.label = Some(label.into());
        self.comparator = Some(comparator);
    }
}

impl<P: Props + 'static, O> Renderer<P, O> {
    /// Create a renderer without instances.
    pub fn new() -> Self {
        Self { instances: Slab::new() }
    }

    /// Mount a memoized component and render it for the first time.
    pub fn mount<C>(&mut self, memo: Memo<C, P>, input: Input<P>) -> InstanceId
    where
        C: Component<P, Output = O> + 'static,
        O: 'static,
    {
        let mut slot = Slot { label: None, comparator: None };
        memo.register(&mut slot);

        let output = memo.render(&input);
        let label = slot.label.unwrap_or_else(|| memo.display_name());
        let id = InstanceId(self.instances.insert(Instance {
            label,
            comparator: slot.comparator,
            render: Box::new(move |input: &Input<P>| memo.render(input)),
            input,
            output,
            renders: 1,
        }));

        tracing::debug!(component = %self.instances[id.0].label, %id, "mounted");
        id
    }

    /// Offer a new input to an instance.
    pub fn update(&mut self, id: InstanceId, next: Input<P>) -> Result<Update> {
        let instance = self.instances.get_mut(id.0).ok_or(Error::UnknownInstance(id))?;

        let skip = instance
            .comparator
            .as_ref()
            .is_some_and(|comparator| comparator(&instance.input, &next));

        if skip {
            tracing::trace!(component = %instance.label, %id, "skipped render");
            return Ok(Update::Skipped);
        }

        instance.output = (instance.render)(&next);
        instance.input = next;
        instance.renders += 1;
        tracing::trace!(component = %instance.label, %id, renders = instance.renders, "rendered");
        Ok(Update::Rendered)
    }

    /// Remove an instance.
    pub fn unmount(&mut self, id: InstanceId) -> Result<()> {
        self.instances.try_remove(id.0).ok_or(Error::UnknownInstance(id))?;
        Ok(())
    }

    /// The output of the last render of an instance.
    pub fn output(&self, id: InstanceId) -> Option<&O> {
        self.instances.get(id.0).map(|instance| &instance.output)
    }

    /// The input an instance last rendered.
    pub fn input(&self, id: InstanceId) -> Option<&Input<P>> {
        self.instances.get(id.0).map(|instance| &instance.input)
    }

    /// How often an instance rendered, including the initial render.
    pub fn renders(&self, id: InstanceId) -> Option<usize> {
        self.instances.get(id.0).map(|instance| instance.renders)
    }

    /// The name of an instance, as registered by its memo.
    pub fn label(&self, id: InstanceId) -> Option<&str> {
        self.instances.get(id.0).map(|instance| instance.label.as_str())
    }

    /// The number of mounted instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no instance is mounted.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<P: Props + 'static, O> Default for Renderer<P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, O> Debug for Renderer<P, O> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.instances.iter().map(|(_, instance)| &instance.label))
            .finish()
    }
}
