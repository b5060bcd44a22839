use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::same::Same;

/// Tree-shaped child content passed through a component.
///
/// Composite nodes are reference counted, so cloning content is cheap and
/// [`Same`] can compare composites by identity. Use [`content_eq`] for a
/// structural comparison.
#[derive(Clone, Default)]
pub enum Content {
    /// Nothing.
    #[default]
    Empty,
    /// A boolean leaf.
    Bool(bool),
    /// An integer leaf.
    Int(i64),
    /// A text leaf.
    Text(Arc<str>),
    /// An element with a tag, an optional key and nested content.
    Element(Arc<Element>),
    /// An ordered sequence of content.
    List(Arc<[Content]>),
}

impl Content {
    /// Create a text leaf.
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Self::Text(text.into())
    }

    /// Create a sequence.
    pub fn list(items: impl IntoIterator<Item = Content>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Whether this is a composite (an element or a sequence).
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Element(_) | Self::List(_))
    }

    /// The element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(&**element),
            _ => None,
        }
    }
}

impl Same for Content {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Element(a), Self::Element(b)) => Arc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Debug for Content {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Empty => f.pad("Empty"),
            Self::Bool(v) => v.fmt(f),
            Self::Int(v) => v.fmt(f),
            Self::Text(v) => v.fmt(f),
            Self::Element(v) => v.fmt(f),
            Self::List(v) => f.debug_list().entries(v.iter()).finish(),
        }
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Self::Element(Arc::new(element))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<i64> for Content {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Content {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<Content>> for Content {
    fn from(items: Vec<Content>) -> Self {
        Self::List(items.into())
    }
}

/// A tagged node in a content tree.
#[derive(Debug, Clone)]
pub struct Element {
    tag: Cow<'static, str>,
    key: Option<String>,
    attrs: Vec<(Cow<'static, str>, String)>,
    children: Content,
}

impl Element {
    /// Create an element without key, attributes or children.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            attrs: vec![],
            children: Content::Empty,
        }
    }

    /// Set the reconciliation key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add an attribute.
    pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set the nested content.
    pub fn child(mut self, children: impl Into<Content>) -> Self {
        self.children = children.into();
        self
    }

    /// The element's tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The element's reconciliation key, if it has a non-empty one.
    pub fn stable_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }

    /// The value of an attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// The nested content.
    pub fn children(&self) -> &Content {
        &self.children
    }
}

/// Whether two content trees are structurally equal.
///
/// Leaves compare by value and sequences position by position. Elements
/// carrying a non-empty key on either side are equal exactly if their keys
/// match, whatever else differs. Other elements are equal if their tags
/// match and their nested content is equal. Attributes are ignored.
pub fn content_eq(a: &Content, b: &Content) -> bool {
    if a.same(b) {
        return true;
    }

    match (a, b) {
        (Content::List(a), Content::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| content_eq(a, b))
        }
        (Content::Element(a), Content::Element(b)) => {
            if a.stable_key().is_some() || b.stable_key().is_some() {
                return a.stable_key() == b.stable_key();
            }
            a.tag == b.tag && content_eq(&a.children, &b.children)
        }
        _ => false,
    }
}
