#![forbid(unsafe_code)]

//! Element abstraction and an in-memory element tree.

/// The slice of a document node that attribute sync needs.
///
/// Implement this for the host's node handle (a DOM wrapper, a widget tree
/// node, ...). [`MemoryElement`] is a ready-made owned implementation.
pub trait Element {
    /// Value of attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set attribute `name` to `value`, adding it if absent.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove attribute `name`. No-op when absent.
    fn remove_attribute(&mut self, name: &str);

    /// Replace the element's rendered content with `content`.
    fn set_content(&mut self, content: &str);

    /// Call `visit` on each direct child, in document order.
    fn visit_children_mut(&mut self, visit: &mut dyn FnMut(&mut Self));
}

/// Visit every descendant of `root` (not `root` itself) in document order.
///
/// A node is visited before its children, and its children are read after
/// `visit` returns, so content written by `visit` is what gets walked.
pub fn walk_descendants<E: Element>(root: &mut E, visit: &mut dyn FnMut(&mut E)) {
    root.visit_children_mut(&mut |child: &mut E| {
        visit(child);
        walk_descendants(child, visit);
    });
}

/// Owned element with ordered attributes, text content and children.
///
/// Setting content replaces the children, like assigning `innerHTML`.
///
/// ```
/// use localizable_dom::{Element, MemoryElement};
///
/// let mut span = MemoryElement::new("span").with_attribute("data-translate-key", "Hi");
/// span.set_content("Hello");
/// assert_eq!(span.attribute("data-translate-key").as_deref(), Some("Hi"));
/// assert_eq!(span.content(), "Hello");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    tag: String,
    attributes: Vec<(String, String)>,
    content: String,
    children: Vec<MemoryElement>,
}

impl MemoryElement {
    /// Create an element with no attributes, content or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: add or replace an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = text.into();
        self
    }

    /// Builder: append a child.
    #[must_use]
    pub fn with_child(mut self, child: MemoryElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child.
    pub fn push_child(&mut self, child: MemoryElement) {
        self.children.push(child);
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn children(&self) -> &[MemoryElement] {
        &self.children
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether attribute `name` is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == name)
    }

    /// First descendant (depth-first, document order) whose `name`
    /// attribute equals `value`.
    #[must_use]
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<&MemoryElement> {
        self.children.iter().find_map(|child| {
            if child.attributes.iter().any(|(k, v)| k == name && v == value) {
                Some(child)
            } else {
                child.find_by_attribute(name, value)
            }
        })
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => value.clone_into(v),
            None => self.attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(k, _)| k != name);
    }

    fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
        self.children.clear();
    }

    fn visit_children_mut(&mut self, visit: &mut dyn FnMut(&mut Self)) {
        for child in &mut self.children {
            visit(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MemoryElement {
        MemoryElement::new("body")
            .with_child(
                MemoryElement::new("div")
                    .with_attribute("id", "a")
                    .with_child(MemoryElement::new("span").with_attribute("id", "b")),
            )
            .with_child(MemoryElement::new("p").with_attribute("id", "c"))
    }

    #[test]
    fn attributes_set_replace_remove() {
        let mut el = MemoryElement::new("span");
        el.set_attribute("x", "1");
        el.set_attribute("y", "2");
        el.set_attribute("x", "3");
        assert_eq!(el.attribute("x").as_deref(), Some("3"));
        assert_eq!(el.attributes().collect::<Vec<_>>(), vec![("x", "3"), ("y", "2")]);

        el.remove_attribute("x");
        el.remove_attribute("missing");
        assert!(!el.has_attribute("x"));
        assert!(el.has_attribute("y"));
    }

    #[test]
    fn set_content_replaces_children() {
        let mut el = tree();
        el.set_content("text");
        assert_eq!(el.content(), "text");
        assert!(el.children().is_empty());
    }

    #[test]
    fn walk_is_preorder_and_skips_root() {
        let mut root = tree().with_attribute("id", "root");
        let mut seen = Vec::new();
        walk_descendants(&mut root, &mut |el: &mut MemoryElement| {
            seen.extend(el.attribute("id"));
        });
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn find_by_attribute_descends() {
        let root = tree();
        assert_eq!(root.find_by_attribute("id", "b").map(MemoryElement::tag), Some("span"));
        assert!(root.find_by_attribute("id", "zzz").is_none());
    }
}
