/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Forward-only data ranges.

use std::fmt;

use mailmerge_xml::XmlElement;

use crate::lookup::{ImageDescriptor, ImageKind, LookupResult};
use crate::modifier::{Modifier, strip_parameters};
use crate::path::{matching_children, resolve};

/// A cursor over a range of sibling elements.
///
/// The cursor starts before the first element: [`advance`](Self::advance)
/// must be called before the first lookup, and again before each following
/// record. Ranges are single-pass and never rewind.
///
/// Nested ranges borrow the node that produced them. The parent is only
/// read (for `$parentContext` lookups), so it cannot advance while one of
/// its nested ranges is alive; a range is finished before its parent moves
/// on, matching depth-first merging.
pub struct DataSourceNode<'a> {
    name: String,
    elements: Vec<&'a XmlElement>,
    position: Option<usize>,
    parent: Option<&'a DataSourceNode<'a>>,
}

impl<'a> DataSourceNode<'a> {
    /// The root range: a single record holding the document root.
    pub fn root(element: &'a XmlElement) -> Self {
        Self::new(None, vec![element], String::new())
    }

    /// A range over `elements`, nested inside `parent`.
    pub fn new(
        parent: Option<&'a DataSourceNode<'a>>,
        elements: Vec<&'a XmlElement>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            elements,
            position: None,
            parent,
        }
    }

    /// Dotted name of this range (`""` for the root, `Invoices.Lines` for
    /// nested ranges).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records in the range.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn parent(&self) -> Option<&'a DataSourceNode<'a>> {
        self.parent
    }

    /// The record under the cursor, or `None` before the first
    /// [`advance`](Self::advance) and after the range is exhausted.
    pub fn current(&self) -> Option<&'a XmlElement> {
        self.position.and_then(|p| self.elements.get(p).copied())
    }

    /// Move to the next record. Returns `false` once the range is exhausted.
    pub fn advance(&mut self) -> bool {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.elements.len() {
            self.position = Some(next);
            true
        } else {
            self.position = Some(self.elements.len());
            false
        }
    }

    /// Resolve a merge-field key against the current record.
    ///
    /// Any parenthesized parameter list is ignored here. Lookups before the
    /// first `advance` resolve nothing except `$whitespace` and parent
    /// escapes.
    pub fn lookup(&self, key: &str) -> LookupResult<'_> {
        let stripped = strip_parameters(key);
        let modifier = Modifier::classify(key, &stripped);

        let result = match modifier {
            Modifier::Whitespace => LookupResult::Scalar(" ".to_string()),
            Modifier::ParentContext { rest } => self.lookup_in_parent(rest),
            Modifier::Container { target } => self.container_check(target),
            Modifier::NotEmpty { target } => {
                if self.target_has_value(target) {
                    self.wrap_current()
                } else {
                    LookupResult::NotFound
                }
            }
            Modifier::AsWhitespace { target } => {
                if self.target_has_value(target) {
                    LookupResult::Scalar(" ".to_string())
                } else {
                    LookupResult::NotFound
                }
            }
            Modifier::Path { path } => self.lookup_path(path),
        };

        tracing::trace!(
            range = %self.name,
            key,
            rule = modifier.name(),
            result = result.kind(),
            "lookup"
        );
        result
    }

    fn lookup_in_parent(&self, rest: &str) -> LookupResult<'_> {
        match self.parent {
            Some(parent) => parent.lookup(rest),
            None => {
                // A parent escape at the root succeeds with an empty value.
                tracing::debug!(range = %self.name, key = rest, "$parentContext requested without parent");
                LookupResult::Scalar(String::new())
            }
        }
    }

    fn container_check(&self, target: &str) -> LookupResult<'_> {
        let has_children = self
            .current()
            .and_then(|current| resolve(target, current))
            .is_some_and(|element| !matching_children(element).is_empty());

        tracing::debug!(
            range = %self.name,
            target,
            ok = has_children,
            "container check"
        );

        if has_children {
            self.wrap_current()
        } else {
            LookupResult::NotFound
        }
    }

    /// Strict emptiness: only a zero-length value is empty.
    fn target_has_value(&self, target: &str) -> bool {
        self.current()
            .and_then(|current| resolve(target, current))
            .is_some_and(|element| !element.value().is_empty())
    }

    /// A one-record range over the current element, keeping this range's
    /// name. Used as a truthiness wrapper, not a descent.
    fn wrap_current(&self) -> LookupResult<'_> {
        match self.current() {
            Some(current) => {
                LookupResult::Range(DataSourceNode::new(Some(self), vec![current], self.name.clone()))
            }
            None => LookupResult::NotFound,
        }
    }

    fn lookup_path(&self, path: &str) -> LookupResult<'_> {
        let Some(element) = self.current().and_then(|current| resolve(path, current)) else {
            return LookupResult::NotFound;
        };

        if let Some(descriptor) = ImageDescriptor::from_element(element) {
            if descriptor.kind == ImageKind::ImageRef {
                return LookupResult::ImageRef(descriptor);
            }
        }

        let children = matching_children(element);
        if !children.is_empty() {
            let name = if self.name.is_empty() {
                element.name.clone()
            } else {
                format!("{}.{}", self.name, element.name)
            };
            return LookupResult::Range(DataSourceNode::new(Some(self), children, name));
        }

        LookupResult::Scalar(element.value())
    }
}

impl fmt::Debug for DataSourceNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceNode")
            .field("name", &self.name)
            .field("len", &self.elements.len())
            .field("position", &self.position)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailmerge_xml::parse;

    const DATA: &str = r#"<Root>
  <Title>Quarterly report</Title>
  <Blank></Blank>
  <Spaces>  </Spaces>
  <Invoices>
    <Invoice>
      <Number>1</Number>
      <Lines><Line><Amount>10</Amount></Line><Line><Amount>20</Amount></Line></Lines>
      <Note></Note>
    </Invoice>
    <Invoice>
      <Number>2</Number>
      <Lines/>
      <Note>Paid</Note>
    </Invoice>
  </Invoices>
</Root>"#;

    #[test]
    fn test_advance_is_forward_only() {
        let doc = parse(DATA).unwrap();
        let invoices = doc.root.element("Invoices").unwrap();
        let mut node = DataSourceNode::new(None, matching_children(invoices), "Invoices");

        assert!(node.current().is_none());
        assert!(node.advance());
        assert_eq!(node.lookup("Number").as_scalar(), Some("1"));
        assert!(node.advance());
        assert_eq!(node.lookup("Number").as_scalar(), Some("2"));
        assert!(!node.advance());
        assert!(!node.advance());
        assert!(node.current().is_none());
    }

    #[test]
    fn test_lookup_before_advance_finds_nothing() {
        let doc = parse(DATA).unwrap();
        let root = DataSourceNode::root(&doc.root);
        assert!(!root.lookup("Title").is_found());
        assert_eq!(root.lookup("$whitespace").as_scalar(), Some(" "));
    }

    #[test]
    fn test_scalar_and_not_found() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());

        assert_eq!(root.lookup("Title").as_scalar(), Some("Quarterly report"));
        assert_eq!(root.lookup("Title(w:10)").as_scalar(), Some("Quarterly report"));
        assert_eq!(root.lookup("Title$omitIfEmpty").as_scalar(), Some("Quarterly report"));
        assert!(matches!(root.lookup("Subtitle"), LookupResult::NotFound));
    }

    #[test]
    fn test_nested_range_names() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());

        let LookupResult::Range(mut invoices) = root.lookup("Invoices") else {
            panic!("expected range");
        };
        assert_eq!(invoices.name(), "Invoices");
        assert_eq!(invoices.len(), 2);
        assert!(invoices.advance());

        let LookupResult::Range(lines) = invoices.lookup("Lines") else {
            panic!("expected range");
        };
        assert_eq!(lines.name(), "Invoices.Lines");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_container_check() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());
        let LookupResult::Range(mut invoices) = root.lookup("Invoices") else {
            panic!("expected range");
        };

        assert!(invoices.advance());
        {
            let LookupResult::Range(wrapper) = invoices.lookup("LinesContainer") else {
                panic!("expected container to pass");
            };
            // The wrapper holds the current invoice, not the lines.
            assert_eq!(wrapper.name(), "Invoices");
            assert_eq!(wrapper.len(), 1);
            let mut wrapper = wrapper;
            assert!(wrapper.advance());
            assert_eq!(wrapper.lookup("Number").as_scalar(), Some("1"));
        }
        assert!(invoices.lookup("Lines$contains").is_found());

        assert!(invoices.advance());
        assert!(!invoices.lookup("LinesContainer").is_found());
        assert!(!invoices.lookup("MissingContainer").is_found());
    }

    #[test]
    fn test_not_empty_uses_strict_emptiness() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());

        assert!(root.lookup("Title$notEmpty").is_found());
        assert!(root.lookup("Spaces$notEmpty").is_found());
        assert!(!root.lookup("Blank$notEmpty").is_found());
        assert!(!root.lookup("Missing$notEmpty").is_found());
        assert!(matches!(root.lookup("Title$notEmpty"), LookupResult::Range(_)));
    }

    #[test]
    fn test_as_whitespace_uses_strict_emptiness() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());

        assert_eq!(root.lookup("Title$asWhitespace").as_scalar(), Some(" "));
        assert_eq!(root.lookup("Spaces$asWhitespace").as_scalar(), Some(" "));
        assert!(!root.lookup("Blank$asWhitespace").is_found());
        assert!(!root.lookup("Missing$asWhitespace").is_found());
    }

    #[test]
    fn test_parent_context() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());
        let LookupResult::Range(mut invoices) = root.lookup("Invoices") else {
            panic!("expected range");
        };
        assert!(invoices.advance());

        assert!(!invoices.lookup("Title").is_found());
        assert_eq!(
            invoices.lookup("$parentContext.Title").as_scalar(),
            Some("Quarterly report")
        );
    }

    #[test]
    fn test_parent_context_at_root_succeeds_empty() {
        let doc = parse(DATA).unwrap();
        let mut root = DataSourceNode::root(&doc.root);
        assert!(root.advance());

        let result = root.lookup("$parentContext.Title");
        assert!(result.is_found());
        assert_eq!(result.as_scalar(), Some(""));
    }

    #[test]
    fn test_debug_does_not_walk_parents() {
        let doc = parse(DATA).unwrap();
        let root = DataSourceNode::root(&doc.root);
        let rendered = format!("{:?}", root);
        assert!(rendered.contains("DataSourceNode"));
        assert!(rendered.contains("has_parent: false"));
    }
}
