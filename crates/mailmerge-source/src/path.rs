/*
 * path.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Dotted path resolution and child-range matching.

use mailmerge_xml::XmlElement;

/// Resolve a dotted path against an element.
///
/// Each `.`-separated segment descends one level to the first child whose
/// local name matches exactly (case-sensitive). An empty segment or a
/// missing child fails the whole resolution; there are no partial results.
pub fn resolve<'a>(path: &str, root: &'a XmlElement) -> Option<&'a XmlElement> {
    let mut element = root;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        element = element.element(segment)?;
    }
    Some(element)
}

/// Child names that count as members of a range named `name`.
///
/// Always `name` itself. A trailing `s` adds the singular (`Invoices` ->
/// `Invoice`), and a singular ending in `ie` adds the `-y` form
/// (`Properties` -> `Propertie`, `Property`). Other irregular plurals are
/// not handled.
pub fn candidate_child_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    let Some(without_s) = name.strip_suffix('s') else {
        return names;
    };
    names.push(without_s.to_string());
    if let Some(stem) = without_s.strip_suffix("ie") {
        names.push(format!("{}y", stem));
    }
    names
}

/// Direct children of `element` that belong to its range, in document order.
pub fn matching_children(element: &XmlElement) -> Vec<&XmlElement> {
    let names = candidate_child_names(&element.name);
    element
        .elements()
        .filter(|child| names.iter().any(|n| *n == child.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn customer() -> XmlElement {
        XmlElement::new("Root").with_child(
            XmlElement::new("Customer")
                .with_child(XmlElement::new("Name").with_text("Acme"))
                .with_child(
                    XmlElement::new("Address")
                        .with_child(XmlElement::new("City").with_text("Gent")),
                ),
        )
    }

    #[test]
    fn test_resolve_descends_by_exact_name() {
        let root = customer();
        let city = resolve("Customer.Address.City", &root).unwrap();
        assert_eq!(city.value(), "Gent");
    }

    #[test]
    fn test_resolve_missing_segment_is_not_found() {
        let root = customer();
        assert!(resolve("Customer.Address.Zip", &root).is_none());
        assert!(resolve("Customer.Phone.City", &root).is_none());
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let root = customer();
        assert!(resolve("customer.Name", &root).is_none());
    }

    #[test]
    fn test_resolve_empty_segment_is_not_found() {
        let root = customer();
        assert!(resolve("", &root).is_none());
        assert!(resolve("Customer..Name", &root).is_none());
        assert!(resolve("Customer.Name.", &root).is_none());
        assert!(resolve(".Customer", &root).is_none());
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_child_names("Invoice"), vec!["Invoice"]);
        assert_eq!(candidate_child_names("Invoices"), vec!["Invoices", "Invoice"]);
        assert_eq!(
            candidate_child_names("Properties"),
            vec!["Properties", "Propertie", "Property"]
        );
        // Irregular plurals are deliberately not generalized.
        assert_eq!(candidate_child_names("Addresses"), vec!["Addresses", "Addresse"]);
        assert_eq!(candidate_child_names("Children"), vec!["Children"]);
    }

    #[test]
    fn test_matching_children_plural() {
        let invoices = XmlElement::new("Invoices")
            .with_child(XmlElement::new("Invoice").with_text("1"))
            .with_child(XmlElement::new("Summary"))
            .with_child(XmlElement::new("Invoices").with_text("2"))
            .with_child(XmlElement::new("Invoice").with_text("3"));

        let values: Vec<String> = matching_children(&invoices).iter().map(|e| e.value()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_matching_children_ies() {
        let properties = XmlElement::new("Properties")
            .with_child(XmlElement::new("Property"))
            .with_child(XmlElement::new("Propertie"))
            .with_child(XmlElement::new("Properties"))
            .with_child(XmlElement::new("Propertys"));

        let names: Vec<&str> = matching_children(&properties)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Property", "Propertie", "Properties"]);
    }

    #[test]
    fn test_matching_children_singular_name() {
        let line = XmlElement::new("Line")
            .with_child(XmlElement::new("Line"))
            .with_child(XmlElement::new("Amount"));
        assert_eq!(matching_children(&line).len(), 1);
    }
}
