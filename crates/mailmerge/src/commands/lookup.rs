//! Lookup command implementation

use mailmerge_source::DataSourceNode;
use mailmerge_xml::XmlDocument;

use super::describe_lookup;

/// Resolve each key against the first record of the root range.
pub fn execute(doc: &XmlDocument, keys: &[String]) -> Vec<String> {
    let mut root = DataSourceNode::root(&doc.root);
    root.advance();

    keys.iter()
        .map(|key| format!("{}: {}", key, describe_lookup(&root.lookup(key))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_lines() {
        let doc = mailmerge_xml::parse(
            r#"<Root>
  <Name>Noord</Name>
  <Logo Type="ImageRef"><Path>/logo.png</Path></Logo>
  <Offices><Office>Gent</Office><Office>Brugge</Office></Offices>
</Root>"#,
        )
        .unwrap();
        let keys: Vec<String> = ["Name", "Offices", "Logo(w:10)", "Fax", "$whitespace"]
            .into_iter()
            .map(String::from)
            .collect();

        assert_eq!(
            execute(&doc, &keys),
            vec![
                r#"Name: scalar: "Noord""#,
                "Offices: range: Offices (2 elements)",
                "Logo(w:10): image: /logo.png",
                "Fax: not found",
                r#"$whitespace: scalar: " ""#,
            ]
        );
    }
}
