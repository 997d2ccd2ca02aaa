/*!
 * Tests for the strings.xml reader and writer
 */

use stringsmith::errors::ResourceError;
use stringsmith::resources::{
    OutputItem, OutputNode, OutputTree, ResourceNode, WriteOptions, parse_resources,
    write_resources,
};

use crate::common::FULL_XML;

#[test]
fn test_parseResources_withFullSource_shouldKeepCommentsAndFlags() {
    let tree = parse_resources(FULL_XML).unwrap();
    assert_eq!(tree.resource_count(), 7);
    assert_eq!(tree.nodes[0], ResourceNode::Comment(" Main screen ".to_string()));
    assert!(!tree.nodes[1].is_translatable());

    match &tree.nodes[5] {
        ResourceNode::OrderedGroup { name, items, .. } => {
            assert_eq!(name, "colors");
            assert_eq!(items.len(), 3);
            assert!(items[1].is_empty());
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[test]
fn test_parseResources_withMalformedXml_shouldFail() {
    let result = parse_resources("<resources><string name=\"a\">x</resources>");
    assert!(matches!(result, Err(ResourceError::Xml(_))));
}

#[test]
fn test_parseResources_withoutRoot_shouldFail() {
    assert!(parse_resources("").is_err());
}

#[test]
fn test_writeResources_withGroupsAndHeader_shouldIndentAndAnnotate() {
    let mut tree = OutputTree::new("fr");
    tree.nodes.push(OutputNode::Comment(" Section ".to_string()));
    tree.nodes.push(OutputNode::KeyedGroup {
        name: "files".to_string(),
        items: vec![
            ("one".to_string(), OutputItem::new("%d fichier")),
            ("other".to_string(), OutputItem::failed("%d files", "TODO: Translation failed")),
        ],
    });

    let options = WriteOptions {
        indent: 2,
        header: Some(" generated ".to_string()),
    };
    let xml = write_resources(&tree, &options).unwrap();

    let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
  <!-- generated -->
  <!-- Section -->
  <plurals name="files">
    <item quantity="one">%d fichier</item>
    <item quantity="other">%d files<!-- TODO: Translation failed --></item>
  </plurals>
</resources>
"#;
    assert_eq!(xml, expected);
}

#[test]
fn test_writeResources_withEscapedText_shouldNotEscapeAgain() {
    let mut tree = OutputTree::new("fr");
    tree.nodes.push(OutputNode::Leaf {
        name: "amp".to_string(),
        item: OutputItem::new(r"Tom &amp; Jerry\'s"),
    });
    let xml = write_resources(&tree, &WriteOptions::default()).unwrap();
    assert!(xml.contains(r#"<string name="amp">Tom &amp; Jerry\'s</string>"#));

    let reparsed = parse_resources(&xml).unwrap();
    match &reparsed.nodes[0] {
        ResourceNode::Leaf { value, .. } => assert_eq!(value.text, r"Tom & Jerry\'s"),
        other => panic!("unexpected node {:?}", other),
    }
}
