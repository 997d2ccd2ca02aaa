/*!
 * Tests for file utilities and artifact handling
 */

use std::fs;

use stringsmith::app_config::{OutputConfig, TargetLanguage};
use stringsmith::file_utils::{ArtifactOutcome, ArtifactWriter, FileManager};
use stringsmith::resources::{OutputItem, OutputNode, OutputTree};

use crate::common::{create_temp_dir, create_test_file};

fn target(code: &str) -> TargetLanguage {
    TargetLanguage {
        code: code.to_string(),
        call_api: true,
        is_default: false,
    }
}

#[test]
fn test_writeToFile_withMissingParents_shouldCreateThem() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("a").join("b").join("c.txt");
    FileManager::write_to_file(&path, "content").unwrap();
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "content");
}

#[test]
fn test_removeDirIfEmpty_shouldOnlyRemoveEmptyDirectories() {
    let dir = create_temp_dir().unwrap();
    let file = create_test_file(dir.path(), "full/keep.txt", "x").unwrap();
    fs::create_dir(dir.path().join("empty")).unwrap();

    assert!(!FileManager::remove_dir_if_empty(dir.path().join("full")).unwrap());
    assert!(file.exists());
    assert!(FileManager::remove_dir_if_empty(dir.path().join("empty")).unwrap());
    assert!(!FileManager::remove_dir_if_empty(dir.path().join("missing")).unwrap());
}

#[test]
fn test_commit_withTimestampEnabled_shouldMentionGenerationTime() {
    let dir = create_temp_dir().unwrap();
    let options = OutputConfig {
        header_timestamp: true,
        ..OutputConfig::default()
    };
    let writer = ArtifactWriter::new(dir.path(), options);

    let mut tree = OutputTree::new("pt-rBR");
    tree.nodes.push(OutputNode::Leaf {
        name: "ok".to_string(),
        item: OutputItem::new("Certo"),
    });
    let outcome = writer.commit(&tree, &target("pt-rBR")).unwrap();

    let path = dir.path().join("values-pt-rBR").join("strings.xml");
    assert_eq!(outcome, ArtifactOutcome::Written(path.clone()));
    let xml = fs::read_to_string(path).unwrap();
    assert!(xml.contains("Portuguese (pt-rBR)"));
    assert!(xml.contains("Generated "));
}

#[test]
fn test_commit_withEmptyTreeInOutputBase_shouldNeverRemoveBase() {
    let dir = create_temp_dir().unwrap();
    let base = dir.path().join("out");
    fs::create_dir(&base).unwrap();
    let writer = ArtifactWriter::new(&base, OutputConfig::default());

    let outcome = writer.commit(&OutputTree::new("fr"), &target("fr")).unwrap();
    assert_eq!(outcome, ArtifactOutcome::NotWritten);
    assert!(base.exists());
    assert!(!base.join("values-fr").exists());
}
