/*!
 * Full app lifecycle tests: source file in, artifacts out, mock service in between
 */

use std::fs;

use stringsmith::app_controller::Controller;
use stringsmith::errors::{AppError, ConfigError};
use stringsmith::file_utils::ArtifactOutcome;
use stringsmith::providers::{MockReply, MockTransport};
use stringsmith::resources::{ResourceNode, parse_resources};

use crate::common::{
    FULL_XML, HELLO_DAYS_XML, artifact, create_strings_xml, create_temp_dir, create_test_file,
    init_logging, test_config,
};

#[tokio::test]
async fn test_run_withBatchSizeOne_shouldSendOneTextPerCall() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let config = test_config(dir.path(), &source, &["fr", "de"], 1);

    let controller = Controller::with_transport(config, MockTransport::echo());
    let summary = controller.run().await.unwrap();

    let mock = controller.transport();
    assert_eq!(mock.call_count(), 6);
    assert!(mock.sent_texts().iter().all(|texts| texts.len() == 1));
    let first_targets: Vec<String> = mock
        .requests()
        .iter()
        .map(|r| r.payload["target"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(first_targets, ["fr", "fr", "fr", "de", "de", "de"]);

    let fr = fs::read_to_string(artifact(dir.path(), "values-fr")).unwrap();
    assert!(fr.contains(r#"<string name="hello">[fr] Hello %s</string>"#));
    assert!(fr.contains("<item>[fr] Mon</item>"));
    assert!(fr.contains("<item>[fr] Tue</item>"));
    assert!(!fr.contains("%%s"));

    let de = fs::read_to_string(artifact(dir.path(), "values-de")).unwrap();
    assert!(de.contains(r#"<string name="hello">[de] Hello %s</string>"#));

    assert!(summary.is_success());
    assert_eq!(summary.report("fr").unwrap().batches, 3);
}

#[tokio::test]
async fn test_run_withShortResponseForOneLanguage_shouldOnlyFailThatLanguage() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let config = test_config(dir.path(), &source, &["fr", "de"], 3);

    // fr gets 2 texts back for 3 sent, de is echoed
    let controller = Controller::with_transport(
        config,
        MockTransport::scripted([MockReply::Texts(vec!["A".into(), "B".into()])]),
    );
    let result = controller.run().await;

    match result {
        Err(AppError::TranslationFailed { languages }) => assert_eq!(languages, ["fr"]),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(controller.transport().call_count(), 2);

    let fr = fs::read_to_string(artifact(dir.path(), "values-fr")).unwrap();
    assert!(fr.contains(r#"<string name="hello">Hello %s<!-- TODO: Translation failed --></string>"#));
    assert!(fr.contains("<item>Mon<!-- TODO: Translation failed --></item>"));

    let de = fs::read_to_string(artifact(dir.path(), "values-de")).unwrap();
    assert!(de.contains("[de] Mon"));
    assert!(!de.contains("TODO"));
}

#[tokio::test]
async fn test_run_withFixedSourceAsNonDefaultTarget_shouldFailBeforeAnyCall() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let mut config = test_config(dir.path(), &source, &["fr", "de"], 10);
    config.languages.fixed_source_language = Some("de".to_string());

    let controller = Controller::with_transport(config, MockTransport::echo());
    let result = controller.run().await;

    assert!(matches!(
        result,
        Err(AppError::Config(ConfigError::AmbiguousSourceTarget { .. }))
    ));
    assert_eq!(controller.transport().call_count(), 0);
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn test_run_withDefaultLanguageTarget_shouldCopySourceUnchanged() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), FULL_XML).unwrap();
    let config = test_config(dir.path(), &source, &["en"], 10);

    let controller = Controller::with_transport(config, MockTransport::echo());
    controller.run().await.unwrap();
    assert_eq!(controller.transport().call_count(), 0);

    let written = fs::read_to_string(artifact(dir.path(), "values")).unwrap();
    let copy = parse_resources(&written).unwrap();
    let original = parse_resources(FULL_XML).unwrap();
    // First node is the generated header comment
    assert!(matches!(&copy.nodes[0], ResourceNode::Comment(text) if text.contains("Auto-generated")));
    assert_eq!(&copy.nodes[1..], &original.nodes[..]);
    assert!(written.contains(r#"<string name="app_name" translatable="false">Acme &amp; Co</string>"#));
    assert!(written.contains(r#"<dimen name="margin">16dp</dimen>"#));
}

#[tokio::test]
async fn test_run_withFullSource_shouldEscapeAndKeepOrder() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), FULL_XML).unwrap();
    let config = test_config(dir.path(), &source, &["fr"], 50);

    let controller = Controller::with_transport(config, MockTransport::echo());
    controller.run().await.unwrap();

    // welcome, discount, colors[0], colors[2], files[one], files[other]
    assert_eq!(controller.transport().sent_texts()[0].len(), 6);

    let written = fs::read_to_string(artifact(dir.path(), "values-fr")).unwrap();
    assert!(written.contains(r#"<string name="welcome">[fr] Welcome to \"Acme\"</string>"#));
    assert!(written.contains(r#"<string name="discount">[fr] 50%% off</string>"#));
    assert!(written.contains(r#"<item quantity="one">[fr] %d file</item>"#));
    assert!(!written.contains("dimen"));

    let tree = parse_resources(&written).unwrap();
    let names: Vec<&str> = tree.nodes.iter().filter_map(ResourceNode::name).collect();
    assert_eq!(names, ["app_name", "welcome", "empty", "discount", "colors", "files"]);
    match &tree.nodes[6] {
        ResourceNode::OrderedGroup { items, .. } => {
            let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
            assert_eq!(texts, ["[fr] Red", "", "[fr] Blue"]);
        }
        other => panic!("unexpected node {:?}", other),
    }
}

#[tokio::test]
async fn test_run_withNothingLeftForLanguage_shouldDeleteStaleArtifact() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(
        dir.path(),
        r#"<resources><!-- only dimensions --><dimen name="margin">16dp</dimen></resources>"#,
    )
    .unwrap();
    let stale = create_test_file(dir.path(), "out/values-fr/strings.xml", "<resources/>").unwrap();
    let config = test_config(dir.path(), &source, &["fr"], 10);

    let controller = Controller::with_transport(config, MockTransport::echo());
    let summary = controller.run().await.unwrap();

    assert!(!stale.exists());
    assert!(!dir.path().join("out").join("values-fr").exists());
    assert!(dir.path().join("out").exists());
    assert_eq!(
        summary.report("fr").unwrap().artifact,
        ArtifactOutcome::Deleted(stale)
    );
}

#[tokio::test]
async fn test_run_withDryRun_shouldNotCallOrWrite() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let config = test_config(dir.path(), &source, &["fr"], 2);

    let controller = Controller::with_transport(config, MockTransport::echo()).dry_run(true);
    let summary = controller.run().await.unwrap();

    assert_eq!(controller.transport().call_count(), 0);
    assert!(!dir.path().join("out").exists());
    assert_eq!(summary.report("fr").unwrap().batches, 2);
}

#[tokio::test]
async fn test_run_withMissingSource_shouldReturnFileError() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let config = test_config(dir.path(), &dir.path().join("missing.xml"), &["fr"], 2);

    let controller = Controller::with_transport(config, MockTransport::echo());
    assert!(matches!(controller.run().await, Err(AppError::File(_))));
}
