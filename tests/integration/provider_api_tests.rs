/*!
 * Request shape and failure isolation tests against closure-driven transports
 */

use serde_json::json;
use std::fs;

use stringsmith::app_config::HttpMethod;
use stringsmith::app_controller::Controller;
use stringsmith::errors::{AppError, ProviderError};
use stringsmith::providers::{MockTransport, TransportResponse};

use crate::common::mock_providers::{FnTransport, target_of, uppercase_response};
use crate::common::{HELLO_DAYS_XML, artifact, create_strings_xml, create_temp_dir, init_logging, test_config};

#[tokio::test]
async fn test_run_withGetMethod_shouldSendQueryAndConfiguredHeaders() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let mut config = test_config(dir.path(), &source, &["fr"], 10);
    config.api.http_method = HttpMethod::Get;
    config.api.base_url = "https://translate.example.com/v2".to_string();
    config.api.extra_body = json!({"format": "text", "_headers": {"Authorization": "Bearer t0ken"}});

    let controller = Controller::with_transport(config, FnTransport::new(|r| Ok(uppercase_response(r))));
    controller.run().await.unwrap();

    let requests = controller.transport().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert!(request.body.is_none());
    assert_eq!(
        request.url,
        "https://translate.example.com/v2?format=text&q=Hello+%25s&q=Mon&q=Tue&source=en&target=fr"
    );
    assert_eq!(
        request.headers,
        [("Authorization".to_string(), "Bearer t0ken".to_string())]
    );

    let fr = fs::read_to_string(artifact(dir.path(), "values-fr")).unwrap();
    assert!(fr.contains(r#"<string name="hello">HELLO %S</string>"#));
}

#[tokio::test]
async fn test_run_withNestedResponsePath_shouldExtractTexts() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let mut config = test_config(dir.path(), &source, &["de"], 10);
    config.api.texts_key = "texts".to_string();
    config.api.target_language_key = "to".to_string();
    config.api.source_language_key = None;
    config.api.response_path = "data.translations".to_string();

    let mock = MockTransport::echo().with_keys("texts", "to", "data.translations");
    let controller = Controller::with_transport(config, mock);
    controller.run().await.unwrap();

    let request = &controller.transport().requests()[0];
    assert!(!request.payload.contains_key("source"));
    assert_eq!(request.payload["to"], "de");

    let de = fs::read_to_string(artifact(dir.path(), "values-de")).unwrap();
    assert!(de.contains("<item>[de] Tue</item>"));
}

#[tokio::test]
async fn test_run_withFailingBatchInOneLanguage_shouldIsolateFailure() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let config = test_config(dir.path(), &source, &["fr", "de"], 1);

    // Second batch of German fails at the transport level
    let transport = FnTransport::new(|request| {
        let texts = request.texts("q");
        if target_of(request) == "de" && texts == ["Mon"] {
            return Err(ProviderError::ConnectionError("connection reset".to_string()));
        }
        Ok(uppercase_response(request))
    });
    let controller = Controller::with_transport(config, transport);
    let result = controller.run().await;

    match result {
        Err(AppError::TranslationFailed { languages }) => assert_eq!(languages, ["de"]),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(controller.transport().requests().len(), 6);

    let de = fs::read_to_string(artifact(dir.path(), "values-de")).unwrap();
    assert!(de.contains(r#"<string name="hello">HELLO %S</string>"#));
    assert!(de.contains("<item>Mon<!-- TODO: Translation failed --></item>"));
    assert!(de.contains("<item>TUE</item>"));

    let fr = fs::read_to_string(artifact(dir.path(), "values-fr")).unwrap();
    assert!(fr.contains("<item>MON</item>"));
    assert!(!fr.contains("TODO"));
}

#[tokio::test]
async fn test_run_withServerError_shouldKeepSourceTexts() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let source = create_strings_xml(dir.path(), HELLO_DAYS_XML).unwrap();
    let config = test_config(dir.path(), &source, &["fr"], 10);

    let transport = FnTransport::new(|_| Ok(TransportResponse::new(503, "overloaded")));
    let controller = Controller::with_transport(config, transport);
    assert!(matches!(
        controller.run().await,
        Err(AppError::TranslationFailed { .. })
    ));

    let fr = fs::read_to_string(artifact(dir.path(), "values-fr")).unwrap();
    assert_eq!(fr.matches("TODO: Translation failed").count(), 3);
}
