/*!
 * Common test utilities for the stringsmith test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use stringsmith::app_config::Config;

// Re-export the mock transports module
pub mod mock_providers;

/// Source file with a leaf and an ordered group
pub const HELLO_DAYS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="hello">Hello %s</string>
    <string-array name="days">
        <item>Mon</item>
        <item>Tue</item>
    </string-array>
</resources>
"#;

/// Source file exercising every resource kind
pub const FULL_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <!-- Main screen -->
    <string name="app_name" translatable="false">Acme &amp; Co</string>
    <string name="welcome">Welcome to "Acme"</string>
    <string name="empty"></string>
    <string name="discount">50% off</string>
    <string-array name="colors">
        <item>Red</item>
        <item></item>
        <item>Blue</item>
    </string-array>
    <plurals name="files">
        <item quantity="one">%d file</item>
        <item quantity="other">%d files</item>
    </plurals>
    <dimen name="margin">16dp</dimen>
</resources>
"#;

/// Route `log` output to the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, parent directories included
pub fn create_test_file(dir: &Path, relative_path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes `content` as `res/values/strings.xml` under `dir`
pub fn create_strings_xml(dir: &Path, content: &str) -> Result<PathBuf> {
    create_test_file(dir, "res/values/strings.xml", content)
}

/// Configuration reading `source` and writing under `dir/out`
pub fn test_config(dir: &Path, source: &Path, targets: &[&str], batch_size: usize) -> Config {
    let mut config = Config::default();
    config.paths.source_file = source.to_path_buf();
    config.paths.output_dir = dir.join("out");
    config.languages.target_languages = targets.iter().map(|s| s.to_string()).collect();
    config.api.batch_size = batch_size;
    config
}

/// Artifact path of a language under the output directory of `test_config`
pub fn artifact(dir: &Path, values_dir: &str) -> PathBuf {
    dir.join("out").join(values_dir).join("strings.xml")
}
