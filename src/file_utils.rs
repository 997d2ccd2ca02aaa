use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_config::{OutputConfig, TargetLanguage};
use crate::language_utils::display_name;
use crate::resources::{OutputTree, WriteOptions, write_resources};

// @module: File and directory utilities

/// File name of every generated artifact
pub const ARTIFACT_FILE_NAME: &str = "strings.xml";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Delete a file; returns whether it existed
    pub fn remove_file_if_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Ok(false);
        }
        fs::remove_file(path).with_context(|| format!("Failed to delete file: {:?}", path))?;
        Ok(true)
    }

    /// Delete a directory if it has no entries; returns whether it was deleted
    pub fn remove_dir_if_empty<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if !Self::dir_exists(path) {
            return Ok(false);
        }
        let mut entries = fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {:?}", path))?;
        if entries.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(path).with_context(|| format!("Failed to delete directory: {:?}", path))?;
        Ok(true)
    }
}

/// What happened to the artifact of one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// Written with at least one resource
    Written(PathBuf),
    /// Had no resources; a previous artifact at this path was deleted
    Deleted(PathBuf),
    /// Had no resources and nothing was on disk
    NotWritten,
    /// Dry run
    Skipped,
}

impl fmt::Display for ArtifactOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written(path) => write!(f, "wrote {}", path.display()),
            Self::Deleted(path) => write!(f, "deleted {}", path.display()),
            Self::NotWritten => write!(f, "nothing written"),
            Self::Skipped => write!(f, "dry run, nothing written"),
        }
    }
}

/// Writes and cleans up `values[-<code>]/strings.xml` artifacts under one base directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    options: OutputConfig,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>, options: OutputConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `values` for the default language, `values-<code>` otherwise
    pub fn values_dir_name(target: &TargetLanguage) -> String {
        if target.is_default {
            "values".to_string()
        } else {
            format!("values-{}", target.code)
        }
    }

    pub fn artifact_path(&self, target: &TargetLanguage) -> PathBuf {
        self.output_dir
            .join(Self::values_dir_name(target))
            .join(ARTIFACT_FILE_NAME)
    }

    /// Header comment for a language, if enabled
    pub fn header_for(&self, language: &str) -> Option<String> {
        if !self.options.header_comment {
            return None;
        }
        let mut header = format!(
            " Auto-generated by stringsmith for {}. Manual edits will be overwritten. ",
            display_name(language)
        );
        if self.options.header_timestamp {
            header.push_str(&format!(
                "Generated {} ",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ));
        }
        Some(header)
    }

    /// Write the artifact of one language, or remove stale output when it has no resources
    pub fn commit(&self, tree: &OutputTree, target: &TargetLanguage) -> Result<ArtifactOutcome> {
        let path = self.artifact_path(target);

        if !tree.has_meaningful_entries() {
            return self.clean_up(&path, &target.code);
        }

        let options = WriteOptions {
            indent: self.options.indent,
            header: self.header_for(&target.code),
        };
        let xml = write_resources(tree, &options)
            .with_context(|| format!("Failed to serialize resources for '{}'", target.code))?;
        FileManager::write_to_file(&path, &xml)?;
        info!("[{}] Wrote {} resources to {}", target.code, tree.meaningful_count(), path.display());
        Ok(ArtifactOutcome::Written(path))
    }

    /// Only `values-*` directories below the output base are ever removed
    fn is_locale_dir(&self, dir: &Path) -> bool {
        dir != self.output_dir
            && dir
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("values-"))
    }

    fn clean_up(&self, path: &Path, language: &str) -> Result<ArtifactOutcome> {
        let deleted = FileManager::remove_file_if_exists(path)?;
        if deleted {
            info!("[{}] No resources, deleted stale {}", language, path.display());
        } else {
            debug!("[{}] No resources, nothing to write", language);
        }

        if let Some(dir) = path.parent().filter(|dir| deleted && self.is_locale_dir(dir)) {
            if FileManager::remove_dir_if_empty(dir)? {
                debug!("[{}] Deleted empty directory {}", language, dir.display());
            }
        }

        Ok(if deleted {
            ArtifactOutcome::Deleted(path.to_path_buf())
        } else {
            ArtifactOutcome::NotWritten
        })
    }
}
