//! File-based sample source.
//!
//! Reads each patient's reading from `{dir}/{id}.json`, in the same JSON
//! shape the monitoring endpoint returns. A producer that rewrites those
//! files periodically looks like a live endpoint; static files replay a
//! single reading forever (which the store smooths into one entry per
//! second).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use gaitwatch_types::{PatientId, Reading};

use super::{wire, SampleSource, SourceError};

/// A sample source backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source reading from `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("replay: {}", dir.display());
        Self { dir, description }
    }

    /// Path of the file holding `id`'s reading.
    pub fn path_for(&self, id: PatientId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl SampleSource for FileSource {
    async fn fetch(&self, id: PatientId) -> Result<Reading, SourceError> {
        let content = tokio::fs::read_to_string(self.path_for(id)).await?;
        wire::decode(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::wire::tests::sample_body;
    use tempfile::TempDir;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/replay");
        assert_eq!(source.path_for(PatientId(2)), Path::new("/tmp/replay/2.json"));
        assert_eq!(source.description(), "replay: /tmp/replay");
    }

    #[tokio::test]
    async fn test_fetch_reads_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("1.json"), sample_body(6)).unwrap();

        let source = FileSource::new(dir.path());
        let reading = source.fetch(PatientId(1)).await.unwrap();

        assert_eq!(reading.identity.firstname, "Jan");
        assert_eq!(reading.sample.trace_time(), "14:05:09");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());

        let err = source.fetch(PatientId(5)).await.unwrap_err();

        assert!(matches!(err, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("3.json"), "not valid json").unwrap();

        let source = FileSource::new(dir.path());
        let err = source.fetch(PatientId(3)).await.unwrap_err();

        assert!(matches!(err, SourceError::Parse(_)));
    }
}
