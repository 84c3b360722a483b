// File: src/services/fetcher/sink.rs
use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub const LINE_PREFIX: &str = "Dólar: ";

/// The single line the fetch client leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedLine(String);

impl FetchedLine {
    pub fn new(bid: &str) -> Self {
        Self(format!("{}{}", LINE_PREFIX, bid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FetchedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds exactly one `FetchedLine`; every write replaces the previous one.
#[async_trait]
pub trait TraitSink: Send + Sync {
    async fn replace(&self, line: &FetchedLine) -> io::Result<()>;

    fn location(&self) -> &Path;
}

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TraitSink for FileSink {
    async fn replace(&self, line: &FetchedLine) -> io::Result<()> {
        tokio::fs::write(&self.path, line.as_str()).await
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
