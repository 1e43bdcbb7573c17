use std::io;
use std::path::{Path, PathBuf};

use super::CaptureTimestamp;
use crate::tool::ToolKind;

/// Outcome of [`ensure_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    Created,
    AlreadyPresent,
}

/// Creates `dir` and its parents. Tolerates siblings racing to create the same tree.
pub async fn ensure_dir(dir: &Path) -> io::Result<DirState> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => return Ok(DirState::AlreadyPresent),
        Ok(_) => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", dir.display()),
            ))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    match tokio::fs::create_dir_all(dir).await {
        Ok(()) => Ok(DirState::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {
            Ok(DirState::AlreadyPresent)
        }
        Err(e) => Err(e),
    }
}

/// `{label}_{timestamp}.{ext}`, optionally inside `{base}/{label}_{timestamp}/`.
pub fn output_path(
    base: &Path,
    label: &str,
    timestamp: &CaptureTimestamp,
    ext: &str,
    nest_in_subfolder: bool,
) -> PathBuf {
    let stem = format!("{label}_{timestamp}");
    let dir = if nest_in_subfolder {
        base.join(&stem)
    } else {
        base.to_path_buf()
    };
    dir.join(format!("{stem}.{ext}"))
}

/// Hands out artifact paths for one combo capture.
///
/// All tools share one timestamp, so distinct labels never collide. Two allocations
/// for the same label within the same second resolve to the same path.
#[derive(Debug, Clone)]
pub struct OutputAllocator {
    root: PathBuf,
    timestamp: CaptureTimestamp,
}

impl OutputAllocator {
    pub fn new(root: impl Into<PathBuf>, timestamp: CaptureTimestamp) -> Self {
        Self {
            root: root.into(),
            timestamp,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn timestamp(&self) -> &CaptureTimestamp {
        &self.timestamp
    }

    /// Resolves the absolute artifact path and creates its directory.
    pub async fn allocate(
        &self,
        label: &str,
        ext: &str,
        nest_in_subfolder: bool,
    ) -> io::Result<PathBuf> {
        let root = std::path::absolute(&self.root)?;
        let path = output_path(&root, label, &self.timestamp, ext, nest_in_subfolder);
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        Ok(path)
    }

    pub async fn allocate_for(
        &self,
        kind: ToolKind,
        nest_in_subfolder: bool,
    ) -> io::Result<PathBuf> {
        self.allocate(kind.as_str(), kind.extension(), nest_in_subfolder)
            .await
    }
}
