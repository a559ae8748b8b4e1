use crate::backup::back_up_file;
use crate::client::ShrinkService;
use crate::constants::{FAILED_BACKUP, FAILED_DOWNLOAD, FAILED_UPLOAD};
use crate::delay::Delay;
use crate::error::{ShrinkError, Result};
use crate::formats::ImageKind;
use crate::response::ShrinkResponse;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkOptions {
    /// Copy each original to `<name>_original.<ext>` before replacing it.
    pub backup: bool,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self { backup: true }
    }
}

/// How a single file ended up. Every variant is final for that file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Shrunk { saved_percent: i64 },
    FailedUpload,
    FailedBackup,
    FailedDownload,
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Shrunk { saved_percent } => write!(f, "OK! Saved {}%", saved_percent),
            FileOutcome::FailedUpload => f.write_str(FAILED_UPLOAD),
            FileOutcome::FailedBackup => f.write_str(FAILED_BACKUP),
            FileOutcome::FailedDownload => f.write_str(FAILED_DOWNLOAD),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShrinkSummary {
    pub shrunk: usize,
    pub failed_upload: usize,
    pub failed_backup: usize,
    pub failed_download: usize,
}

impl ShrinkSummary {
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Shrunk { .. } => self.shrunk += 1,
            FileOutcome::FailedUpload => self.failed_upload += 1,
            FileOutcome::FailedBackup => self.failed_backup += 1,
            FileOutcome::FailedDownload => self.failed_download += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.shrunk + self.failed()
    }

    pub fn failed(&self) -> usize {
        self.failed_upload + self.failed_backup + self.failed_download
    }
}

/// Runs files one at a time through upload, backup, download and report.
pub struct Shrinker<S, D> {
    service: S,
    delay: D,
    options: ShrinkOptions,
}

impl<S: ShrinkService, D: Delay> Shrinker<S, D> {
    pub fn new(service: S, delay: D, options: ShrinkOptions) -> Self {
        Self {
            service,
            delay,
            options,
        }
    }

    /// Shrinks every path in order, writing one progress line per file to `out`.
    ///
    /// Per-file failures are reported on `out` and counted in the summary;
    /// only a failure to write to `out` is returned as an error.
    pub async fn run<W: Write>(&self, paths: &[PathBuf], out: &mut W) -> Result<ShrinkSummary> {
        let start_time = Instant::now();
        let mut summary = ShrinkSummary::default();

        for path in paths {
            let outcome = self.shrink_file(path, out).await?;
            summary.record(outcome);
        }

        info!(
            "Shrunk {} of {} files ({} failed) in {:.2?}",
            summary.shrunk,
            summary.total(),
            summary.failed(),
            start_time.elapsed()
        );
        Ok(summary)
    }

    /// Processes one file and prints `Shrinking <path>... <outcome>`.
    pub async fn shrink_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<FileOutcome> {
        write!(out, "Shrinking {}... ", path.display())?;
        out.flush()?;

        let outcome = self.process(path).await;

        writeln!(out, "{}", outcome)?;
        Ok(outcome)
    }

    async fn process(&self, path: &Path) -> FileOutcome {
        self.delay.pause().await;

        let response = match self.upload(path).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Upload of {:?} failed: {}", path, e);
                return FileOutcome::FailedUpload;
            }
        };

        if self.options.backup {
            if let Err(e) = back_up_file(path).await {
                warn!("Backup of {:?} failed: {}", path, e);
                return FileOutcome::FailedBackup;
            }
        }

        if let Err(e) = self.download(&response.output.url, path).await {
            warn!("Download of {} into {:?} failed: {}", response.output.url, path, e);
            return FileOutcome::FailedDownload;
        }

        FileOutcome::Shrunk {
            saved_percent: response.saved_percent(),
        }
    }

    async fn upload(&self, path: &Path) -> Result<ShrinkResponse> {
        let data = tokio::fs::read(path).await?;
        let kind = ImageKind::from_path(path);
        let original_size = data.len();

        let body = self.service.upload(data, kind).await?;
        let response = ShrinkResponse::from_json(&body)?;

        debug!(
            "{:?}: {} {} bytes shrunk to {:?} bytes (ratio {})",
            path, kind, original_size, response.output.size, response.output.ratio
        );
        Ok(response)
    }

    /// Downloads into a temp file next to the file `path` resolves to, then
    /// renames it over that file. A symlinked `path` keeps pointing at the
    /// shrunk target. The original stays intact unless the whole body arrived.
    async fn download(&self, url: &str, path: &Path) -> Result<u64> {
        let target = tokio::fs::canonicalize(path).await?;
        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let staging = tempfile::Builder::new()
            .prefix(".tiny-")
            .tempfile_in(dir)?
            .into_temp_path();

        let written = self.service.download(url, &staging).await?;

        let permissions = tokio::fs::metadata(&target).await?.permissions();
        tokio::fs::set_permissions(&staging, permissions).await?;

        staging.persist(&target).map_err(|e| ShrinkError::Persist {
            path: target.clone(),
            source: e,
        })?;
        Ok(written)
    }
}
