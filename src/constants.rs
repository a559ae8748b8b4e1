use std::time::Duration;

pub const SHRINK_ENDPOINT: &str = "https://tinyjpg.com/backend/opt/shrink";
pub const SERVICE_ORIGIN: &str = "https://tinyjpg.com";
pub const SERVICE_REFERER: &str = "https://tinyjpg.com/";

// The endpoint rejects requests that do not look like they come from the web page.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds of the courtesy pause before each upload, inclusive.
pub const MIN_DELAY_MS: u64 = 500;
pub const MAX_DELAY_MS: u64 = 1000;

pub const BACKUP_SUFFIX: &str = "_original";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const USAGE: &str = "\
Usage: tiny cat.png dog.jpg  # shrink supplied files
       tiny .                # shrink images in folder";

// Per-file console messages
pub const FAILED_UPLOAD: &str = "Failed upload";
pub const FAILED_BACKUP: &str = "Failed backup";
pub const FAILED_DOWNLOAD: &str = "Failed download";
pub const FOLDER_EXTRA_ARGS_WARNING: &str =
    "First argument is a folder, ignoring the rest of args.";
