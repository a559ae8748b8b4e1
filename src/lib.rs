pub mod backup;
pub mod cli;
pub mod client;
pub mod constants;
pub mod delay;
pub mod error;
pub mod formats;
pub mod inputs;
pub mod logger;
pub mod pipeline;
pub mod response;

pub use backup::{back_up_file, backup_path};
#[cfg(any(test, feature = "test-export-mocks"))]
pub use client::MockShrinkService;
pub use client::{ShrinkService, TinyClient};
pub use delay::{Delay, NoDelay, RandomDelay};
pub use error::{Result, ShrinkError};
pub use formats::{is_image_path, ImageKind};
pub use inputs::{resolve, Resolution};
pub use pipeline::{FileOutcome, ShrinkOptions, ShrinkSummary, Shrinker};
pub use response::{saved_percent, ShrinkResponse};
