use crate::constants::FOLDER_EXTRA_ARGS_WARNING;
use crate::error::{ShrinkError, Result};
use crate::formats::is_image_path;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No arguments at all.
    Usage,
    /// Files to shrink, in processing order. May be empty.
    Images {
        paths: Vec<PathBuf>,
        /// Set when the first argument was a folder and further arguments were dropped.
        ignored_extra_args: bool,
    },
}

impl Resolution {
    /// Warning to show before processing, if any.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Resolution::Images {
                ignored_extra_args: true,
                ..
            } => Some(FOLDER_EXTRA_ARGS_WARNING),
            _ => None,
        }
    }
}

/// Turns raw CLI arguments into the list of files to shrink.
///
/// # Returns
/// * `Ok(Resolution::Usage)` - when `args` is empty
/// * `Ok(Resolution::Images)` - qualifying images from a folder or an explicit file list
/// * `Err(ShrinkError::InvalidPath)` - when the first argument is not a usable path
/// * `Err(ShrinkError::WalkdirError)` - when the folder cannot be listed
pub fn resolve<A: AsRef<OsStr>>(args: &[A]) -> Result<Resolution> {
    let Some(first) = args.first() else {
        return Ok(Resolution::Usage);
    };

    let first_path = parse_path(first.as_ref())?;

    if first_path.is_dir() {
        let paths = collect_folder_images(&first_path)?;
        debug!("Found {} images in {:?}", paths.len(), first_path);
        return Ok(Resolution::Images {
            paths,
            ignored_extra_args: args.len() > 1,
        });
    }

    let paths = args
        .iter()
        .filter_map(|arg| parse_path(arg.as_ref()).ok())
        .filter(|path| {
            let keep = is_image_path(path);
            if !keep {
                debug!("Skipping {:?}: not an existing jpg/jpeg/png file", path);
            }
            keep
        })
        .collect();

    Ok(Resolution::Images {
        paths,
        ignored_extra_args: false,
    })
}

/// Accepts any non-empty argument without NUL bytes as a path. The argument
/// does not have to be valid UTF-8.
pub fn parse_path(arg: &OsStr) -> Result<PathBuf> {
    if arg.is_empty() || arg.as_encoded_bytes().contains(&0) {
        return Err(ShrinkError::InvalidPath(arg.to_string_lossy().into_owned()));
    }
    Ok(PathBuf::from(arg))
}

/// Lists the qualifying images directly inside `dir`, sorted by file name.
/// Subdirectories are neither returned nor descended into.
pub fn collect_folder_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if is_image_path(path) {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}
