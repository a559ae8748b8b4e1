#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a mix of candidate and non-candidate files. Returns the candidates
/// in file-name order.
pub fn create_test_image_files(temp_dir: &Path) -> Vec<PathBuf> {
    let jpg_file = temp_dir.join("a.jpg");
    let jpeg_file = temp_dir.join("b.jpeg");
    let png_file = temp_dir.join("c.png");

    for (path, data) in [
        (&jpg_file, &b"fake jpg data"[..]),
        (&jpeg_file, &b"fake jpeg data"[..]),
        (&png_file, &b"fake png data"[..]),
    ] {
        File::create(path).unwrap().write_all(data).unwrap();
    }

    File::create(temp_dir.join("d.webp"))
        .unwrap()
        .write_all(b"fake webp data")
        .unwrap();
    File::create(temp_dir.join("e.txt"))
        .unwrap()
        .write_all(b"not an image")
        .unwrap();
    File::create(temp_dir.join("F.PNG"))
        .unwrap()
        .write_all(b"upper case extension")
        .unwrap();

    vec![jpg_file, jpeg_file, png_file]
}

pub fn create_nested_directory_structure(temp_dir: &Path) -> PathBuf {
    let subdir = temp_dir.join("subdir");
    std::fs::create_dir(&subdir).unwrap();

    File::create(subdir.join("nested.jpg"))
        .unwrap()
        .write_all(b"nested image")
        .unwrap();

    subdir
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn shrink_body(url: &str, ratio: f64) -> String {
    format!(r#"{{"output":{{"url":"{}","ratio":{}}}}}"#, url, ratio)
}
