//! 画像の取り込み
//!
//! 指定されたファイル/フォルダを読み込み `UploadedImage` のリストにする。
//! 読み込みは並列だが、結果は入力順を保つ。

mod sniff;

pub use sniff::verify_format;

use crate::error::{CaliperError, Result};
use optical_caliper_common::image::mime_type_for_extension;
use optical_caliper_common::UploadedImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn accepted_mime(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| mime_type_for_extension(&ext.to_string_lossy()))
}

/// フォルダ直下の対応画像をファイル名順で列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(CaliperError::FileNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && accepted_mime(p).is_some())
        .collect();

    images.sort_by_key(|p| display_name(p));

    Ok(images)
}

/// 入力パスを画像ファイルのリストに展開
///
/// ファイルは指定順のまま、フォルダはその位置に直下の画像を展開する
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(CaliperError::FileNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            files.extend(scan_folder(path)?);
        } else if accepted_mime(path).is_some() {
            files.push(path.clone());
        } else {
            return Err(CaliperError::UnsupportedImage(path.display().to_string()));
        }
    }

    Ok(files)
}

/// 1ファイルを読み込む
pub fn load_image(path: &Path) -> Result<UploadedImage> {
    let name = display_name(path);
    let mime_type = accepted_mime(path)
        .ok_or_else(|| CaliperError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)
        .map_err(|e| CaliperError::ImageLoad(format!("{}: {}", name, e)))?;

    if bytes.is_empty() {
        return Err(CaliperError::ImageLoad(format!("{}: 空のファイルです", name)));
    }

    verify_format(mime_type, &bytes)
        .map_err(|reason| CaliperError::UnsupportedImage(format!("{}: {}", name, reason)))?;

    let image = UploadedImage::from_bytes(name, mime_type, &bytes);
    if image.exceeds_recommended_size() {
        warn!(
            file = image.file_name(),
            bytes = image.byte_len(),
            "10MBを超える画像です（送信は継続）"
        );
    }
    Ok(image)
}

/// 入力パスから画像をすべて読み込む
///
/// 1つでも失敗したら何も返さない
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<UploadedImage>> {
    let files = expand_paths(paths)?;
    debug!(count = files.len(), "画像を読み込み中");

    files.par_iter().map(|p| load_image(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";

    fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(CaliperError::FileNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "c.jpg", JPEG);
        write(temp.path(), "a.png", PNG);
        write(temp.path(), "b.HEIC", b"heic");
        write(temp.path(), "readme.txt", b"text");
        fs::create_dir(temp.path().join("sub")).unwrap();
        write(&temp.path().join("sub"), "d.png", PNG);

        let names: Vec<String> = scan_folder(temp.path())
            .unwrap()
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a.png", "b.HEIC", "c.jpg"]);
    }

    #[test]
    fn test_expand_paths_keeps_argument_order() {
        let temp = TempDir::new().unwrap();
        let z = write(temp.path(), "z.png", PNG);
        let a = write(temp.path(), "a.jpg", JPEG);

        let files = expand_paths(&[z.clone(), a.clone()]).unwrap();
        assert_eq!(files, vec![z, a]);
    }

    #[test]
    fn test_expand_paths_rejects_unsupported_file() {
        let temp = TempDir::new().unwrap();
        let gif = write(temp.path(), "anim.gif", b"GIF89a");
        assert!(matches!(
            expand_paths(&[gif]),
            Err(CaliperError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_load_images_order_and_derivation() {
        let temp = TempDir::new().unwrap();
        let paths = vec![
            write(temp.path(), "3.png", PNG),
            write(temp.path(), "1.jpg", JPEG),
            write(temp.path(), "2.heif", b"heif-bytes"),
        ];

        let images = load_images(&paths).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.file_name()).collect();
        assert_eq!(names, vec!["3.png", "1.jpg", "2.heif"]);

        assert_eq!(images[0].mime_type(), "image/png");
        assert_eq!(images[1].mime_type(), "image/jpeg");
        assert_eq!(images[2].mime_type(), "image/heif");
        for image in &images {
            assert_eq!(
                image.preview_url(),
                format!("data:{};base64,{}", image.mime_type(), image.base64_data())
            );
        }
    }

    #[test]
    fn test_load_images_all_or_nothing() {
        let temp = TempDir::new().unwrap();
        let good = write(temp.path(), "good.png", PNG);
        let bad = write(temp.path(), "bad.jpg", b"not a jpeg");

        let result = load_images(&[good, bad]);
        assert!(matches!(result, Err(CaliperError::UnsupportedImage(msg)) if msg.contains("bad.jpg")));
    }

    #[test]
    fn test_load_image_empty_file() {
        let temp = TempDir::new().unwrap();
        let empty = write(temp.path(), "empty.png", b"");
        assert!(matches!(load_image(&empty), Err(CaliperError::ImageLoad(_))));
    }
}
