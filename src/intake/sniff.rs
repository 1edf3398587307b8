use image::ImageFormat;

/// 拡張子から決めたMIMEタイプと実際のバイト列が一致するか確認
///
/// PNG/JPEGのみマジックバイトで判定する。HEIC/HEIFは`image`が
/// 判定できないため拡張子を信用する。
pub fn verify_format(mime_type: &str, bytes: &[u8]) -> Result<(), String> {
    let expected = match mime_type {
        "image/png" => ImageFormat::Png,
        "image/jpeg" => ImageFormat::Jpeg,
        _ => return Ok(()),
    };

    match image::guess_format(bytes) {
        Ok(actual) if actual == expected => Ok(()),
        Ok(actual) => Err(format!(
            "拡張子は{}ですが中身は{:?}です",
            mime_type, actual
        )),
        Err(_) => Err(format!("{}として認識できません", mime_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";

    #[test]
    fn test_matching_formats() {
        assert!(verify_format("image/png", PNG_MAGIC).is_ok());
        assert!(verify_format("image/jpeg", JPEG_MAGIC).is_ok());
    }

    #[test]
    fn test_mismatched_format() {
        let err = verify_format("image/jpeg", PNG_MAGIC).unwrap_err();
        assert!(err.contains("Png"));
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(verify_format("image/png", b"dummy").is_err());
    }

    #[test]
    fn test_heic_is_trusted() {
        assert!(verify_format("image/heic", b"anything").is_ok());
    }
}
