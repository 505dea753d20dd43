use std::path::Path;

use image::ImageFormat;

use crate::errors::{DetectError, Result};

/// `MaxLabels` の上限。これを超える値はリクエスト前に拒否する
pub const MAX_LABELS_LIMIT: u32 = 1000;

/// 1回の実行で送信するラベル検出リクエスト
///
/// `DetectionRequest::new` を通してのみ構築され、構築後は変更されない。
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    bucket: String,
    key: String,
    max_labels: u32,
    min_confidence: Option<f32>,
}

impl DetectionRequest {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        max_labels: u32,
        min_confidence: Option<f32>,
    ) -> Result<Self> {
        let bucket = bucket.into().trim().to_string();
        let key = key.into();

        if bucket.is_empty() {
            return Err(DetectError::config("bucket", "must not be empty"));
        }
        if key.is_empty() {
            return Err(DetectError::config("key", "must not be empty"));
        }
        if max_labels > MAX_LABELS_LIMIT {
            return Err(DetectError::config(
                "max_labels",
                format!("must not exceed {MAX_LABELS_LIMIT} (got {max_labels})"),
            ));
        }
        if let Some(value) = min_confidence {
            if !(0.0..=100.0).contains(&value) {
                return Err(DetectError::config(
                    "min_confidence",
                    format!("must be within 0..=100 (got {value})"),
                ));
            }
        }
        check_media(&key)?;

        Ok(Self {
            bucket,
            key,
            max_labels,
            min_confidence,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn max_labels(&self) -> u32 {
        self.max_labels
    }

    pub const fn min_confidence(&self) -> Option<f32> {
        self.min_confidence
    }
}

/// サービスが解析できるのは JPEG と PNG のみ。拡張子がない、または未知の場合は
/// サービス側の判定に任せる
fn check_media(key: &str) -> Result<()> {
    match ImageFormat::from_path(Path::new(key)) {
        Ok(ImageFormat::Jpeg | ImageFormat::Png) | Err(_) => Ok(()),
        Ok(format) => Err(DetectError::UnsupportedMedia {
            message: format!("{key}: {format:?} images are not supported, use JPEG or PNG"),
        }),
    }
}
