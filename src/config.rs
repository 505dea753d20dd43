use clap::Parser;

use crate::errors::{DetectError, Result};
use crate::model::ClientSettings;
use crate::request::{DetectionRequest, MAX_LABELS_LIMIT};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET: &str = "my-rekognition-bucket-21320";
pub const DEFAULT_KEY: &str = "test-image.jpeg";
pub const DEFAULT_MAX_LABELS: u32 = 10;

/// Detect labels in an image stored in S3 using AWS Rekognition.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Service region
    #[arg(short, long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Bucket holding the image
    #[arg(short, long, env = "DETECT_BUCKET", default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Object key of the image
    #[arg(short, long, env = "DETECT_KEY", default_value = DEFAULT_KEY)]
    pub key: String,

    /// Maximum number of labels to return
    #[arg(
        short,
        long,
        env = "DETECT_MAX_LABELS",
        default_value_t = DEFAULT_MAX_LABELS,
        value_parser = check_max_labels,
    )]
    pub max_labels: u32,

    /// Drop labels below this confidence (0-100)
    #[arg(long, env = "DETECT_MIN_CONFIDENCE", value_parser = check_confidence)]
    pub min_confidence: Option<f32>,

    /// Override the service endpoint, e.g. a local emulator
    #[arg(long, env = "DETECT_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            key: DEFAULT_KEY.to_string(),
            max_labels: DEFAULT_MAX_LABELS,
            min_confidence: None,
            endpoint_url: None,
            profile: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    /// 検証済みのリクエストを組み立てる
    pub fn request(&self) -> Result<DetectionRequest> {
        DetectionRequest::new(
            self.bucket.as_str(),
            self.key.as_str(),
            self.max_labels,
            self.min_confidence,
        )
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile: self.profile.clone(),
        }
    }
}

// clap のエラーにも種別名が出るよう、DetectError の表示をそのまま使う
fn check_max_labels(s: &str) -> std::result::Result<u32, String> {
    let value: u32 = s.parse().map_err(|_| {
        DetectError::config("max_labels", format!("{s} is not a non-negative integer")).to_string()
    })?;
    if value > MAX_LABELS_LIMIT {
        return Err(DetectError::config(
            "max_labels",
            format!("must not exceed {MAX_LABELS_LIMIT} (got {value})"),
        )
        .to_string());
    }
    Ok(value)
}

fn check_confidence(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| {
        DetectError::config("min_confidence", format!("{s} is not a number")).to_string()
    })?;
    if !(0.0..=100.0).contains(&value) {
        return Err(DetectError::config(
            "min_confidence",
            format!("must be within 0..=100 (got {value})"),
        )
        .to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parsed_defaults() {
        let parsed = Config::try_parse_from(["rekognition-labels"]).unwrap();
        let defaults = Config::default();
        // 環境変数で上書きされていない場合のみ比較する
        if std::env::var_os("DETECT_BUCKET").is_none() {
            assert_eq!(parsed.bucket, defaults.bucket);
        }
        if std::env::var_os("DETECT_MAX_LABELS").is_none() {
            assert_eq!(parsed.max_labels, defaults.max_labels);
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "rekognition-labels",
            "--bucket",
            "other-bucket",
            "--key",
            "dir/photo.png",
            "--max-labels",
            "0",
            "--min-confidence",
            "75.5",
            "--region",
            "eu-west-1",
        ])
        .unwrap();

        assert_eq!(config.bucket, "other-bucket");
        assert_eq!(config.key, "dir/photo.png");
        assert_eq!(config.max_labels, 0);
        assert_eq!(config.min_confidence, Some(75.5));
        assert_eq!(config.client_settings().region, "eu-west-1");
    }

    #[test]
    fn test_max_labels_over_limit_rejected_at_parse() {
        let result = Config::try_parse_from(["rekognition-labels", "--max-labels", "1001"]);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("ConfigError"), "{message}");
        assert!(check_max_labels("-1").unwrap_err().contains("ConfigError"));
        assert_eq!(check_max_labels("1000"), Ok(1000));
    }

    #[test]
    fn test_confidence_parser() {
        assert_eq!(check_confidence("0"), Ok(0.0));
        assert_eq!(check_confidence("100"), Ok(100.0));
        assert!(check_confidence("100.5").unwrap_err().starts_with("ConfigError"));
        let message = Config::try_parse_from(["rekognition-labels", "--min-confidence=-3"])
            .unwrap_err()
            .to_string();
        assert!(message.contains("ConfigError"), "{message}");
        assert!(check_confidence("abc").is_err());
    }

    #[test]
    fn test_request_from_config() {
        let config = Config {
            max_labels: 5,
            ..Config::default()
        };
        let request = config.request().unwrap();
        assert_eq!(request.bucket(), DEFAULT_BUCKET);
        assert_eq!(request.key(), DEFAULT_KEY);
        assert_eq!(request.max_labels(), 5);
    }
}
