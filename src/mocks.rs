use std::cell::{Cell, RefCell};

use crate::errors::{DetectError, Result};
use crate::request::DetectionRequest;
use crate::traits::{Label, LabelDetector};

/// テスト用のモック検出器
///
/// 事前に設定したラベル列（またはエラー）を返し、呼び出し回数を記録する
#[derive(Debug)]
pub struct MockLabelDetector {
    region: String,
    response: RefCell<Option<Result<Vec<Label>>>>,
    calls: Cell<usize>,
}

impl MockLabelDetector {
    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self {
            region: "us-east-1".to_string(),
            response: RefCell::new(Some(Ok(labels))),
            calls: Cell::new(0),
        }
    }

    pub fn with_error(error: DetectError) -> Self {
        Self {
            region: "us-east-1".to_string(),
            response: RefCell::new(Some(Err(error))),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl LabelDetector for MockLabelDetector {
    fn detect_labels(&self, request: &DetectionRequest) -> Result<Vec<Label>> {
        self.calls.set(self.calls.get() + 1);
        // 応答は一度だけ返す。2回目以降はサービス側の失敗として扱う
        self.response.borrow_mut().take().unwrap_or_else(|| {
            Err(DetectError::Service {
                code: "MockExhausted".to_string(),
                message: format!(
                    "no response left for s3://{}/{}",
                    request.bucket(),
                    request.key()
                ),
            })
        })
    }

    fn region(&self) -> &str {
        &self.region
    }
}

/// テスト用のファクトリー関数
pub fn create_mock_detector() -> MockLabelDetector {
    MockLabelDetector::with_labels(vec![
        Label::new("Person", 98.7),
        Label::new("Outdoors", 95.2),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_detector_returns_labels_once() -> Result<()> {
        let mock = create_mock_detector();
        let request = DetectionRequest::new("bucket", "image.jpeg", 10, None)?;

        let labels = mock.detect_labels(&request)?;
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].name, "Person");
        assert!(mock.detect_labels(&request).is_err());
        assert_eq!(mock.calls(), 2);
        Ok(())
    }
}
