use crate::errors::Result;
use crate::request::DetectionRequest;

/// 画像から検出されたラベル（名前と信頼度）
///
/// `confidence` は 0〜100 のパーセンテージ
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// ラベル検出サービスの抽象化
///
/// 実装はリージョンに紐づいたクライアントを保持し、1回の呼び出しで
/// サービスが返した順序のままラベルを返す
pub trait LabelDetector {
    fn detect_labels(&self, request: &DetectionRequest) -> Result<Vec<Label>>;

    /// 接続先のリージョン
    fn region(&self) -> &str;
}
