use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_rekognition::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::detect_labels::DetectLabelsError,
    types::{self, Image, S3Object},
    Client,
};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::{
    errors::{DetectError, Result},
    request::DetectionRequest,
    traits::{Label, LabelDetector},
};

/// クライアント構築に必要な接続設定
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    pub region: String,
    pub endpoint_url: Option<String>,
    pub profile: Option<String>,
}

/// AWS Rekognition の `DetectLabels` を呼び出す検出器
///
/// SDK は非同期のため、current-thread ランタイムを内部に持ち、呼び出しごとに
/// ブロックして結果を待つ
pub struct RekognitionDetector {
    region: String,
    client: Client,
    runtime: Runtime,
}

impl RekognitionDetector {
    /// 環境の認証情報チェーンを読み込み、クライアントを構築する
    ///
    /// 認証情報が見つからない場合は `AuthError` を返す
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DetectError::Transport {
                message: format!("failed to start runtime: {e}"),
            })?;

        let sdk_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(settings.region.clone()));
            if let Some(endpoint_url) = &settings.endpoint_url {
                loader = loader.endpoint_url(endpoint_url);
            }
            if let Some(profile) = &settings.profile {
                loader = loader.profile_name(profile);
            }
            loader.load().await
        });

        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| DetectError::Auth {
                message: "no credentials provider configured".to_string(),
            })?;
        runtime
            .block_on(provider.provide_credentials())
            .map_err(|e| DetectError::Auth {
                message: format!("failed to load credentials: {}", DisplayErrorContext(&e)),
            })?;

        debug!(region = %settings.region, "rekognition client ready");

        Ok(Self {
            region: settings.region.clone(),
            client: Client::new(&sdk_config),
            runtime,
        })
    }
}

impl LabelDetector for RekognitionDetector {
    fn detect_labels(&self, request: &DetectionRequest) -> Result<Vec<Label>> {
        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(request.bucket())
                    .name(request.key())
                    .build(),
            )
            .build();

        // 上限は MAX_LABELS_LIMIT で検証済みのため i32 に収まる
        let max_labels = i32::try_from(request.max_labels())
            .map_err(|_| DetectError::config("max_labels", "out of range"))?;

        let output = self
            .runtime
            .block_on(
                self.client
                    .detect_labels()
                    .image(image)
                    .max_labels(max_labels)
                    .set_min_confidence(request.min_confidence())
                    .send(),
            )
            .map_err(|e| map_sdk_error(e, request))?;

        to_labels(output.labels())
    }

    fn region(&self) -> &str {
        &self.region
    }
}

/// SDK のラベル型を変換する。名前または信頼度が欠けている場合は `ConfigError`
fn to_labels(labels: &[types::Label]) -> Result<Vec<Label>> {
    labels
        .iter()
        .map(|label| -> Result<Label> {
            let name = label
                .name()
                .ok_or_else(|| DetectError::config("response", "label without a name"))?;
            let confidence = label.confidence().ok_or_else(|| {
                DetectError::config("response", format!("label {name} has no confidence"))
            })?;
            Ok(Label::new(name, confidence))
        })
        .collect()
}

fn map_sdk_error(err: SdkError<DetectLabelsError>, request: &DetectionRequest) -> DetectError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            let code = service_err.code().unwrap_or("Unknown");
            let detail = service_err.message().unwrap_or(message.as_str());
            DetectError::from_service(code, detail, request.bucket(), request.key())
        }
        SdkError::ConstructionFailure(_) => DetectError::config("request", message),
        _ => DetectError::Transport { message },
    }
}
