//! 抽出サービス連携モジュール
//!
//! 傭船契約書PDFを `POST /api/cp/parse` に送り、抽出結果を受け取る。
//! 送信前にPDFであることを確認する（サービス側の拒否を待たない）。

use crate::config::Config;
use crate::error::{AutofillError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ledger_autofill_common::{ExtractedFields, ParseMeta, ParseResponse, PARSE_ENDPOINT};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

/// PDFファイルの先頭シグネチャ
const PDF_MAGIC: &[u8] = b"%PDF";

/// 抽出結果とメタ情報
#[derive(Debug, Clone)]
pub struct Extraction {
    pub fields: ExtractedFields,
    pub meta: ParseMeta,
}

/// PDFかどうかを確認して内容を読み込む
pub fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(AutofillError::FileNotFound(path.display().to_string()));
    }

    let is_pdf_name = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf_name {
        return Err(AutofillError::NotPdf(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AutofillError::NotPdf(path.display().to_string()));
    }

    Ok(bytes)
}

/// 抽出サービスのクライアント
pub struct ExtractionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.service_url(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PARSE_ENDPOINT)
    }

    /// 傭船契約書を解析する
    ///
    /// # Arguments
    /// * `path` - PDFファイル
    /// * `deep_blue_ref` - 案件参照番号（任意、サービス側で保存に使用）
    pub async fn parse_charterparty(
        &self,
        path: &Path,
        deep_blue_ref: Option<&str>,
    ) -> Result<Extraction> {
        let bytes = read_pdf(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "charterparty.pdf".into());

        tracing::info!(file = %file_name, size = bytes.len(), url = %self.endpoint(), "uploading charterparty");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let mut form = Form::new().part("file", part);
        if let Some(reference) = deep_blue_ref.map(str::trim).filter(|r| !r.is_empty()) {
            form = form.text("DeepBlueRef", reference.to_string());
        }

        let spinner = processing_spinner();
        let result = self.http.post(self.endpoint()).multipart(form).send().await;
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(AutofillError::ExtractionService(e.to_string()));
            }
        };

        let status = response.status();
        let body = response.text().await;
        spinner.finish_and_clear();
        let body = body?;

        tracing::debug!(status = %status, bytes = body.len(), "extraction response");

        // エラー時もJSON本文にメッセージが入る
        let parsed: ParseResponse = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                AutofillError::ExtractionService(format!("レスポンスが不正です: {}", e))
            } else {
                AutofillError::ExtractionService(format!("HTTP {}", status))
            }
        })?;

        let meta = parsed.meta.clone().unwrap_or_default();
        let fields = parsed.into_fields().map_err(|e| match e {
            ledger_autofill_common::Error::Parse(message) => AutofillError::ExtractionRejected(message),
            other => AutofillError::Common(other),
        })?;

        Ok(Extraction { fields, meta })
    }
}

fn processing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Processing charterparty…");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
