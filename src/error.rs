use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutofillError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("PDFの傭船契約書のみ対応しています: {0}")]
    NotPdf(String),

    #[error("抽出サービス呼び出しエラー: {0}")]
    ExtractionService(String),

    #[error("CP解析に失敗しました: {0}")]
    ExtractionRejected(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ledger_autofill_common::Error),
}

pub type Result<T> = std::result::Result<T, AutofillError>;
