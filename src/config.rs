use crate::error::{AutofillError, Result};
use ledger_autofill_common::FieldMapping;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 抽出サービスURLを上書きする環境変数
pub const SERVICE_URL_ENV: &str = "LEDGER_SERVICE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service_url: String,
    pub timeout_seconds: u64,
    /// 組み込みの対応表に追加・上書きする対応
    pub field_mapping: Option<FieldMapping>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:5000".into(),
            timeout_seconds: 120,
            field_mapping: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AutofillError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ledger-autofill").join("config.json"))
    }

    /// 抽出サービスのURL（環境変数を優先）
    pub fn service_url(&self) -> String {
        match std::env::var(SERVICE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => self.service_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn set_service_url(&mut self, url: String) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AutofillError::Config(format!("URLが不正です: {}", url)));
        }
        self.service_url = url;
        self.save()
    }

    /// 組み込みの対応表に設定の上書きを反映したもの
    pub fn field_mapping(&self) -> FieldMapping {
        let mut mapping = FieldMapping::default();
        if let Some(custom) = &self.field_mapping {
            mapping.merge(custom);
        }
        mapping
    }
}
