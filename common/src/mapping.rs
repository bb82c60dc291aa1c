//! 抽出フィールド → 台帳フィールドの対応表
//!
//! 抽出サービスのフィールド名を台帳の入力欄名に変換する。
//! 対応表にないフィールドは無視される。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 組み込みの対応表（抽出名, 台帳名）
const CP_FIELD_MAP: &[(&str, &str)] = &[
    ("VesselName", "VesselName"),
    ("ChartererName", "CharterersName"),
    ("OwnerName", "OwnersName"),
    ("BrokerName", "BrokersName"),
    ("CPDate", "CPDate"),
    ("DemurrageRate", "DemurrageRate"),
    ("CPForm", "CPForm"),
];

/// フィールド対応表
///
/// キーごとに対応先は1つだけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: HashMap<String, String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::from_pairs(CP_FIELD_MAP.iter().copied())
    }
}

impl FieldMapping {
    /// 空の対応表
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// JSON文字列から読み込み（`{"抽出名": "台帳名"}`）
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        Ok(mapping)
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 対応先の台帳フィールド名
    pub fn destination(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// 対応を追加（既存のキーは上書き）
    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.entries.insert(source.into(), destination.into());
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &FieldMapping) {
        self.entries.extend(other.entries.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
