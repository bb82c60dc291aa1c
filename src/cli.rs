use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledger-autofill")]
#[command(about = "傭船契約書の抽出結果を台帳入力フォームに自動入力するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 抽出結果JSONをフォームに自動入力
    Apply {
        /// 抽出結果JSONファイル（レスポンス全体または fields のみ）
        #[arg(required = true)]
        extraction: PathBuf,

        /// 入力フォームJSON（デフォルト: 空の Add Entry フォーム）
        #[arg(short, long)]
        form: Option<PathBuf>,

        /// 選択肢JSONファイル（{"列名": ["選択肢", ...]}）
        #[arg(short, long)]
        choices: Option<PathBuf>,

        /// 保存用ペイロードの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 案件参照番号（DeepBlueRef）
        #[arg(short = 'r', long)]
        deep_blue_ref: Option<String>,

        /// 追加のフィールド対応JSON（{"抽出名": "台帳名"}）
        #[arg(short, long)]
        mapping: Option<PathBuf>,
    },

    /// 傭船契約書PDFを抽出サービスで解析して自動入力
    Parse {
        /// 傭船契約書PDF
        #[arg(required = true)]
        pdf: PathBuf,

        /// 入力フォームJSON
        #[arg(short, long)]
        form: Option<PathBuf>,

        /// 選択肢JSONファイル
        #[arg(short, long)]
        choices: Option<PathBuf>,

        /// 保存用ペイロードの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 案件参照番号（DeepBlueRef）
        #[arg(short = 'r', long)]
        deep_blue_ref: Option<String>,

        /// 追加のフィールド対応JSON（{"抽出名": "台帳名"}）
        #[arg(short, long)]
        mapping: Option<PathBuf>,
    },

    /// 値を選択肢とあいまい照合
    Match {
        /// 照合する値
        #[arg(required = true)]
        value: String,

        /// 選択肢
        #[arg(required = true, num_args = 1..)]
        options: Vec<String>,
    },

    /// 日付文字列を YYYY-MM-DD に正規化
    Date {
        /// 日付文字列
        #[arg(required = true)]
        raw: String,
    },

    /// 設定管理
    Config {
        /// 抽出サービスのURLを設定
        #[arg(long)]
        set_service_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
