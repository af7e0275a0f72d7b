use crate::preview::PreviewStep;
use clap::{Parser, Subcommand, ValueEnum};
use shiptrack_ui_common::HidePolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shiptrack-ui")]
#[command(about = "ShipTrack UI マークアップ検査・プログレスバープレビュー", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/shiptrack-ui/config.json）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTMLテンプレートがブラウザ側の前提を満たすか検査
    Check {
        /// テンプレートファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 警告も失敗扱いにする
        #[arg(long)]
        strict: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 進捗値の列をターミナルで再生 (例: 0 40 80 100@1500 50@1800)
    Preview {
        /// PERCENT または PERCENT@MS（開始からの経過ms）
        #[arg(required = true, allow_hyphen_values = true)]
        steps: Vec<PreviewStep>,

        /// 非表示タイマーの扱い（省略時は設定ファイルの値）
        #[arg(long)]
        policy: Option<PolicyArg>,

        /// 実時間を待たずに再生
        #[arg(long)]
        instant: bool,
    },

    /// 設定の表示・初期化
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    CancelOnUpdate,
    Untracked,
}

impl From<PolicyArg> for HidePolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::CancelOnUpdate => HidePolicy::CancelOnUpdate,
            PolicyArg::Untracked => HidePolicy::Untracked,
        }
    }
}
