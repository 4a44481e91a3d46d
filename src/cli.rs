use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roadsign-pack")]
#[command(about = "道路標識カタログと画像・学習コンテンツの照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カタログ行を画像に解決してアセットパックを生成
    Pack {
        /// 画像ツリーのルート
        #[arg(long)]
        source_root: Option<PathBuf>,

        /// 公式カタログのスプレッドシート
        #[arg(long)]
        spreadsheet: Option<PathBuf>,

        /// 出力フォルダ（毎回作り直す）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// カテゴリフォルダ名の接尾辞
        #[arg(long)]
        folder_marker: Option<String>,
    },

    /// テキストを補完し問題集を作り直す
    Enrich {
        /// 公式カタログのスプレッドシート
        #[arg(long)]
        spreadsheet: Option<PathBuf>,

        /// テキストJSON
        #[arg(long)]
        theory: Option<PathBuf>,

        /// 問題集JSON
        #[arg(long)]
        questions: Option<PathBuf>,

        /// 同じ内容を書き出す追加フォルダ（指定時は設定を置き換え）
        #[arg(long)]
        mirror: Vec<PathBuf>,
    },

    /// 画像ファイル名がどのメタデータに照合されるかを表示
    Resolve {
        /// 画像ファイル名（パス可）
        #[arg(required = true)]
        image: String,

        /// 公式カタログのスプレッドシート
        #[arg(long)]
        spreadsheet: Option<PathBuf>,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
