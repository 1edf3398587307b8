use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "caliper")]
#[command(about = "定規写真から寸法表と技術図面を生成するAIノギス", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真から寸法を解析（目視計測＋公式値の比較）
    Analyze {
        /// 画像ファイルまたはフォルダ（png/jpg/jpeg/heic/heif）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 解析結果JSONの保存先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 写真から4面図の技術図面を生成
    Blueprint {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 寸法ラベルに使う解析結果JSON（表と図面の数値を一致させる）
        #[arg(short, long)]
        analysis: Option<PathBuf>,

        /// 図面の保存先（デフォルト: gemini_blueprint.png）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 寸法解析から図面生成まで一括実行
    Run {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 出力ディレクトリ（result.json と gemini_blueprint.png を保存）
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// 保存済みの解析結果を表示
    Show {
        /// 解析結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 解析結果をExcelに出力
    Export {
        /// 解析結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（デフォルト: dimensions.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
