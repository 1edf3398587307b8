use clap::Parser;
use optical_caliper::{cli, config, error, export, progress, report};
use optical_caliper::credential::PromptSelector;
use optical_caliper::gateway::HttpTransport;
use optical_caliper::Caliper;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use optical_caliper_common::{AnalysisResult, Operation, ViewState};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_into_session(
    caliper: &mut Caliper<HttpTransport, PromptSelector>,
    paths: &[PathBuf],
) -> Result<()> {
    println!("[1/3] 写真を読み込み中...");
    let count = caliper.add_paths(paths)?;
    println!("✔ {}枚の写真を読み込み\n", count);
    Ok(())
}

fn save_result_to(result: &AnalysisResult, path: &Path) -> Result<()> {
    export::save_analysis(result, path)?;
    println!("✔ 結果を保存: {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze { paths, output } => {
            println!("📏 caliper - 寸法解析\n");

            let mut caliper = Caliper::connect(&config)?;
            load_into_session(&mut caliper, &paths)?;

            println!("[2/3] AI解析中...");
            let spinner = progress::spinner("目盛りの読み取りと公式値の検索中...");
            progress::finish_after(&spinner, caliper.analyze()).await?;
            caliper.outcome(Operation::Analyze)?;
            println!("✔ 解析完了\n");

            print!("{}", report::render_view(ViewState::analysis(caliper.session())));

            if let (Some(output), Some(result)) = (output, caliper.session().analysis()) {
                println!("\n[3/3] 結果を保存中...");
                save_result_to(result, &export::output_path_for(&output, export::RESULT_FILE_NAME))?;
            }

            println!("\n✅ 解析完了");
        }

        Commands::Blueprint { paths, analysis, output } => {
            println!("📐 caliper - 図面生成\n");

            let mut caliper = Caliper::connect(&config)?;
            load_into_session(&mut caliper, &paths)?;

            // 表と同じ数値を図面に使うため、解析結果を先にセッションへ戻す
            if let Some(analysis_path) = analysis {
                let prior = export::load_analysis(&analysis_path)?;
                println!("- 寸法を固定: {}", prior.identified_name);
                caliper.session_mut().restore_analysis(prior);
            }

            println!("[2/3] 図面生成中...");
            let spinner = progress::spinner("4面図を描画中...");
            progress::finish_after(&spinner, caliper.generate_blueprint()).await?;
            caliper.outcome(Operation::Blueprint)?;

            if let Some(image) = caliper.session().blueprint() {
                let path = output
                    .map(|o| export::output_path_for(&o, export::BLUEPRINT_FILE_NAME))
                    .unwrap_or_else(|| PathBuf::from(export::BLUEPRINT_FILE_NAME));
                println!("[3/3] 図面を保存中...");
                export::save_blueprint(image, &path)?;
                println!("✔ 図面を保存: {}", path.display());
            }

            println!("\n✅ 図面生成完了");
        }

        Commands::Run { paths, output } => {
            println!("📏 caliper - 寸法解析＋図面生成\n");

            let mut caliper = Caliper::connect(&config)?;
            load_into_session(&mut caliper, &paths)?;

            println!("[2/3] AI解析中...");
            let spinner = progress::spinner("目盛りの読み取りと公式値の検索中...");
            progress::finish_after(&spinner, caliper.analyze()).await?;
            caliper.outcome(Operation::Analyze)?;
            print!("{}", report::render_view(ViewState::analysis(caliper.session())));
            if let Some(result) = caliper.session().analysis() {
                save_result_to(result, &output.join(export::RESULT_FILE_NAME))?;
            }

            println!("\n[3/3] 図面生成中...");
            let spinner = progress::spinner("4面図を描画中...");
            progress::finish_after(&spinner, caliper.generate_blueprint()).await?;
            caliper.outcome(Operation::Blueprint)?;
            if let Some(image) = caliper.session().blueprint() {
                let path = output.join(export::BLUEPRINT_FILE_NAME);
                export::save_blueprint(image, &path)?;
                println!("✔ 図面を保存: {}", path.display());
            }

            println!("\n✅ すべて完了");
        }

        Commands::Show { input } => {
            let result = export::load_analysis(&input)?;
            print!("{}", report::render_analysis(&result));
        }

        Commands::Export { input, output } => {
            println!("📄 caliper - エクスポート\n");

            let result = export::load_analysis(&input)?;
            let output_path = output
                .map(|o| export::output_path_for(&o, export::EXCEL_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(export::EXCEL_FILE_NAME));

            println!("- Excelを生成中...");
            export::excel::generate_excel(&result, &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());
        }

        Commands::Config { set_api_key, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!("APIキー: {}", config.masked_api_key());
                println!("エンドポイント: {}", config.api_base());
                println!("解析モデル: {}", config.analysis_model);
                println!("図面モデル: {}", config.blueprint_model);
                println!("思考トークン上限: {}", config.thinking_budget);
                println!("図面サイズ: {} ({})", config.image_size, config.aspect_ratio);
            }
        }
    }

    Ok(())
}
