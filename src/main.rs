use clap::Parser;
use roadsign_common::{enrich, MetaIndex};
use roadsign_pack::{catalogue, cli, config, error, pipeline};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        eprintln!("✘ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Pack { source_root, spreadsheet, output, folder_marker } => {
            println!("🚦 roadsign-pack - アセットパック生成\n");

            if let Some(path) = source_root {
                config.source_root = path;
            }
            if let Some(path) = spreadsheet {
                config.spreadsheet = path;
            }
            if let Some(path) = output {
                config.asset_root = path;
            }
            if let Some(marker) = folder_marker {
                config.folder_marker = marker;
            }

            println!("[1/2] カタログと画像を照合中...");
            let summary = pipeline::build_pack(&config, cli.verbose)?;
            println!("✔ {}件の標識を解決（{}カテゴリ）\n", summary.signs, summary.categories);

            println!("[2/2] 結果");
            println!("  コピーした画像: {}", summary.copied_images);
            println!("  画像なし: {}", summary.missing_images.len());
            if summary.skipped_rows > 0 {
                println!("  画像名なしの行: {}", summary.skipped_rows);
            }
            if !summary.missing_images.is_empty() && cli.verbose {
                println!("  画像なしのファイル名: {}", summary.missing_images.join(", "));
            }
            println!("✔ パック出力: {}", summary.pack_file.path.display());
            println!("  sha256: {}", summary.pack_file.sha256);

            println!("\n✅ 完了");
        }

        Commands::Enrich { spreadsheet, theory, questions, mirror } => {
            println!("📘 roadsign-pack - テキスト・問題集の補完\n");

            if let Some(path) = spreadsheet {
                config.spreadsheet = path;
            }
            if let Some(path) = theory {
                config.theory_path = path;
            }
            if let Some(path) = questions {
                config.questions_path = path;
            }
            if !mirror.is_empty() {
                config.mirror_dirs = mirror;
            }

            println!("[1/2] メタデータで補完中...");
            let summary = pipeline::run_enrichment(&config, cli.verbose)?;
            println!("✔ メタデータ {}件", summary.meta_rows);
            println!(
                "✔ 標識 {}件を更新（照合 {}件 / 未照合 {}件）\n",
                summary.stats.entries,
                summary.stats.matched,
                summary.stats.unmatched.len()
            );

            println!("[2/2] 問題集 {}件を出力", summary.questions);
            for file in summary.theory_files.iter().chain(summary.question_files.iter()) {
                println!("  {}  {}", file.sha256, file.path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Resolve { image, spreadsheet } => {
            if let Some(path) = spreadsheet {
                config.spreadsheet = path;
            }
            let index = catalogue::load_meta_index(&config.spreadsheet)?;
            print_resolution(&index, &image);
        }

        Commands::Config { show, init } => {
            if init {
                let path = config.save()?;
                println!("✔ 設定ファイルを作成しました: {}", path.display());
            }

            if show || !init {
                println!("設定: {}", Config::config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn print_resolution(index: &MetaIndex, image: &str) {
    let file_name = Path::new(image)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| image.to_string());

    match index.lookup_with_stage(&file_name) {
        Some((meta, stage)) => {
            let out = enrich::enrich(
                Some(meta),
                enrich::DEFAULT_TITLE,
                enrich::DEFAULT_CATEGORY,
                enrich::DEFAULT_DRIVER_ACTION,
            );
            println!("✔ {} → {} ({})", file_name, meta.image_name, stage);
            println!("  コード: {}", meta.code);
            println!("  タイトル: {}", out.title);
            println!("  カテゴリ: {}", out.category);
            println!("  行動: {}", out.driver_action);
            println!("  覚え方: {}", out.memory_hint);
        }
        None => println!("⚠ {} に一致するメタデータはありません", file_name),
    }
}
