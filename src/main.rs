use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rtaxon::{ConfigManager, JsonlWriter, RecordNormalizer, RecordReader};

/// Normalize heterogeneous product records into a closed taxonomy
#[derive(Parser, Debug)]
#[command(name = "rtaxon", version)]
#[command(about = "Normalize product records for search indexing", long_about = None)]
struct Args {
    /// Input JSON file (array, {"products": [...]}, or a single object)
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSONL file
    #[arg(short, long, default_value = "normalized_products.jsonl")]
    output: PathBuf,

    /// Directory holding main_category_map.json and product_type_synonyms.json
    #[arg(long, default_value = "maps")]
    maps_dir: PathBuf,

    /// Number of "Other" product names sampled in the report
    #[arg(long, default_value_t = 10)]
    sample_limit: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ConfigManager::custom()
        .maps_dir(args.maps_dir)
        .other_sample_limit(args.sample_limit)
        .verbose(args.verbose)
        .build();

    // 1. 加载并编译映射表（失败即退出，不产生任何输出）
    let normalizer = RecordNormalizer::new(config)
        .await
        .context("failed to load taxonomy maps")?;

    // 2. 读取输入
    let values = RecordReader::read_file(&args.input)
        .await
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!("已读取原始记录 {} 条", values.len());

    // 3. 归一化
    let output = normalizer.normalize_batch(values);

    // 4. 写出 JSONL
    JsonlWriter::write_file(&args.output, &output.records)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    // 5. 打印报告
    println!("{}", output.stats);
    if !output.failures.is_empty() {
        println!("SKIPPED RECORDS: {}", output.failures.len());
        for failure in &output.failures {
            println!("  #{}: {}", failure.index, failure.reason);
        }
    }

    Ok(())
}
