use anyhow::Context;
use clap::Parser;
use species_atlas::adapters::records::{find_record, species_names, RecordReader};
use species_atlas::domain::model::SpeciesRecord;
use species_atlas::utils::validation::{validate_file_extension, validate_required_field, Validate};
use species_atlas::utils::logger;
use species_atlas::{AtlasConfig, AtlasEngine, AtlasError, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.json_logs);

    tracing::info!("Starting species-atlas CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AtlasConfig::from_file(path).map_err(report)?
        }
        None => AtlasConfig::default(),
    };
    config.validate().map_err(report)?;

    let records = match &cli.records {
        Some(path) => {
            validate_file_extension("records", path, &["csv"]).map_err(report)?;
            RecordReader::new(&config.records.species_column, &config.records.places_column)
                .read_path(path)
                .map_err(report)
                .with_context(|| format!("reading {}", path))?
        }
        None => Vec::new(),
    };

    if cli.list {
        for name in species_names(&records) {
            println!("{}", name);
        }
        return Ok(());
    }

    let species = validate_required_field("species", &cli.species).map_err(report)?;
    let record = match &cli.places {
        Some(places) => SpeciesRecord::new(species.as_str(), places.replace("\\n", "\n")),
        None => find_record(&records, species).map_err(report)?.clone(),
    };

    let engine = AtlasEngine::new(&config).map_err(report)?;
    let selection = cli.selection(config.default_selection());
    let map = engine.map_species(&record, selection, cli.image).await;

    // 輸出給繪圖端的 JSON
    let rendered = serde_json::to_string_pretty(&map).map_err(|e| report(AtlasError::from(e)))?;
    println!("{}", rendered);

    Ok(())
}

/// Log an error with its recovery hint before handing it to anyhow.
fn report(e: AtlasError) -> anyhow::Error {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    anyhow::Error::new(e)
}
