pub mod toml_config;

pub use toml_config::AtlasConfig;

#[cfg(feature = "cli")]
use crate::domain::model::SourceSelection;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "species-atlas")]
#[command(about = "Map a species record from local place names, GBIF and iNaturalist")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV file with one row per species
    #[arg(short, long)]
    pub records: Option<String>,

    /// Species display name, as written in the record file
    #[arg(short, long)]
    pub species: Option<String>,

    /// Newline-separated place names, used instead of a record file
    #[arg(long)]
    pub places: Option<String>,

    #[arg(long, help = "Include the GBIF occurrence layer")]
    pub gbif: bool,

    #[arg(long, help = "Include the iNaturalist observation layer")]
    pub inaturalist: bool,

    #[arg(long, help = "Leave out the local gazetteer layer")]
    pub no_local: bool,

    #[arg(long, help = "Look up a species image on GBIF")]
    pub image: bool,

    #[arg(long, help = "List species names in the record file and exit")]
    pub list: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags only ever switch layers on, except `--no-local`.
    pub fn selection(&self, defaults: SourceSelection) -> SourceSelection {
        SourceSelection {
            local: defaults.local && !self.no_local,
            gbif: defaults.gbif || self.gbif,
            inaturalist: defaults.inaturalist || self.inaturalist,
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_layer_defaults() {
        let cli = CliConfig::parse_from([
            "species-atlas",
            "--species",
            "Procambarus clarkii",
            "--gbif",
            "--no-local",
        ]);

        let selection = cli.selection(SourceSelection::local_only());
        assert!(!selection.local);
        assert!(selection.gbif);
        assert!(!selection.inaturalist);

        let from_config = SourceSelection {
            local: true,
            gbif: false,
            inaturalist: true,
        };
        let plain = CliConfig::parse_from(["species-atlas"]);
        assert_eq!(plain.selection(from_config), from_config);
    }
}
