use crate::domain::model::SpeciesRecord;
use crate::utils::error::{AtlasError, Result};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Reads catalog rows from CSV, keeping only the species and places columns.
#[derive(Debug, Clone)]
pub struct RecordReader {
    species_column: String,
    places_column: String,
}

impl RecordReader {
    pub fn new(species_column: impl Into<String>, places_column: impl Into<String>) -> Self {
        Self {
            species_column: species_column.into(),
            places_column: places_column.into(),
        }
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SpeciesRecord>> {
        let file = std::fs::File::open(path.as_ref())?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<SpeciesRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        // 欄位名稱前後空白一律去除
        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let species_idx = self.column_index(&headers, &self.species_column)?;
        let places_idx = self.column_index(&headers, &self.places_column)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let species = row.get(species_idx).unwrap_or_default().trim();
            if species.is_empty() {
                continue;
            }
            let places = row.get(places_idx).unwrap_or_default();
            records.push(SpeciesRecord::new(species, places));
        }

        tracing::debug!("📂 Loaded {} species record(s)", records.len());
        Ok(records)
    }

    fn column_index(&self, headers: &[String], column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| AtlasError::MissingColumn {
                column: column.to_string(),
            })
    }
}

pub fn find_record<'a>(records: &'a [SpeciesRecord], species: &str) -> Result<&'a SpeciesRecord> {
    let wanted = species.trim();
    records
        .iter()
        .find(|r| r.species == wanted)
        .ok_or_else(|| AtlasError::RecordNotFound {
            species: wanted.to_string(),
        })
}

/// Sorted, de-duplicated species names.
pub fn species_names(records: &[SpeciesRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.species.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "Tür , Yerler ,Sistem\n\
\"Procambarus clarkii (Girard, 1852)\",\"İzmir\nUnknownTown\",Tatlısu\n\
Lagocephalus sceleratus,\"Antalya\nMersin\",Deniz\n\
,Bodrum,Deniz\n\
Lagocephalus sceleratus,Kaş,Deniz\n";

    fn reader() -> RecordReader {
        RecordReader::new("Tür", "Yerler")
    }

    #[test]
    fn test_read_trims_headers_and_keeps_multiline_places() {
        let records = reader().read_from(CATALOG.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].species, "Procambarus clarkii (Girard, 1852)");
        assert_eq!(records[0].places, "İzmir\nUnknownTown");
    }

    #[test]
    fn test_missing_column() {
        let err = RecordReader::new("Species", "Yerler")
            .read_from(CATALOG.as_bytes())
            .unwrap_err();
        assert!(matches!(err, AtlasError::MissingColumn { column } if column == "Species"));
    }

    #[test]
    fn test_find_record_and_names() {
        let records = reader().read_from(CATALOG.as_bytes()).unwrap();

        let found = find_record(&records, " Lagocephalus sceleratus ").unwrap();
        assert_eq!(found.places, "Antalya\nMersin");
        assert!(matches!(
            find_record(&records, "Vespa velutina"),
            Err(AtlasError::RecordNotFound { .. })
        ));

        assert_eq!(
            species_names(&records),
            vec![
                "Lagocephalus sceleratus".to_string(),
                "Procambarus clarkii (Girard, 1852)".to_string()
            ]
        );
    }
}
