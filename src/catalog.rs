//! Movie metadata catalog.
//!
//! Records are held sorted by descending last-year popularity; that
//! order doubles as the popularity ranking used to restrict candidate
//! pools. Loaded once at startup and shared immutably across requests.

use crate::error::{ExplorerError, Result};
use crate::types::ItemId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Metadata record for one movie, as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub item_index: ItemId,
    pub title: String,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
    pub youtube_trailer_ids: Vec<String>,
    pub popularity_last_year: f64,
}

/// On-disk record shape: list-valued fields are comma-joined strings,
/// split at load time.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    item_index: ItemId,
    title: String,
    #[serde(default)]
    genres: String,
    #[serde(default)]
    languages: String,
    #[serde(default)]
    directors: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    youtube_trailer_ids: String,
    #[serde(default)]
    popularity_last_year: f64,
}

impl From<RawRecord> for MovieRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            item_index: raw.item_index,
            title: raw.title,
            genres: split_list(&raw.genres),
            languages: split_list(&raw.languages),
            directors: split_list(&raw.directors),
            actors: split_list(&raw.actors),
            youtube_trailer_ids: split_list(&raw.youtube_trailer_ids),
            popularity_last_year: raw.popularity_last_year,
        }
    }
}

fn split_list(field: &str) -> Vec<String> {
    if field.is_empty() {
        Vec::new()
    } else {
        field.split(',').map(|s| s.trim().to_string()).collect()
    }
}

pub struct Catalog {
    /// Records in descending popularity order.
    records: Vec<MovieRecord>,
    /// Item id to position in `records`.
    by_item: HashMap<ItemId, usize>,
}

impl Catalog {
    pub fn from_records(mut records: Vec<MovieRecord>) -> Self {
        records.sort_by(|a, b| {
            b.popularity_last_year
                .partial_cmp(&a.popularity_last_year)
                .unwrap()
        });
        let by_item = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.item_index, position))
            .collect();
        Self { records, by_item }
    }

    /// Loads a JSON array of raw records. Item indices must form a
    /// permutation of `[0, len)`; a malformed catalog fails here at
    /// startup rather than as per-request lookup errors.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        ))
        .context("Failed to deserialize catalog records")?;
        let catalog = Self::from_records(raw.into_iter().map(MovieRecord::from).collect());

        let mut seen = vec![false; catalog.records.len()];
        for record in &catalog.records {
            anyhow::ensure!(
                record.item_index < catalog.records.len(),
                "item index {} out of range for catalog of {} records",
                record.item_index,
                catalog.records.len()
            );
            anyhow::ensure!(
                !seen[record.item_index],
                "duplicate item index {}",
                record.item_index
            );
            seen[record.item_index] = true;
        }

        Ok(catalog)
    }

    /// Item ids of the `limit` most popular records.
    pub fn top_items(&self, limit: usize) -> Vec<ItemId> {
        self.records
            .iter()
            .take(limit)
            .map(|record| record.item_index)
            .collect()
    }

    /// Metadata records for a batch of items, in input order.
    pub fn records_of(&self, items: &[ItemId]) -> Result<Vec<MovieRecord>> {
        items
            .iter()
            .map(|&item| {
                self.by_item
                    .get(&item)
                    .map(|&position| self.records[position].clone())
                    .ok_or(ExplorerError::UnknownItem(item))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item_index: ItemId, popularity: f64) -> MovieRecord {
        MovieRecord {
            item_index,
            title: format!("Movie {item_index}"),
            genres: vec!["Drama".to_string()],
            languages: Vec::new(),
            directors: Vec::new(),
            actors: Vec::new(),
            youtube_trailer_ids: Vec::new(),
            popularity_last_year: popularity,
        }
    }

    #[test]
    fn test_top_items_follow_popularity_order() {
        let catalog =
            Catalog::from_records(vec![record(0, 5.0), record(1, 20.0), record(2, 10.0)]);
        assert_eq!(catalog.top_items(2), vec![1, 2]);
        assert_eq!(catalog.top_items(10), vec![1, 2, 0]);
    }

    #[test]
    fn test_records_of_preserves_input_order() {
        let catalog =
            Catalog::from_records(vec![record(0, 5.0), record(1, 20.0), record(2, 10.0)]);
        let records = catalog.records_of(&[2, 0]).unwrap();
        assert_eq!(records[0].item_index, 2);
        assert_eq!(records[1].item_index, 0);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let catalog = Catalog::from_records(vec![record(0, 5.0)]);
        assert!(matches!(
            catalog.records_of(&[7]),
            Err(ExplorerError::UnknownItem(7))
        ));
    }

    #[test]
    fn test_load_valid_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            serde_json::json!([
                { "itemIndex": 1, "title": "B", "popularityLastYear": 1.0 },
                { "itemIndex": 0, "title": "A", "popularityLastYear": 2.0 }
            ])
            .to_string(),
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.top_items(2), vec![0, 1]);
    }

    #[test]
    fn test_load_rejects_duplicate_item_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            serde_json::json!([
                { "itemIndex": 0, "title": "A", "popularityLastYear": 2.0 },
                { "itemIndex": 0, "title": "B", "popularityLastYear": 1.0 }
            ])
            .to_string(),
        )
        .unwrap();

        assert!(Catalog::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_out_of_range_item_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            serde_json::json!([
                { "itemIndex": 0, "title": "A", "popularityLastYear": 2.0 },
                { "itemIndex": 5, "title": "B", "popularityLastYear": 1.0 }
            ])
            .to_string(),
        )
        .unwrap();

        assert!(Catalog::load(&path).is_err());
    }

    #[test]
    fn test_raw_record_list_splitting() {
        let raw: RawRecord = serde_json::from_value(serde_json::json!({
            "itemIndex": 3,
            "title": "Alien",
            "genres": "Horror,Sci-Fi",
            "actors": "Sigourney Weaver, Tom Skerritt",
            "popularityLastYear": 42.5
        }))
        .unwrap();

        let record = MovieRecord::from(raw);
        assert_eq!(record.genres, vec!["Horror", "Sci-Fi"]);
        assert_eq!(record.actors, vec!["Sigourney Weaver", "Tom Skerritt"]);
        assert!(record.languages.is_empty());
    }
}
