use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{display_name, MatchRecord};

/// Concatenate per-unit datasets into one combined dataset, preserving the
/// row order of input concatenation. No re-sorting.
pub fn combine(parts: Vec<Vec<MatchRecord>>) -> Vec<MatchRecord> {
    parts.into_iter().flatten().collect()
}

/// Write a dataset to `path`, creating parent directories as needed.
///
/// An empty dataset writes nothing and returns `Ok(false)`; "nothing to
/// persist" is a valid outcome, not an error.
pub fn write_matches(path: &Path, records: &[MatchRecord]) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(true)
}

/// Per-team-per-season dataset path, e.g.
/// `Team Results/Penn State/2024_penn-state.csv`.
pub fn team_results_path(out_dir: &Path, slug: &str, season: u16) -> PathBuf {
    out_dir
        .join("Team Results")
        .join(display_name(slug))
        .join(format!("{season}_{slug}.csv"))
}

/// Per-season dataset path, e.g. `Year Results/2024_matches.csv`.
pub fn season_results_path(out_dir: &Path, season: u16) -> PathBuf {
    out_dir
        .join("Year Results")
        .join(format!("{season}_matches.csv"))
}

/// Full-history dataset path.
pub fn full_results_path(out_dir: &Path) -> PathBuf {
    out_dir.join("d1_all_match_results.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(opponent: &str, score: &str) -> MatchRecord {
        MatchRecord {
            season: "2024".to_string(),
            date: "01/20/2024".to_string(),
            event: "Dual Meet".to_string(),
            weight_class: "174".to_string(),
            result: "W".to_string(),
            result_type: "Dec".to_string(),
            score: score.to_string(),
            opponent: opponent.to_string(),
            opponent_id: 102183,
            opponent_record: "10-2".to_string(),
            opponent_school: "Ohio State".to_string(),
            wrestler: "Carter Starocci".to_string(),
            wrestler_id: 131567,
            wrestler_school: Some("Penn State".to_string()),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wrestlestat-scraper-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_combine_preserves_order_and_skips_empty() {
        let first: Vec<MatchRecord> = (0..5).map(|i| record(&format!("A{i}"), "7-2")).collect();
        let middle: Vec<MatchRecord> = Vec::new();
        let last: Vec<MatchRecord> = (0..3).map(|i| record(&format!("B{i}"), "3-1")).collect();

        let combined = combine(vec![first, middle, last]);

        assert_eq!(combined.len(), 8);
        assert_eq!(combined[0].opponent, "A0");
        assert_eq!(combined[4].opponent, "A4");
        assert_eq!(combined[5].opponent, "B0");
        assert_eq!(combined[7].opponent, "B2");
    }

    #[test]
    fn test_write_matches_empty_writes_nothing() {
        let path = temp_path("empty.csv");
        assert!(!write_matches(&path, &[]).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_matches_header_and_rows() {
        let path = temp_path("two-rows.csv");
        let records = vec![record("Carson Kharchla", "7-2"), record("Mekhi Lewis", "4-3")];

        assert!(write_matches(&path, &records).unwrap());

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Season,Date,Event,Weight Class,Result,Result Type,Score,Opponent,\
             Opponent ID,Opponent Record,Opponent School,Wrestler,Wrestler ID,\
             Wrestler School"
        );
        assert_eq!(lines.clone().count(), 2);
        assert!(lines.next().unwrap().contains("Carson Kharchla"));
        assert!(lines.next().unwrap().contains("Mekhi Lewis"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_dataset_paths() {
        let out = Path::new("/data");
        assert_eq!(
            team_results_path(out, "penn-state", 2024),
            Path::new("/data/Team Results/Penn State/2024_penn-state.csv")
        );
        assert_eq!(
            season_results_path(out, 2024),
            Path::new("/data/Year Results/2024_matches.csv")
        );
        assert_eq!(
            full_results_path(out),
            Path::new("/data/d1_all_match_results.csv")
        );
    }
}
