//! Match table output
//!
//! Serializes [`MatchRow`]s as CSV (one header row, columns in the order of
//! the struct fields) or as JSON lines.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tenantmatch_engine::MatchRow;

/// Output encoding for the match table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Write match rows to a file
pub fn write_matches<P: AsRef<Path>>(path: P, rows: &[MatchRow], format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create matches file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_matches_csv(writer, rows),
        OutputFormat::Jsonl => write_matches_jsonl(writer, rows),
    }
}

pub fn write_matches_csv<W: Write>(writer: W, rows: &[MatchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_matches_jsonl<W: Write>(mut writer: W, rows: &[MatchRow]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: usize, score: f64) -> MatchRow {
        MatchRow {
            user_id: 1,
            tenant_label: "Tenant_001".to_string(),
            match_rank: rank,
            match_user_id: rank as u32 + 1,
            match_tenant_label: format!("Tenant_{:03}", rank + 1),
            compatibility_score: score,
            top_drivers: "x(mode=similarity, score=1.00, w=1.00)".to_string(),
            explanation_short: "High compatibility driven by X.".to_string(),
            explanation_long: "Tenant_001 matches well with Tenant_002 (score 91.25%).".to_string(),
            top_driver_values: "x: 3 vs 3 (similarity, 1.00)".to_string(),
        }
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let mut buf = Vec::new();
        write_matches_csv(&mut buf, &[row(1, 91.25), row(2, 80.0)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "user_id,tenant_label,match_rank,match_user_id,match_tenant_label,\
                 compatibility_score,top_drivers,explanation_short,explanation_long,\
                 top_driver_values"
            )
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("1,Tenant_001,1,2,Tenant_002,91.25,"));
        // comma inside the driver string forces quoting
        assert!(first.contains("\"x(mode=similarity, score=1.00, w=1.00)\""));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_csv_roundtrip_through_reader() {
        let rows = vec![row(1, 91.25), row(2, 80.0)];
        let mut buf = Vec::new();
        write_matches_csv(&mut buf, &rows).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let parsed: Vec<MatchRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let mut buf = Vec::new();
        write_matches_jsonl(&mut buf, &[row(1, 91.25), row(2, 80.0)]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let values: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["match_rank"], 2);
        assert_eq!(values[0]["compatibility_score"], 91.25);
    }

    #[test]
    fn test_write_matches_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.jsonl");

        write_matches(&path, &[row(1, 50.0)], OutputFormat::Jsonl).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"match_tenant_label\":\"Tenant_002\""));
    }
}
