//! Profile table I/O
//!
//! Reads and writes the `user_id, tenant_label, <attribute>...` CSV table.
//! Columns are matched by header name, so column order in the file does not
//! matter; only the schema's attribute order does.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tenantmatch_core::{tenant_label, Entity, EntityId, ValidationError};
use tenantmatch_engine::MatchingSchema;
use tracing::debug;

pub const USER_ID_COLUMN: &str = "user_id";
pub const LABEL_COLUMN: &str = "tenant_label";

/// Load profiles from a CSV file
pub fn read_profiles<P: AsRef<Path>>(path: P, schema: &MatchingSchema) -> Result<Vec<Entity>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open profiles file: {}", path.display()))?;
    read_profiles_from(file, schema)
        .with_context(|| format!("Failed to load profiles from {}", path.display()))
}

/// Load profiles from any CSV source.
///
/// Every schema attribute and `user_id` must be present as a column. A
/// missing `tenant_label` column falls back to `Tenant_###` labels.
pub fn read_profiles_from<R: Read>(reader: R, schema: &MatchingSchema) -> Result<Vec<Entity>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let id_col = column(USER_ID_COLUMN)
        .ok_or_else(|| ValidationError::MissingColumn(USER_ID_COLUMN.to_string()))?;
    let label_col = column(LABEL_COLUMN);
    let attr_cols = schema
        .attribute_names()
        .map(|name| column(name).ok_or_else(|| ValidationError::MissingColumn(name.to_string())))
        .collect::<std::result::Result<Vec<usize>, _>>()?;

    let mut entities = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let row = i + 2;

        let id: EntityId = parse_cell(&record, id_col, row, USER_ID_COLUMN)?;
        let label = label_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| tenant_label(id), str::to_string);

        let values = attr_cols
            .iter()
            .zip(schema.attribute_names())
            .map(|(&col, name)| parse_value(&record, col, row, name))
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        entities.push(Entity::new(id, label, values));
    }

    debug!(profiles = entities.len(), "loaded profile table");
    Ok(entities)
}

fn parse_cell<T: std::str::FromStr>(
    record: &csv::StringRecord,
    col: usize,
    row: usize,
    column: &str,
) -> std::result::Result<T, ValidationError> {
    let raw = record.get(col).unwrap_or("").trim();
    raw.parse().map_err(|_| ValidationError::NonNumeric {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Attribute cell; `NaN` and `inf` parse as f64 but are not ratings
fn parse_value(
    record: &csv::StringRecord,
    col: usize,
    row: usize,
    column: &str,
) -> std::result::Result<f64, ValidationError> {
    let value: f64 = parse_cell(record, col, row, column)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonNumeric {
            row,
            column: column.to_string(),
            value: record.get(col).unwrap_or("").trim().to_string(),
        })
    }
}

/// Write profiles to a CSV file
pub fn write_profiles<P: AsRef<Path>>(path: P, schema: &MatchingSchema, entities: &[Entity]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create profiles file: {}", path.display()))?;
    write_profiles_to(file, schema, entities)
}

/// Write profiles as `user_id, tenant_label, <attributes in schema order>`
pub fn write_profiles_to<W: Write>(writer: W, schema: &MatchingSchema, entities: &[Entity]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec![USER_ID_COLUMN, LABEL_COLUMN];
    header.extend(schema.attribute_names());
    writer.write_record(&header)?;

    for entity in entities {
        let mut record = vec![entity.id().to_string(), entity.label().to_string()];
        record.extend(entity.values().iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
