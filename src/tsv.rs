//! `onyo tsv-to-yaml`: turn a tab-separated table into one YAML asset
//! document per row (spec SPEC_FULL §B, supplemented from the original
//! implementation's bulk-import path).

use crate::dotmap::{DotMap, Value};
use crate::error::OnyoError;

/// Parse a TSV table (header row + data rows) into one `DotMap` per row.
/// Column headers may be dotted (`a.b`) to populate nested keys. Empty
/// cells are skipped rather than setting an empty string.
pub fn parse(tsv: &str) -> Result<Vec<DotMap>, OnyoError> {
    let mut lines = tsv.lines();
    let header = lines
        .next()
        .ok_or_else(|| OnyoError::InvalidArgument("empty tsv input".to_string()))?;
    let columns: Vec<&str> = header.split('\t').collect();

    let mut rows = Vec::new();
    for (n, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() != columns.len() {
            return Err(OnyoError::InvalidArgument(format!(
                "row {} has {} cells, expected {}",
                n + 2,
                cells.len(),
                columns.len()
            )));
        }
        let mut row = DotMap::new();
        for (key, cell) in columns.iter().zip(cells.iter()) {
            if cell.is_empty() {
                continue;
            }
            row.set(key, infer_scalar(cell))
                .map_err(|e| OnyoError::InvalidArgument(e.to_string()))?;
        }
        rows.push(row);
    }
    Ok(rows)
}

pub(crate) fn infer_scalar(cell: &str) -> Value {
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = cell.parse::<f64>() {
        return Value::from(f);
    }
    match cell {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}

/// Render parsed rows as a sequence of YAML documents, one per asset.
pub fn to_yaml_documents(rows: &[DotMap]) -> String {
    rows.iter().map(crate::codec::serialize).collect::<Vec<_>>().join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_columns() {
        let tsv = "type\tmake\tquantity\nlaptop\tlenovo\t3\n";
        let rows = parse(tsv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("type").unwrap(), Some(&Value::from("laptop")));
        assert_eq!(rows[0].get("quantity").unwrap(), Some(&Value::from(3)));
    }

    #[test]
    fn empty_cells_are_skipped() {
        let tsv = "type\tserial\nlaptop\t\n";
        let rows = parse(tsv).unwrap();
        assert_eq!(rows[0].get("serial").unwrap(), None);
    }

    #[test]
    fn mismatched_row_length_errors() {
        let tsv = "a\tb\n1\n";
        assert!(parse(tsv).is_err());
    }
}
