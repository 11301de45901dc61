use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;
use crate::model::{Fips, MetricKind, MetricRecord};

/// Non-data lines (title, units, blank) ahead of the header row in BEA county exports.
pub const PREAMBLE_LINES: usize = 3;

pub const GEO_FIPS_COLUMN: &str = "GeoFips";
pub const GEO_NAME_COLUMN: &str = "GeoName";

/// Positions of the raw columns that feed the canonical schema.
#[derive(Debug, Clone, Copy)]
struct BeaColumns {
    fips: usize,
    name: usize,
    value: usize,
}

impl BeaColumns {
    fn resolve(headers: &csv::StringRecord, year: i32) -> Result<Self, LoadError> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim() == wanted)
                .ok_or_else(|| LoadError::MissingColumn(wanted.to_string()))
        };
        Ok(BeaColumns {
            fips: find(GEO_FIPS_COLUMN)?,
            name: find(GEO_NAME_COLUMN)?,
            value: find(year.to_string().as_str())?,
        })
    }
}

/// Load one metric file from disk.
pub fn load_metric_csv(
    kind: MetricKind,
    year: i32,
    path: impl AsRef<Path>,
) -> Result<Vec<MetricRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = load_metric(kind, year, BufReader::new(file))?;
    tracing::info!(metric = %kind, path = %path.display(), rows = rows.len(), "loaded metric file");
    Ok(rows)
}

/// Parse a BEA-style county export: three preamble lines, a header row with
/// `GeoFips`, `GeoName` and one column per year, then one row per area.
///
/// Rows whose id is not a county code (footnotes, notes) are skipped.
/// Unparsable values become `None`; they never fail the load.
pub fn load_metric<R: BufRead>(
    kind: MetricKind,
    year: i32,
    mut reader: R,
) -> Result<Vec<MetricRecord>, LoadError> {
    skip_preamble(&mut reader, PREAMBLE_LINES)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let cols = BeaColumns::resolve(rdr.headers()?, year)?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let raw_fips = record.get(cols.fips).unwrap_or("");
        let Some(fips) = Fips::normalize(raw_fips) else {
            tracing::debug!(metric = %kind, raw = raw_fips, "skipping non-county row");
            skipped += 1;
            continue;
        };
        out.push(MetricRecord {
            fips,
            county_name: record.get(cols.name).unwrap_or("").trim().to_string(),
            metric_value: record.get(cols.value).and_then(parse_metric_value),
        });
    }
    if skipped > 0 {
        tracing::debug!(metric = %kind, skipped, "non-county rows ignored");
    }
    Ok(out)
}

fn skip_preamble<R: BufRead>(reader: &mut R, lines: usize) -> Result<(), LoadError> {
    let mut buf = String::new();
    for found in 0..lines {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Err(LoadError::Preamble { expected: lines, found });
        }
    }
    Ok(())
}

/// Numeric coercion for a metric cell. Thousands separators are stripped;
/// suppression markers like `(D)` or `(NA)` and empty cells yield `None`.
pub fn parse_metric_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
\"CAGDP1 County GDP\"
\"Thousands of dollars\"

\"GeoFips\",\"GeoName\",\"2022\",\"2023\"
\"1001\",\"Autauga, AL\",\"1100000\",\"1,234,567\"
\"01003\",\"Baldwin, AL\",\"9000000\",\"(D)\"
\" 6037\",\"Los Angeles, CA\",\"1\",\"800000000\"
\"Note: see footnotes\"
";

    #[test]
    fn renames_pads_and_coerces() {
        let rows = load_metric(MetricKind::Gdp, 2023, SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fips.as_str(), "01001");
        assert_eq!(rows[0].county_name, "Autauga, AL");
        assert_eq!(rows[0].metric_value, Some(1_234_567.0));
        assert_eq!(rows[1].metric_value, None);
        assert_eq!(rows[2].fips.as_str(), "06037");
    }

    #[test]
    fn picks_requested_year_column() {
        let rows = load_metric(MetricKind::Gdp, 2022, SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows[0].metric_value, Some(1_100_000.0));
        assert_eq!(rows[1].metric_value, Some(9_000_000.0));
    }

    #[test]
    fn missing_year_column_is_a_load_error() {
        let err = load_metric(MetricKind::Gdp, 2019, SAMPLE.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "2019"), "{err}");
    }

    #[test]
    fn short_file_is_a_load_error() {
        let err = load_metric(MetricKind::Population, 2023, "title\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Preamble { expected: 3, found: 1 }));

        let err = load_metric(MetricKind::Population, 2023, "a\nb\nc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }

    #[test]
    fn header_only_file_loads_empty() {
        let body = "a\nb\n\n\"GeoFips\",\"GeoName\",\"2023\"\n";
        let rows = load_metric(MetricKind::Gdp, 2023, body.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn coercion_degrades_to_none() {
        assert_eq!(parse_metric_value(" 42 "), Some(42.0));
        assert_eq!(parse_metric_value("1,000.5"), Some(1000.5));
        assert_eq!(parse_metric_value("(NA)"), None);
        assert_eq!(parse_metric_value(""), None);
        assert_eq!(parse_metric_value("inf"), None);
    }
}
