#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use countymap::io::geometry::GeometrySource;
use countymap::DataSources;

pub const GDP_CSV: &str = r#""CAGDP1 Gross domestic product (GDP) summary by county"
"Thousands of current dollars"
""
"GeoFips","GeoName","2022","2023"
"01001","Autauga, AL","2000000","2,500,000"
"1003","Baldwin, AL","9000000","9,876,543"
"01005","Barbour, AL","(D)","(D)"
"02013","Aleutians East Borough, AK","500","600"
"06037","Los Angeles, CA","800000000","812,345,678"
"48201","Harris, TX","500000000","512,000,000"
"Note: Legend / Footnotes"
"#;

pub const POPULATION_CSV: &str = r#""CAINC1 County population"
"Number of persons"
""
"GeoFips","GeoName","2023"
"1001","Autauga, AL","59285"
"1003","Baldwin, AL","253507"
"6037","Los Angeles, CA","9663345"
"#;

pub const GDP_WITHOUT_2023: &str = r#""CAGDP1"
"Thousands of current dollars"
""
"GeoFips","GeoName","2021","2022"
"01001","Autauga, AL","1","2"
"#;

pub fn geojson() -> String {
    let feature = |id: serde_json::Value, state: &str| {
        serde_json::json!({
            "type": "Feature",
            "id": id,
            "properties": { "GEO_ID": "0500000US", "STATE": state, "NAME": "x", "LSAD": "County" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-86.4, 32.4], [-86.9, 32.6], [-86.4, 32.7], [-86.4, 32.4]]]
            }
        })
    };
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            feature(serde_json::json!("1001"), "01"),
            feature(serde_json::json!("01003"), "01"),
            feature(serde_json::json!(1005), "01"),
            feature(serde_json::json!("02013"), "02"),
            feature(serde_json::json!("12086"), "12"),
            feature(serde_json::json!("06037"), "06"),
            feature(serde_json::json!("48201"), "48"),
        ]
    })
    .to_string()
}

/// Write fixture files into `dir` and point a `DataSources` at them.
pub fn sources_in(dir: &Path, gdp_csv: &str) -> DataSources {
    let gdp = dir.join("county_gdp_2023.csv");
    let pop = dir.join("county_population_2023.csv");
    let geo = dir.join("US-counties.geojson");
    std::fs::write(&gdp, gdp_csv).expect("write gdp fixture");
    std::fs::write(&pop, POPULATION_CSV).expect("write population fixture");
    std::fs::write(&geo, geojson()).expect("write geojson fixture");
    DataSources {
        year: 2023,
        gdp_csv: gdp,
        population_csv: pop,
        geometry: GeometrySource::Path(geo),
    }
}

pub fn unreachable_geometry(sources: &mut DataSources) {
    sources.geometry = GeometrySource::parse(
        &sources.gdp_csv.with_extension("missing.geojson").to_string_lossy(),
        Duration::from_secs(1),
    );
}
