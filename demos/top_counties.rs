use countymap::config::{init_tracing, AppConfig};
use countymap::{render, MetricKind};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Metric from argv (gdp | population), everything else from the environment.
    let kind: MetricKind = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("gdp")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let cfg = AppConfig::from_env();

    let result = match render(kind, &cfg.sources()) {
        Ok(r) => r,
        Err(e) => anyhow::bail!(e.user_message(kind)),
    };

    println!("{}", result.table_title());
    println!("rank,fips,county,{}", result.choropleth.label);
    for (i, row) in result.top.iter().enumerate() {
        println!("{},{},\"{}\",\"{}\"", i + 1, row.fips, row.county_name, row.formatted_value);
    }
    println!("({} counties on the map)", result.merged.len());

    Ok(())
}
