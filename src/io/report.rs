use anyhow::Context;

use crate::pipeline::RenderResult;

/// Write a plain-text summary of a render pass to `<out_dir>/render_<run_id>.txt`.
pub fn write_render_report(
    out_dir: impl AsRef<std::path::Path>,
    run_id: &str,
    result: &RenderResult,
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    std::fs::create_dir_all(out_dir.as_ref()).context("create report dir failed")?;
    let path = out_dir.as_ref().join(format!("render_{}.txt", run_id));
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("create render report failed (path={:?})", path))?;

    let nulls = result.merged.iter().filter(|r| r.metric_value.is_none()).count();

    writeln!(f, "run_id={}", run_id)?;
    writeln!(f, "metric={}", result.kind)?;
    writeln!(f, "year={}", result.year)?;
    writeln!(f, "column={}", result.choropleth.column)?;
    writeln!(f, "label={}", result.choropleth.label)?;
    writeln!(f, "title={}", result.choropleth.title)?;
    writeln!(f, "merged_rows={}", result.merged.len())?;
    writeln!(f, "null_values={}", nulls)?;
    writeln!(f)?;
    writeln!(f, "{}", result.table_title())?;
    writeln!(f, "rank|fips|county|value")?;

    for (i, row) in result.top.iter().enumerate() {
        writeln!(f, "{}|{}|{}|{}", i + 1, row.fips, row.county_name, row.formatted_value)?;
    }

    Ok(path)
}
