//! Per-step table of a beta, written as CSV or Parquet.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fermata::api::{Limb, Step};
use polars::prelude::*;

/// One row per state: step index, moved limb (null for the start), the four
/// holds, the move cost and the running total.
pub fn steps_frame(steps: &[Step]) -> Result<DataFrame> {
    let hold = |limb: Limb| -> Vec<u32> { steps.iter().map(|s| s.state.get(limb).0).collect() };
    let df = df!(
        "step" => steps.iter().map(|s| s.index as u32).collect::<Vec<_>>(),
        "limb" => steps.iter().map(|s| s.limb.map(Limb::code)).collect::<Vec<_>>(),
        "rh" => hold(Limb::RightHand),
        "lh" => hold(Limb::LeftHand),
        "rf" => hold(Limb::RightFoot),
        "lf" => hold(Limb::LeftFoot),
        "cost" => steps.iter().map(|s| s.cost).collect::<Vec<_>>(),
        "total" => steps.iter().map(|s| s.total).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Write `df` to `path`; the extension picks the format.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    match ext.as_deref() {
        Some("csv") => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        Some("parquet") => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(df)?;
        }
        _ => bail!(
            "unsupported table format for {} (use .csv or .parquet)",
            path.display()
        ),
    }
    tracing::info!(path = %path.display(), rows = df.height(), "table_written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fermata::api::{HoldId, State};
    use tempfile::tempdir;

    fn steps() -> Vec<Step> {
        let a = State::new(HoldId(6), HoldId(5), HoldId(3), HoldId(0));
        let b = a.with(Limb::RightHand, HoldId(10));
        vec![
            Step {
                index: 0,
                state: a,
                limb: None,
                cost: 0.0,
                total: 0.0,
            },
            Step {
                index: 1,
                state: b,
                limb: Some(Limb::RightHand),
                cost: 1.25,
                total: 1.25,
            },
        ]
    }

    #[test]
    fn frame_has_one_row_per_state() {
        let df = steps_frame(&steps()).unwrap();
        assert_eq!(df.shape(), (2, 8));
        assert_eq!(df.column("limb").unwrap().null_count(), 1);
    }

    #[test]
    fn csv_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/steps.csv");
        let mut df = steps_frame(&steps()).unwrap();
        write_table(&mut df, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("step,limb,rh,lh,rf,lf,cost,total"));
        assert!(lines.next().unwrap().starts_with("0,,6,5,3,0"));
        assert!(lines.next().unwrap().starts_with("1,RH,10,5,3,0"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let mut df = steps_frame(&steps()).unwrap();
        assert!(write_table(&mut df, &dir.path().join("steps.xlsx")).is_err());
    }
}
