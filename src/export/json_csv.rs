// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::models::EvaluationPair;
use std::io::Write;

/// Pretty-printed JSON array, camelCase keys as the UI expects.
pub fn write_pairs_json<W: Write>(pairs: &[EvaluationPair], mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, pairs)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// CSV with a header row; contact lists are JSON-encoded into one cell.
pub fn write_pairs_csv<W: Write>(pairs: &[EvaluationPair], out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    if pairs.is_empty() {
        wtr.write_record([
            "image_id",
            "model_name",
            "image_url",
            "original_contacts",
            "model_contacts",
            "model_raw_response",
        ])?;
    }

    for pair in pairs {
        wtr.serialize(pair.to_record()?)?;
    }

    wtr.flush()?;
    Ok(())
}
