//! One-shot command behind the binary.

use crate::model::ReadingSource;
use anyhow::Context;
use std::io::Write;

/// Runs one invocation against `source`, writing the output to `out`.
///
/// Without an agreement id the account's agreements are listed, one per
/// line, so the id can be picked for later runs. With one, a single
/// retrieval is made and printed as JSON.
pub async fn run<S, W>(source: &mut S, agreement_id: Option<i64>, out: &mut W) -> anyhow::Result<()>
where
    S: ReadingSource + ?Sized,
    W: Write,
{
    match agreement_id {
        None => {
            let agreements = source
                .list_agreements()
                .await
                .context("Failed to list agreements")?;
            if agreements.is_empty() {
                tracing::warn!("No agreements found for this account");
            }
            for agreement in agreements {
                writeln!(out, "{}", agreement)?;
            }
        }
        Some(agreement_id) => {
            let result = source
                .retrieve(agreement_id)
                .await
                .with_context(|| {
                    format!("Failed to retrieve readings of agreement {}", agreement_id)
                })?;
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
