//! Row-processing driver: fans MX resolution out over a batch of records and
//! appends the `mx` and `emailprovider` columns.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::Error;
use crate::mx::{LookupOptions, MxLookup, MxResult, resolve};
use crate::provider::ProviderRules;
use crate::record::{Record, RecordSet, extract_domain, find_email_column};

pub const MX_COLUMN: &str = "mx";
pub const PROVIDER_COLUMN: &str = "emailprovider";

/// Locates the email column of `set` and enriches every record.
///
/// Fails with [`Error::NoEmailColumn`] before any lookup when no header
/// contains `email`. Row-level failures never fail the batch.
pub async fn enrich<L>(
    set: RecordSet,
    lookup: &L,
    rules: &ProviderRules,
    options: &LookupOptions,
) -> Result<RecordSet, Error>
where
    L: MxLookup + ?Sized,
{
    let email_column = find_email_column(&set.headers)?.to_string();
    let headers = output_headers(&set.headers);
    let records = process(set.records, &email_column, lookup, rules, options).await;
    Ok(RecordSet::new(headers, records))
}

/// Enriches `records` concurrently, at most `options.concurrency()` lookups
/// at a time. Output row `i` is always input row `i`.
pub async fn process<L>(
    records: Vec<Record>,
    email_column: &str,
    lookup: &L,
    rules: &ProviderRules,
    options: &LookupOptions,
) -> Vec<Record>
where
    L: MxLookup + ?Sized,
{
    let total = records.len();
    info!(rows = total, email_column, "enriching records");

    let mut slots: Vec<Option<Record>> = vec![None; total];
    let mut completed = stream::iter(records.into_iter().enumerate())
        .map(|(row, record)| async move {
            let record = enrich_record(row, record, email_column, lookup, rules, options).await;
            (row, record)
        })
        .buffer_unordered(options.concurrency());

    while let Some((row, record)) = completed.next().await {
        slots[row] = Some(record);
    }

    let out: Vec<Record> = slots.into_iter().flatten().collect();
    let failed = out
        .iter()
        .filter(|record| record.get(MX_COLUMN) == Some(MxResult::FAILED_LABEL))
        .count();
    info!(rows = out.len(), failed, "enrichment complete");
    out
}

async fn enrich_record<L>(
    row: usize,
    mut record: Record,
    email_column: &str,
    lookup: &L,
    rules: &ProviderRules,
    options: &LookupOptions,
) -> Record
where
    L: MxLookup + ?Sized,
{
    let mx = match record.get(email_column).and_then(extract_domain) {
        Some(domain) => resolve(lookup, domain, options).await,
        None => {
            debug!(row, "email missing or without '@', lookup skipped");
            MxResult::Failed
        }
    };
    let provider = rules.classify(&mx).to_string();
    record.set(MX_COLUMN, mx.as_field());
    record.set(PROVIDER_COLUMN, provider);
    record
}

/// Input headers followed by the derived columns, unless already present.
pub fn output_headers(headers: &[String]) -> Vec<String> {
    let mut out = headers.to_vec();
    for column in [MX_COLUMN, PROVIDER_COLUMN] {
        if !out.iter().any(|header| header == column) {
            out.push(column.to_string());
        }
    }
    out
}
