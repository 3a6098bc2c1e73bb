//! CSV byte-stream boundary (`with-csv` feature).

use csv::{ReaderBuilder, Writer};

use crate::Error;
use crate::enrich::enrich;
use crate::mx::{LookupOptions, MxLookup};
use crate::provider::ProviderRules;
use crate::record::{Record, RecordSet};

/// Parses `bytes` into records keyed by the header row.
///
/// Every row must have as many fields as the header.
pub fn read_records(bytes: &[u8]) -> Result<RecordSet, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(Error::csv)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(Error::csv)?;
        records.push(Record::from_parts(headers.iter().cloned(), row.iter()));
    }
    Ok(RecordSet::new(headers, records))
}

pub fn write_records(set: &RecordSet) -> Result<Vec<u8>, Error> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(&set.headers).map_err(Error::csv)?;
    for record in &set.records {
        writer.write_record(record.values()).map_err(Error::csv)?;
    }
    writer
        .into_inner()
        .map_err(|err| Error::io(err.into_error()))
}

/// Parse, enrich, serialize.
pub async fn enrich_csv<L>(
    bytes: &[u8],
    lookup: &L,
    rules: &ProviderRules,
    options: &LookupOptions,
) -> Result<Vec<u8>, Error>
where
    L: MxLookup + ?Sized,
{
    let set = read_records(bytes)?;
    let enriched = enrich(set, lookup, rules, options).await?;
    write_records(&enriched)
}
