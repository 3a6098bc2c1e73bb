//! Row model: a CSV record as an ordered column → value mapping.

use crate::Error;

/// One CSV row; columns keep their header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs `headers` with `values` positionally.
    pub fn from_parts<H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let fields = headers
            .into_iter()
            .map(Into::into)
            .zip(values.into_iter().map(Into::into))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Overwrites `column` in place, or appends it when absent.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A parsed CSV document: header row plus records sharing its columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// First header whose name contains `email`, case-insensitively.
pub fn find_email_column<S: AsRef<str>>(headers: &[S]) -> Result<&str, Error> {
    headers
        .iter()
        .map(|header| header.as_ref())
        .find(|name| name.to_lowercase().contains("email"))
        .ok_or(Error::NoEmailColumn)
}

/// Everything after the first `@`, or `None` when the value has no `@`.
pub fn extract_domain(email: &str) -> Option<&str> {
    email.split_once('@').map(|(_, domain)| domain)
}
