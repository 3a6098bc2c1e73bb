use thiserror::Error;

/// Input-shape failures. Any of these rejects the whole batch before a
/// single DNS query is issued.
#[derive(Debug, Error)]
pub enum Error {
    #[error("No email column found")]
    NoEmailColumn,
    #[error("CSV input is empty")]
    EmptyInput,
    #[cfg(feature = "with-csv")]
    #[error("invalid CSV: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    #[cfg(feature = "with-csv")]
    pub(crate) fn csv(source: csv::Error) -> Self {
        Self::Csv { source }
    }

    #[cfg_attr(not(feature = "with-csv"), allow(dead_code))]
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}
