#![forbid(unsafe_code)]
//! mxprovider_lib — MX resolution and mail hosting provider inference for
//! email lists.

mod error;
pub use error::Error;

pub mod enrich;
pub mod mx;
pub mod provider;
pub mod record;

pub use enrich::{MX_COLUMN, PROVIDER_COLUMN, enrich, process};
pub use mx::{
    Error as MxError, LookupOptions, MxAnswer, MxLookup, MxResult, SystemResolver, resolve,
    select_exchange,
};
pub use provider::{ProviderRule, ProviderRules};
pub use record::{Record, RecordSet, extract_domain, find_email_column};

#[cfg(feature = "with-csv")]
pub mod csv_io;
#[cfg(feature = "with-csv")]
pub use csv_io::{enrich_csv, read_records, write_records};

#[cfg(feature = "with-server")]
pub mod server;
