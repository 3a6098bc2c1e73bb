//! DNS MX resolution.
//!
//! The public entry point is [`resolve`], which queries an [`MxLookup`]
//! implementation with a bounded timeout and reduces the answer section to a
//! single [`MxResult`]. [`SystemResolver`] is the production lookup.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{MxLookup, SystemResolver, resolve, select_exchange};
pub use types::{LookupOptions, MxAnswer, MxResult};
