use std::sync::Arc;

use crate::mx::{LookupOptions, MxLookup};
use crate::provider::ProviderRules;

#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn MxLookup>,
    pub rules: Arc<ProviderRules>,
    pub options: LookupOptions,
}

impl AppState {
    pub fn new(lookup: Arc<dyn MxLookup>, rules: ProviderRules, options: LookupOptions) -> Self {
        Self {
            lookup,
            rules: Arc::new(rules),
            options,
        }
    }
}
