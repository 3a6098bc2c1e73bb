#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mxprovider_lib::{MxAnswer, MxError, MxLookup};
use trust_dns_resolver::error::ResolveError;

/// Deterministic in-memory DNS: answers, failures and artificial latency per
/// domain, plus a count of issued queries.
#[derive(Default)]
pub struct StubResolver {
    answers: HashMap<String, Vec<MxAnswer>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mx(mut self, domain: &str, records: &[(u16, &str)]) -> Self {
        let answers = records
            .iter()
            .map(|(priority, server)| MxAnswer::new(*priority, *server))
            .collect();
        self.answers.insert(domain.to_string(), answers);
        self
    }

    pub fn failing(mut self, domain: &str) -> Self {
        self.failing.insert(domain.to_string());
        self
    }

    pub fn with_delay(mut self, domain: &str, delay: Duration) -> Self {
        self.delays.insert(domain.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MxLookup for StubResolver {
    async fn lookup_mx(&self, ascii_domain: &str) -> Result<Vec<MxAnswer>, MxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(ascii_domain) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(ascii_domain) {
            return Err(MxError::lookup(ResolveError::from("connection refused")));
        }
        Ok(self.answers.get(ascii_domain).cloned().unwrap_or_default())
    }
}

/// Resolver covering the four provider families plus a failing and an
/// MX-less domain.
pub fn provider_zoo() -> StubResolver {
    StubResolver::new()
        .with_mx(
            "corp.example",
            &[(10, "corp-example.mail.protection.outlook.com.")],
        )
        .with_mx(
            "gmail.example",
            &[(20, "alt.example.net."), (5, "SMTP.google.com.")],
        )
        .with_mx(
            "fm.example",
            &[
                (10, "in1-smtp.messagingengine.com."),
                (20, "in2-smtp.messagingengine.com."),
            ],
        )
        .with_mx("plain.example", &[(10, "mx.plain.example.")])
        .failing("broken.example")
}

pub const ZOO_CSV: &str = "\
name,email
Ann,ann@corp.example
Bob,bob@gmail.example
Cy,cy@fm.example
Di,di@plain.example
Ed,not-an-email
Flo,
Gus,gus@broken.example
Hal,hal@nomx.example
";

pub const ZOO_RESULT: &str = "\
name,email,mx,emailprovider
Ann,ann@corp.example,corp-example.mail.protection.outlook.com,office365
Bob,bob@gmail.example,smtp.google.com,gsuite
Cy,cy@fm.example,in1-smtp.messagingengine.com,fastmail
Di,di@plain.example,mx.plain.example,
Ed,not-an-email,failed,
Flo,,failed,
Gus,gus@broken.example,failed,
Hal,hal@nomx.example,,
";
