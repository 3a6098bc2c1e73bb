use async_trait::async_trait;
use tracing::{debug, info, warn};
use trust_dns_resolver::{
    TokioAsyncResolver,
    error::{ResolveError, ResolveErrorKind},
    lookup::Lookup,
    proto::{
        op::ResponseCode,
        rr::{RData, RecordType},
    },
};

use super::{Error, LookupOptions, MxAnswer, MxResult};

/// DNS collaborator answering MX queries for an ASCII domain.
#[async_trait]
pub trait MxLookup: Send + Sync {
    async fn lookup_mx(&self, ascii_domain: &str) -> Result<Vec<MxAnswer>, Error>;
}

/// [`MxLookup`] backed by the system resolver configuration.
#[derive(Clone)]
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl SystemResolver {
    /// Reads the system configuration and caps every query to one attempt
    /// bounded by `options.timeout()`.
    pub fn from_system_conf(options: &LookupOptions) -> Result<Self, Error> {
        let (config, mut opts) = trust_dns_resolver::system_conf::read_system_conf()
            .map_err(|err| Error::resolver_init(err.into()))?;
        opts.timeout = options.timeout();
        opts.attempts = 1;
        Ok(Self {
            inner: TokioAsyncResolver::tokio(config, opts),
        })
    }
}

#[async_trait]
impl MxLookup for SystemResolver {
    async fn lookup_mx(&self, ascii_domain: &str) -> Result<Vec<MxAnswer>, Error> {
        match self.inner.lookup(ascii_domain, RecordType::MX).await {
            Ok(lookup) => Ok(collect_answers(&lookup)),
            Err(err) if should_treat_as_empty(&err) => Ok(Vec::new()),
            Err(err) => Err(Error::lookup(err)),
        }
    }
}

fn collect_answers(lookup: &Lookup) -> Vec<MxAnswer> {
    lookup
        .iter()
        .map(|rdata| match rdata {
            RData::MX(mx) => MxAnswer {
                record_type: RecordType::MX,
                priority: Some(mx.preference()),
                server: Some(mx.exchange().to_utf8()),
            },
            other => MxAnswer {
                record_type: other.record_type(),
                priority: None,
                server: None,
            },
        })
        .collect()
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            is_empty_answer(*response_code)
        }
        _ => false,
    }
}

/// `NoRecordsFound` also carries SERVFAIL, REFUSED and friends; only an
/// authoritative "no such name" or "no data" answer means the domain has no MX.
pub(crate) fn is_empty_answer(code: ResponseCode) -> bool {
    matches!(code, ResponseCode::NXDomain | ResponseCode::NoError)
}

/// Resolves the preferred mail exchanger of `domain`.
///
/// Never fails: lookup errors and timeouts are logged and reported as
/// [`MxResult::Failed`], a domain without MX data as [`MxResult::Empty`].
pub async fn resolve<L>(lookup: &L, domain: &str, options: &LookupOptions) -> MxResult
where
    L: MxLookup + ?Sized,
{
    match lookup_exchange(lookup, domain, options).await {
        Ok(Some(host)) => MxResult::Host(host),
        Ok(None) => {
            info!(domain, "no MX records found");
            MxResult::Empty
        }
        Err(err) => {
            warn!(domain, error = %err, "MX lookup failed");
            MxResult::Failed
        }
    }
}

async fn lookup_exchange<L>(
    lookup: &L,
    domain: &str,
    options: &LookupOptions,
) -> Result<Option<String>, Error>
where
    L: MxLookup + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let timeout = options.timeout();
    let answers = tokio::time::timeout(timeout, lookup.lookup_mx(&ascii))
        .await
        .map_err(|_| Error::Timeout { elapsed: timeout })??;
    debug!(domain = %ascii, ?answers, "MX answer received");
    Ok(select_exchange(&answers))
}

/// Picks the lowest-priority MX server out of an answer section.
///
/// Entries that are not MX or carry no server are skipped, a missing
/// priority counts as 0 and ties keep answer order.
pub fn select_exchange(answers: &[MxAnswer]) -> Option<String> {
    let mut candidates: Vec<(u16, &str)> = answers
        .iter()
        .filter(|answer| answer.record_type == RecordType::MX)
        .filter_map(|answer| {
            let server = answer.server.as_deref().filter(|s| !s.is_empty())?;
            Some((answer.priority.unwrap_or(0), server))
        })
        .collect();

    candidates.sort_by_key(|(priority, _)| *priority);
    candidates
        .first()
        .map(|(_, server)| normalize_exchange(server))
        // null MX (RFC 7505): "." means the domain accepts no mail
        .filter(|host| !host.is_empty())
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    let trimmed = exchange.strip_suffix('.').unwrap_or(exchange);
    trimmed.to_ascii_lowercase()
}
