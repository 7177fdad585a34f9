//! DNS TXT record source.
//!
//! Resolution itself happens outside the crate; a [`TxtResolver`] hands back
//! the already fetched `"<height>:<hex hash>"` strings.

use crate::checkpoints::{Checkpoint, CheckpointStore};
use crate::error::CheckpointError;
use crate::hash::BlockHash;
use crate::loader::LoadReport;
use tracing::{debug, info};

/// What a resolver produced for the configured domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsLookup {
    Records(Vec<String>),
    Unavailable,
}

pub trait TxtResolver {
    fn txt_records(&self, domains: &[String]) -> DnsLookup;
}

/// Serves a fixed list of records regardless of the domains asked for.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    records: Vec<String>,
}

impl StaticResolver {
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: records.into_iter().map(Into::into).collect(),
        }
    }
}

impl TxtResolver for StaticResolver {
    fn txt_records(&self, _domains: &[String]) -> DnsLookup {
        DnsLookup::Records(self.records.clone())
    }
}

/// A resolver for builds without DNS access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl TxtResolver for NoResolver {
    fn txt_records(&self, _domains: &[String]) -> DnsLookup {
        DnsLookup::Unavailable
    }
}

/// Parse one `"<decimal height>:<hex hash>"` record. Only the first `:`
/// splits; no whitespace is tolerated.
pub fn parse_dns_record(record: &str) -> Result<Checkpoint, CheckpointError> {
    let (height_str, hash_str) = record
        .split_once(':')
        .ok_or_else(|| CheckpointError::InvalidRecord(format!("missing ':' in {:?}", record)))?;

    if height_str.is_empty() || !height_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CheckpointError::InvalidHeight(height_str.to_string()));
    }
    let height = height_str
        .parse::<u64>()
        .map_err(|e| CheckpointError::InvalidHeight(format!("{}: {}", height_str, e)))?;
    let hash = BlockHash::from_hex(hash_str)?;

    Ok(Checkpoint::new(height, hash))
}

/// Ask `resolver` for the records published under `domains`. With no
/// domains configured the resolver is not consulted.
pub fn fetch_dns_records(domains: &[String], resolver: &dyn TxtResolver) -> DnsLookup {
    if domains.is_empty() {
        info!("No DNS checkpoint domains configured");
        return DnsLookup::Records(Vec::new());
    }
    resolver.txt_records(domains)
}

/// Merge already fetched DNS records into `store`.
///
/// Unparsable records are skipped one by one. An unavailable lookup or an
/// empty record list counts as success with nothing loaded. A parsed record
/// that conflicts with the store fails the source.
pub fn apply_dns_records(
    store: &mut CheckpointStore,
    lookup: &DnsLookup,
) -> Result<LoadReport, CheckpointError> {
    let records = match lookup {
        DnsLookup::Records(records) => records,
        DnsLookup::Unavailable => {
            info!("DNS checkpoints unavailable, nothing loaded");
            return Ok(LoadReport::default());
        }
    };

    let mut report = LoadReport::default();
    for record in records {
        match parse_dns_record(record) {
            Ok(cp) => report.record(store.add(cp.height, cp.hash)?),
            Err(e) => {
                debug!("Skipping DNS checkpoint record {:?}: {}", record, e);
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

/// Fetch and merge DNS-published checkpoints in one step.
pub fn load_checkpoints_from_dns(
    store: &mut CheckpointStore,
    domains: &[String],
    resolver: &dyn TxtResolver,
) -> Result<LoadReport, CheckpointError> {
    apply_dns_records(store, &fetch_dns_records(domains, resolver))
}
