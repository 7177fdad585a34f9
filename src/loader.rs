//! Checkpoint ingestion: compiled-in defaults, JSON hash file and DNS.
//!
//! Loaders only produce `(height, hash)` pairs and push them through
//! [`CheckpointStore::add`]; they never hold on to the store.

pub mod dns;
pub mod file;

pub use dns::*;
pub use file::*;

use crate::checkpoints::{AddOutcome, CheckpointStore};
use crate::error::CheckpointError;
use crate::network::NetworkType;
use crate::params::NetworkParams;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Per-source tally of what a load did to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub added: usize,
    pub already_present: usize,
    pub skipped: usize,
}

impl LoadReport {
    pub(crate) fn record(&mut self, outcome: AddOutcome) {
        match outcome {
            AddOutcome::Added => self.added += 1,
            AddOutcome::AlreadyPresent => self.already_present += 1,
        }
    }
}

/// Everything the sources produced, read before the store is touched.
#[derive(Debug)]
pub struct PendingLoad {
    path: PathBuf,
    file: Result<Option<HashFile>, CheckpointError>,
    dns: Option<DnsLookup>,
}

/// Runs the file and DNS sources against a store for one network.
pub struct CheckpointLoader {
    network: NetworkType,
    dns_domains: Vec<String>,
    resolver: Box<dyn TxtResolver>,
}

impl CheckpointLoader {
    /// Loader using the network's compiled-in DNS domains and no resolver.
    pub fn new(network: NetworkType) -> Self {
        Self {
            network,
            dns_domains: NetworkParams::for_network(network).dns_domains(),
            resolver: Box::new(NoResolver),
        }
    }

    pub fn with_dns_domains(mut self, domains: Vec<String>) -> Self {
        self.dns_domains = domains;
        self
    }

    pub fn with_resolver(mut self, resolver: Box<dyn TxtResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Serve DNS records fetched out of band. `origin` names where they
    /// came from and stands in as the domain when none is configured, so
    /// the records are not dropped by the empty-domain check.
    pub fn with_prefetched_records(mut self, origin: &str, records: Vec<String>) -> Self {
        if self.dns_domains.is_empty() {
            self.dns_domains = vec![origin.to_string()];
        }
        self.resolver = Box::new(StaticResolver::new(records));
        self
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    pub fn dns_domains(&self) -> &[String] {
        &self.dns_domains
    }

    /// Read the hash file and, when `use_dns` is set, query the resolver.
    /// Nothing here needs the store.
    pub fn fetch(&self, path: &Path, use_dns: bool) -> PendingLoad {
        PendingLoad {
            path: path.to_path_buf(),
            file: HashFile::read(path),
            dns: use_dns.then(|| fetch_dns_records(&self.dns_domains, self.resolver.as_ref())),
        }
    }

    /// Merge fetched sources into `store`. Every source that was fetched is
    /// applied; the result is true only if all of them succeeded. Entries
    /// merged by a source are kept even when another source fails.
    pub fn apply(&self, store: &mut CheckpointStore, pending: PendingLoad) -> bool {
        let path = pending.path.as_path();
        let mut result = match pending
            .file
            .and_then(|file| apply_hash_file(store, path, file.as_ref()))
        {
            Ok(report) => {
                info!(
                    "Hash file checkpoints: {} added, {} already present, {} skipped",
                    report.added, report.already_present, report.skipped
                );
                true
            }
            Err(e) => {
                error!("Error loading checkpoints from {}: {}", path.display(), e);
                false
            }
        };

        if let Some(lookup) = &pending.dns {
            result &= match apply_dns_records(store, lookup) {
                Ok(report) => {
                    info!(
                        "DNS checkpoints for {}: {} added, {} already present, {} skipped",
                        self.network, report.added, report.already_present, report.skipped
                    );
                    true
                }
                Err(e) => {
                    error!("Error loading DNS checkpoints for {}: {}", self.network, e);
                    false
                }
            };
        }

        result
    }

    /// Always runs the file source, and the DNS source too when `use_dns`
    /// is set. Both run to completion; see [`apply`](Self::apply).
    pub fn load_new_checkpoints(&self, store: &mut CheckpointStore, path: &Path, use_dns: bool) -> bool {
        let pending = self.fetch(path, use_dns);
        self.apply(store, pending)
    }
}

/// Convenience form of [`CheckpointLoader::load_new_checkpoints`] for a
/// network's compiled-in domains and the given resolver.
pub fn load_new_checkpoints(
    store: &mut CheckpointStore,
    path: &Path,
    network: NetworkType,
    use_dns: bool,
    resolver: Box<dyn TxtResolver>,
) -> bool {
    CheckpointLoader::new(network)
        .with_resolver(resolver)
        .load_new_checkpoints(store, path, use_dns)
}
