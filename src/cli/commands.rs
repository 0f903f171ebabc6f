use crate::cache::{ArtifactStore, Clock, FileArtifactStore, MemoizingFetcher, SystemClock};
use crate::cli::options::Mode;
use crate::error::{MaasInvError, Result};
use crate::inventory::{raw_view, render, DocumentStyle, InventoryBuilder};
use crate::maas::MachineSource;
use tracing::{info, warn};

/// Document printed when a host lookup finds nothing
pub const NOT_FOUND_DOCUMENT: &str = "{}";

/// Serves the CLI modes from a machine source behind the memoizing fetcher
pub struct InventoryService<M, S = FileArtifactStore, C = SystemClock> {
    source: M,
    fetcher: MemoizingFetcher<S, C>,
}

impl<M, S, C> InventoryService<M, S, C>
where
    M: MachineSource,
    S: ArtifactStore,
    C: Clock,
{
    pub fn new(source: M, fetcher: MemoizingFetcher<S, C>) -> Self {
        Self { source, fetcher }
    }

    pub fn fetcher(&self) -> &MemoizingFetcher<S, C> {
        &self.fetcher
    }

    /// Machine list, served from the cache while it is fresh
    pub async fn nodes(&self) -> Result<String> {
        let source = &self.source;
        self.fetcher
            .resolve(move || async move {
                source.fetch_nodes().await.map_err(MaasInvError::from)
            })
            .await
    }

    pub async fn builder(&self) -> Result<InventoryBuilder> {
        let nodes = self.nodes().await?;
        Ok(InventoryBuilder::from_artifact(&nodes)?)
    }

    /// Drop the cached machine list
    pub async fn refresh(&self) -> Result<()> {
        Ok(self.fetcher.invalidate().await?)
    }

    /// Produce the document for one mode
    pub async fn run(&self, mode: &Mode) -> Result<String> {
        info!("Running {:?}", mode);
        let document = match mode {
            Mode::List => render(&self.builder().await?.inventory(), DocumentStyle::Listing)?,
            Mode::Groups => render(&self.builder().await?.group_names(), DocumentStyle::Listing)?,
            Mode::Host(fragment) => match self.builder().await?.host_facts(fragment) {
                Some(facts) => render(&facts, DocumentStyle::Facts)?,
                None => not_found(fragment),
            },
            Mode::Node(fragment) => match self.builder().await?.host_record(fragment) {
                Some(record) => render(record, DocumentStyle::Listing)?,
                None => not_found(fragment),
            },
            Mode::Raw => {
                let nodes = self.nodes().await?;
                raw_view(&nodes)?.to_string()
            }
            Mode::RawHost(hostname) => {
                let nodes = self.source.fetch_nodes_matching(hostname).await?;
                raw_view(&nodes)?.to_string()
            }
        };
        Ok(document)
    }
}

fn not_found(fragment: &str) -> String {
    warn!("No host matching '{}' in the inventory", fragment);
    NOT_FOUND_DOCUMENT.to_string()
}
