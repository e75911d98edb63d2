use crate::core::normalize::normalize_response;
use crate::core::{Peer, PeerSource};
use crate::utils::error::{PeerFinderError, Result};
use std::collections::HashSet;

pub struct PeerFinder<S: PeerSource> {
    source: S,
}

impl<S: PeerSource> PeerFinder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and normalize every requested ASN, in request order.
    ///
    /// Stops at the first failure; there is no partial result.
    pub async fn build_peers(&self, asns: &[u32]) -> Result<Vec<Peer>> {
        if asns.is_empty() {
            return Err(PeerFinderError::EmptyPeerList);
        }

        let mut seen = HashSet::new();
        let mut peers = Vec::with_capacity(asns.len());

        for &asn in asns {
            if !seen.insert(asn) {
                tracing::warn!("AS{} requested more than once, skipping duplicate", asn);
                continue;
            }

            tracing::info!("Fetching PeeringDB info for AS{}", asn);
            let payload = self.source.fetch_network(asn).await?;
            let peer = normalize_response(asn, payload)?;
            tracing::debug!(
                "AS{} is {}: {} exchanges, {} facilities",
                peer.asn(),
                peer.display_name(),
                peer.ixp_presences().len(),
                peer.facility_presences().len()
            );
            peers.push(peer);
        }

        Ok(peers)
    }
}
