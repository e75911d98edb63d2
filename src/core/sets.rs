use crate::core::{Named, Peer};
use crate::utils::error::{PeerFinderError, Result};
use std::collections::HashSet;

/// Which of a peer's presence lists to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Ixp,
    Facility,
}

impl Selector {
    pub fn names<'a>(&self, peer: &'a Peer) -> HashSet<&'a str> {
        match self {
            Selector::Ixp => peer.ixp_presences().iter().map(Named::name).collect(),
            Selector::Facility => peer.facility_presences().iter().map(Named::name).collect(),
        }
    }

    fn ordered_names<'a>(&self, peer: &'a Peer) -> Vec<&'a str> {
        match self {
            Selector::Ixp => peer.ixp_presences().iter().map(Named::name).collect(),
            Selector::Facility => peer.facility_presences().iter().map(Named::name).collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selector::Ixp => "IX",
            Selector::Facility => "Facility",
        }
    }
}

/// Names present for every peer. Iteration order is unspecified.
pub fn common_names<'a>(peers: &'a [Peer], selector: Selector) -> Result<HashSet<&'a str>> {
    let (first, rest) = peers.split_first().ok_or(PeerFinderError::EmptyPeerList)?;

    let mut common = selector.names(first);
    for peer in rest {
        let names = selector.names(peer);
        common.retain(|name| names.contains(name));
    }
    Ok(common)
}

/// Names some peers have but not all, in first-seen order without repeats.
pub fn divergent_names<'a>(peers: &'a [Peer], selector: Selector) -> Result<Vec<&'a str>> {
    let common = common_names(peers, selector)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut divergent = Vec::new();
    for peer in peers {
        for name in selector.ordered_names(peer) {
            if !common.contains(name) && seen.insert(name) {
                divergent.push(name);
            }
        }
    }
    Ok(divergent)
}

/// Exact, case-sensitive lookup within one peer's list.
pub fn lookup_by_name<'a, T: Named>(name: &str, entities: &'a [T]) -> Result<&'a T> {
    entities
        .iter()
        .find(|entity| entity.name() == name)
        .ok_or_else(|| PeerFinderError::NotFound {
            name: name.to_string(),
        })
}
