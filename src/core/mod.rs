pub mod dedup;
pub mod finder;
pub mod normalize;
pub mod sets;

pub use crate::domain::model::{
    Facility, Ixp, Named, NetEnvelope, NetFac, NetIxLan, NetRecord, Peer,
};
pub use crate::domain::ports::{ConfigProvider, PeerSource};
pub use crate::utils::error::Result;
