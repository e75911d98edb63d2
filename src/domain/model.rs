use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Anything that is keyed by its name within one peer's list.
pub trait Named {
    fn name(&self) -> &str;
}

/// One peer's presence at one exchange, all of its ports folded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ixp {
    pub name: String,
    pub capacity_mbit: u64,
    /// One slot per underlying port; `None` where the port had no IPv4 address.
    pub ipv4_addresses: Vec<Option<Ipv4Addr>>,
    /// One slot per underlying port; `None` where the port had no IPv6 address.
    pub ipv6_addresses: Vec<Option<Ipv6Addr>>,
}

impl Ixp {
    pub fn ipv4(&self) -> impl Iterator<Item = &Ipv4Addr> + '_ {
        self.ipv4_addresses.iter().flatten()
    }

    pub fn ipv6(&self) -> impl Iterator<Item = &Ipv6Addr> + '_ {
        self.ipv6_addresses.iter().flatten()
    }
}

impl Named for Ixp {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A private peering facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facility {
    pub name: String,
    pub local_asn: u32,
    pub city: String,
    pub country: String,
}

impl Named for Facility {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Peer {
    display_name: String,
    asn: u32,
    ixp_presences: Vec<Ixp>,
    facility_presences: Vec<Facility>,
}

impl Peer {
    pub fn new(
        display_name: impl Into<String>,
        asn: u32,
        ixp_presences: Vec<Ixp>,
        facility_presences: Vec<Facility>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            asn,
            ixp_presences,
            facility_presences,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn asn(&self) -> u32 {
        self.asn
    }

    pub fn ixp_presences(&self) -> &[Ixp] {
        &self.ixp_presences
    }

    pub fn facility_presences(&self) -> &[Facility] {
        &self.facility_presences
    }
}

// Raw PeeringDB records (`/api/net?depth=2`). Only the fields used here are
// declared; everything else in the payload is ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct NetEnvelope {
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetRecord {
    pub name: String,
    pub asn: u32,
    pub netixlan_set: Vec<NetIxLan>,
    pub netfac_set: Vec<NetFac>,
}

/// One exchange port.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetIxLan {
    pub name: String,
    #[serde(deserialize_with = "deserialize_speed")]
    pub speed: u64,
    #[serde(default, deserialize_with = "deserialize_optional_addr")]
    pub ipaddr4: Option<Ipv4Addr>,
    #[serde(default, deserialize_with = "deserialize_optional_addr")]
    pub ipaddr6: Option<Ipv6Addr>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetFac {
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub local_asn: u32,
}

impl From<NetFac> for Facility {
    fn from(fac: NetFac) -> Self {
        Facility {
            name: fac.name,
            local_asn: fac.local_asn,
            city: fac.city,
            country: fac.country,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpeed {
    Number(u64),
    Text(String),
}

fn deserialize_speed<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawSpeed::deserialize(deserializer)? {
        RawSpeed::Number(speed) => Ok(speed),
        RawSpeed::Text(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|e| de::Error::custom(format!("invalid speed '{}': {}", text, e))),
    }
}

// null, a missing key and "" all mean "no address"
fn deserialize_optional_addr<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(addr) => addr
            .parse::<T>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid address '{}': {}", addr, e))),
    }
}
