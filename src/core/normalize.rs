use crate::core::dedup::dedup_exchanges;
use crate::core::{Facility, NetEnvelope, NetRecord, Peer};
use crate::utils::error::{PeerFinderError, Result};

/// Turn one raw `/net` response into a `Peer`.
///
/// The response must hold exactly one network record. Any missing or
/// malformed required field fails the whole conversion.
pub fn normalize_response(asn: u32, payload: serde_json::Value) -> Result<Peer> {
    let envelope: NetEnvelope =
        serde_path_to_error::deserialize(payload).map_err(|e| malformed(asn, "", e))?;

    let count = envelope.data.len();
    if count != 1 {
        return Err(PeerFinderError::UnexpectedRecordCount { asn, count });
    }

    let raw = envelope
        .data
        .into_iter()
        .next()
        .ok_or(PeerFinderError::UnexpectedRecordCount { asn, count })?;

    let record: NetRecord =
        serde_path_to_error::deserialize(raw).map_err(|e| malformed(asn, "data[0].", e))?;

    normalize_record(asn, record)
}

pub fn normalize_record(requested_asn: u32, record: NetRecord) -> Result<Peer> {
    if record.asn == 0 {
        return Err(PeerFinderError::MalformedRecord {
            asn: requested_asn,
            path: "asn".to_string(),
            message: "ASN 0 is reserved".to_string(),
        });
    }
    if record.asn != requested_asn {
        tracing::warn!(
            "Asked for AS{} but PeeringDB answered with AS{} ({})",
            requested_asn,
            record.asn,
            record.name
        );
    }

    let port_count = record.netixlan_set.len();
    let ixps = dedup_exchanges(record.netixlan_set).map_err(|overflow| {
        PeerFinderError::MalformedRecord {
            asn: requested_asn,
            path: "netixlan_set.speed".to_string(),
            message: format!(
                "total port speed at {} does not fit in 64 bits",
                overflow.exchange
            ),
        }
    })?;
    let facilities: Vec<Facility> = record.netfac_set.into_iter().map(Facility::from).collect();

    tracing::debug!(
        "AS{} ({}): {} ports on {} exchanges, {} facilities",
        record.asn,
        record.name,
        port_count,
        ixps.len(),
        facilities.len()
    );

    Ok(Peer::new(record.name, record.asn, ixps, facilities))
}

fn malformed(
    asn: u32,
    prefix: &str,
    e: serde_path_to_error::Error<serde_json::Error>,
) -> PeerFinderError {
    PeerFinderError::MalformedRecord {
        asn,
        path: match e.path().iter().next() {
            // root path renders as "."
            None if !prefix.is_empty() => prefix.trim_end_matches('.').to_string(),
            _ => format!("{}{}", prefix, e.path()),
        },
        message: e.into_inner().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sets::lookup_by_name;
    use crate::core::Ixp;
    use serde_json::json;

    fn netixlan(name: &str, speed: serde_json::Value, v4: &str) -> serde_json::Value {
        json!({
            "id": 1,
            "ix_id": 2,
            "name": name,
            "ixlan_id": 3,
            "notes": "",
            "speed": speed,
            "asn": 65536,
            "ipaddr4": v4,
            "ipaddr6": null,
            "is_rs_peer": true,
            "operational": true,
            "status": "ok"
        })
    }

    fn netfac() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Test Facility",
            "city": "Dublin",
            "country": "IE",
            "fac_id": 1,
            "local_asn": 65536,
            "status": "ok"
        })
    }

    fn response(records: Vec<serde_json::Value>) -> serde_json::Value {
        json!({ "meta": {}, "data": records })
    }

    fn record() -> serde_json::Value {
        json!({
            "id": 10,
            "name": "Test Peer",
            "asn": 65536,
            "netixlan_set": [
                netixlan("Test IX", json!(1000), "192.0.2.1"),
                netixlan("Test IX", json!("1000"), "192.0.2.2"),
                netixlan("Other IX", json!(10000), "198.51.100.7")
            ],
            "netfac_set": [netfac()]
        })
    }

    #[test]
    fn test_normalize_single_record() {
        let peer = normalize_response(65536, response(vec![record()])).unwrap();

        assert_eq!(peer.display_name(), "Test Peer");
        assert_eq!(peer.asn(), 65536);
        assert_eq!(peer.ixp_presences().len(), 2);
        assert_eq!(peer.ixp_presences()[0].name, "Test IX");
        assert_eq!(peer.ixp_presences()[0].capacity_mbit, 2000);
        assert_eq!(peer.ixp_presences()[0].ipv4().count(), 2);
        assert_eq!(peer.facility_presences().len(), 1);
        assert_eq!(peer.facility_presences()[0].local_asn, 65536);
    }

    #[test]
    fn test_zero_records() {
        let err = normalize_response(64511, response(vec![])).unwrap_err();
        assert!(matches!(
            err,
            PeerFinderError::UnexpectedRecordCount { asn: 64511, count: 0 }
        ));
    }

    #[test]
    fn test_two_records() {
        let err = normalize_response(65536, response(vec![record(), record()])).unwrap_err();
        assert!(matches!(
            err,
            PeerFinderError::UnexpectedRecordCount { count: 2, .. }
        ));
    }

    #[test]
    fn test_missing_data_key() {
        let err = normalize_response(65536, json!({"meta": {}})).unwrap_err();
        assert!(matches!(err, PeerFinderError::MalformedRecord { .. }));
    }

    #[test]
    fn test_malformed_port_names_path() {
        let mut bad = record();
        bad["netixlan_set"][1]["speed"] = json!("lots");

        let err = normalize_response(65536, response(vec![bad])).unwrap_err();
        match err {
            PeerFinderError::MalformedRecord { path, .. } => {
                assert!(path.starts_with("data[0].netixlan_set"), "path was {}", path);
                assert!(path.ends_with("speed"), "path was {}", path);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_facility_asn_fails() {
        let mut bad = record();
        bad["netfac_set"][0]
            .as_object_mut()
            .unwrap()
            .remove("local_asn");

        let err = normalize_response(65536, response(vec![bad])).unwrap_err();
        assert!(matches!(err, PeerFinderError::MalformedRecord { .. }));
    }

    #[test]
    fn test_speed_overflow_is_malformed() {
        let single = json!({
            "name": "Test Peer",
            "asn": 64500,
            "netixlan_set": [
                {"name": "IX1", "speed": u64::MAX},
                {"name": "IX1", "speed": 1}
            ],
            "netfac_set": []
        });

        let err = normalize_response(64500, response(vec![single])).unwrap_err();
        match err {
            PeerFinderError::MalformedRecord { asn, path, message } => {
                assert_eq!(asn, 64500);
                assert_eq!(path, "netixlan_set.speed");
                assert!(message.contains("IX1"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_record_that_is_not_an_object() {
        let err = normalize_response(65536, response(vec![json!("nope")])).unwrap_err();
        match err {
            PeerFinderError::MalformedRecord { path, .. } => assert_eq!(path, "data[0]"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_asn_rejected() {
        let mut bad = record();
        bad["asn"] = json!(0);

        let err = normalize_response(65536, response(vec![bad])).unwrap_err();
        assert!(matches!(err, PeerFinderError::MalformedRecord { .. }));
    }

    #[test]
    fn test_lookup_after_normalize_returns_same_entity() {
        let single = json!({
            "name": "Test Peer",
            "asn": 65536,
            "netixlan_set": [netixlan("Test IX", json!(1000), "192.0.2.1")],
            "netfac_set": [netfac()]
        });
        let peer = normalize_response(65536, response(vec![single])).unwrap();

        let expected = Ixp {
            name: "Test IX".to_string(),
            capacity_mbit: 1000,
            ipv4_addresses: vec![Some("192.0.2.1".parse().unwrap())],
            ipv6_addresses: vec![None],
        };
        let found = lookup_by_name("Test IX", peer.ixp_presences()).unwrap();
        assert_eq!(found, &expected);

        let fac = lookup_by_name("Test Facility", peer.facility_presences()).unwrap();
        assert_eq!(fac, &peer.facility_presences()[0]);
    }
}
