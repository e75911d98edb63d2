use crate::core::sets::{common_names, divergent_names, lookup_by_name, Selector};
use crate::core::{Ixp, Peer};
use crate::utils::error::{PeerFinderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// A rendered-ready grid: one row per name, one column per peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.to_table()),
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::Json => self.to_json(),
        }
    }

    fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.header.clone());
        for row in &self.rows {
            builder.push_record(row.clone());
        }
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.replace('\n', " ")))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| PeerFinderError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            PeerFinderError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn to_json(&self) -> Result<String> {
        let keys = unique_keys(&self.header);
        let objects: Vec<serde_json::Map<String, serde_json::Value>> = self
            .rows
            .iter()
            .map(|row| {
                keys.iter()
                    .cloned()
                    .zip(row.iter().cloned().map(serde_json::Value::String))
                    .collect()
            })
            .collect();
        Ok(serde_json::to_string_pretty(&objects)?)
    }
}

/// Object keys for JSON rows. A repeated header gets ` (2)`, ` (3)`, ...
/// appended so no column overwrites another.
fn unique_keys(header: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(header.len());
    header
        .iter()
        .map(|h| {
            let mut key = h.clone();
            let mut n = 1;
            while seen.contains(&key) {
                n += 1;
                key = format!("{} ({})", h, n);
            }
            seen.insert(key.clone());
            key
        })
        .collect()
}

/// Fixed columns followed by one column per peer. A peer whose display name
/// clashes with a fixed column or another peer is labelled with its ASN too.
fn peer_header(first: &str, extra: &[&str], peers: &[Peer], suffix: &str) -> Vec<String> {
    let mut header = vec![first.to_string()];
    header.extend(extra.iter().map(|h| h.to_string()));

    let clashes = |peer: &Peer| {
        let label = format!("{}{}", peer.display_name(), suffix);
        header.contains(&label)
            || peers
                .iter()
                .filter(|other| other.display_name() == peer.display_name())
                .count()
                > 1
    };
    let labels: Vec<String> = peers
        .iter()
        .map(|peer| {
            if clashes(peer) {
                format!("{} (AS{}){}", peer.display_name(), peer.asn(), suffix)
            } else {
                format!("{}{}", peer.display_name(), suffix)
            }
        })
        .collect();

    header.extend(labels);
    header
}

fn sorted_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort();
    names
}

fn ixp_cell(ixp: &Ixp) -> String {
    let v4: Vec<String> = ixp.ipv4().map(|a| a.to_string()).collect();
    let v6: Vec<String> = ixp.ipv6().map(|a| a.to_string()).collect();

    let mut lines = vec![format!("v4: {}", v4.join("\n"))];
    if !v6.is_empty() {
        lines.push(format!("v6: {}", v6.join("\n")));
    }
    lines.join("\n")
}

/// Exchanges every peer is present at, with each peer's addresses there.
pub fn common_ixp_report(peers: &[Peer]) -> Result<Report> {
    let names = sorted_names(
        common_names(peers, Selector::Ixp)?
            .into_iter()
            .map(str::to_string),
    );
    if names.is_empty() {
        return Err(PeerFinderError::NoResults {
            kind: "common IX".to_string(),
        });
    }

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let mut row = vec![name.clone()];
        for peer in peers {
            row.push(ixp_cell(lookup_by_name(&name, peer.ixp_presences())?));
        }
        rows.push(row);
    }

    Ok(Report {
        title: "Common IXPs".to_string(),
        header: peer_header(Selector::Ixp.label(), &[], peers, ""),
        rows,
    })
}

/// Private facilities every peer is present in, with each peer's local ASN.
pub fn common_facility_report(peers: &[Peer]) -> Result<Report> {
    let names = sorted_names(
        common_names(peers, Selector::Facility)?
            .into_iter()
            .map(str::to_string),
    );
    if names.is_empty() {
        return Err(PeerFinderError::NoResults {
            kind: "common Facility".to_string(),
        });
    }

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let mut row = vec![name.clone()];
        let mut cells = Vec::with_capacity(peers.len());
        for peer in peers {
            let facility = lookup_by_name(&name, peer.facility_presences())?;
            if row.len() == 1 {
                row.push(facility.city.clone());
                row.push(facility.country.clone());
            }
            cells.push(format!("ASN: {}", facility.local_asn));
        }
        row.extend(cells);
        rows.push(row);
    }

    Ok(Report {
        title: "Common private facilities".to_string(),
        header: peer_header(Selector::Facility.label(), &["City", "Country"], peers, ""),
        rows,
    })
}

/// Exchanges only some of the peers are present at, with each peer's
/// capacity there (blank where the peer is absent).
pub fn missing_ixp_report(peers: &[Peer]) -> Result<Report> {
    let names = sorted_names(
        divergent_names(peers, Selector::Ixp)?
            .into_iter()
            .map(str::to_string),
    );
    if names.is_empty() {
        return Err(PeerFinderError::NoResults {
            kind: "uncommon IX".to_string(),
        });
    }

    let mut rows = Vec::with_capacity(names.len());
    for name in names {
        let mut row = vec![name.clone()];
        for peer in peers {
            let cell = match lookup_by_name(&name, peer.ixp_presences()) {
                Ok(ixp) => format!("{}Mbit", ixp.capacity_mbit),
                Err(PeerFinderError::NotFound { .. }) => String::new(),
                Err(e) => return Err(e),
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(Report {
        title: "IXPs not shared by all peers".to_string(),
        header: peer_header(Selector::Ixp.label(), &[], peers, " speed"),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Facility;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn ixp(name: &str, speed: u64, v4: &[&str], v6: &[&str]) -> Ixp {
        let mut ipv4_addresses: Vec<Option<Ipv4Addr>> =
            v4.iter().map(|a| Some(a.parse().unwrap())).collect();
        let mut ipv6_addresses: Vec<Option<Ipv6Addr>> =
            v6.iter().map(|a| Some(a.parse().unwrap())).collect();
        // pad with absent slots so both lists have one slot per port
        while ipv4_addresses.len() < ipv6_addresses.len() {
            ipv4_addresses.push(None);
        }
        while ipv6_addresses.len() < ipv4_addresses.len() {
            ipv6_addresses.push(None);
        }
        Ixp {
            name: name.to_string(),
            capacity_mbit: speed,
            ipv4_addresses,
            ipv6_addresses,
        }
    }

    fn fac(name: &str, asn: u32) -> Facility {
        Facility {
            name: name.to_string(),
            local_asn: asn,
            city: "Frankfurt".to_string(),
            country: "DE".to_string(),
        }
    }

    fn two_peers() -> Vec<Peer> {
        vec![
            Peer::new(
                "peer1",
                64500,
                vec![ixp("Test IX1", 1000, &["192.0.2.1"], &[])],
                vec![fac("Fac 1", 64500), fac("Fac 2", 64500)],
            ),
            Peer::new(
                "peer2",
                64501,
                vec![
                    ixp("Test IX2", 10000, &["192.0.2.2"], &[]),
                    ixp("Test IX1", 2000, &["192.0.2.3", "192.0.2.4"], &["2001:db8::3"]),
                ],
                vec![fac("Fac 1", 64999)],
            ),
        ]
    }

    #[test]
    fn test_common_ixp_report() {
        let report = common_ixp_report(&two_peers()).unwrap();

        assert_eq!(report.header, vec!["IX", "peer1", "peer2"]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0][0], "Test IX1");
        assert_eq!(report.rows[0][1], "v4: 192.0.2.1");
        assert_eq!(
            report.rows[0][2],
            "v4: 192.0.2.3\n192.0.2.4\nv6: 2001:db8::3"
        );
    }

    #[test]
    fn test_common_facility_report() {
        let report = common_facility_report(&two_peers()).unwrap();

        assert_eq!(
            report.header,
            vec!["Facility", "City", "Country", "peer1", "peer2"]
        );
        assert_eq!(
            report.rows,
            vec![vec!["Fac 1", "Frankfurt", "DE", "ASN: 64500", "ASN: 64999"]]
        );
    }

    #[test]
    fn test_missing_ixp_report_blank_when_absent() {
        let report = missing_ixp_report(&two_peers()).unwrap();

        assert_eq!(report.header, vec!["IX", "peer1 speed", "peer2 speed"]);
        assert_eq!(report.rows, vec![vec!["Test IX2", "", "10000Mbit"]]);
    }

    #[test]
    fn test_rows_sorted_by_name() {
        let peers = vec![
            Peer::new(
                "a",
                1,
                vec![ixp("LINX", 1, &[], &[]), ixp("AMS-IX", 1, &[], &[])],
                vec![],
            ),
            Peer::new(
                "b",
                2,
                vec![ixp("DE-CIX", 1, &[], &[]), ixp("BCIX", 1, &[], &[])],
                vec![],
            ),
        ];

        let report = missing_ixp_report(&peers).unwrap();
        let names: Vec<&str> = report.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["AMS-IX", "BCIX", "DE-CIX", "LINX"]);
    }

    #[test]
    fn test_nothing_in_common() {
        let peers = vec![
            Peer::new("a", 1, vec![ixp("IX1", 1, &[], &[])], vec![]),
            Peer::new("b", 2, vec![ixp("IX2", 1, &[], &[])], vec![]),
        ];

        assert!(matches!(
            common_ixp_report(&peers),
            Err(PeerFinderError::NoResults { .. })
        ));
        assert!(matches!(
            common_facility_report(&peers),
            Err(PeerFinderError::NoResults { .. })
        ));
    }

    #[test]
    fn test_render_table() {
        let report = common_ixp_report(&two_peers()).unwrap();
        let table = report.render(OutputFormat::Table).unwrap();

        assert!(table.contains("Test IX1"));
        assert!(table.contains("peer2"));
        assert!(table.contains("192.0.2.4"));
    }

    #[test]
    fn test_render_csv() {
        let report = common_ixp_report(&two_peers()).unwrap();
        let csv = report.render(OutputFormat::Csv).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "IX,peer1,peer2");
        assert_eq!(
            lines[1],
            "Test IX1,v4: 192.0.2.1,v4: 192.0.2.3 192.0.2.4 v6: 2001:db8::3"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_render_json() {
        let report = missing_ixp_report(&two_peers()).unwrap();
        let json = report.render(OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"IX": "Test IX2", "peer1 speed": "", "peer2 speed": "10000Mbit"}
            ])
        );
    }

    #[test]
    fn test_clashing_peer_names_keep_every_column() {
        let peers = vec![
            Peer::new("Same", 64500, vec![ixp("IX1", 1000, &[], &[])], vec![]),
            Peer::new("Same", 64501, vec![ixp("IX1", 2000, &[], &[])], vec![]),
            Peer::new("IX", 64502, vec![ixp("IX1", 3000, &[], &[])], vec![]),
        ];

        let report = common_ixp_report(&peers).unwrap();
        assert_eq!(
            report.header,
            vec!["IX", "Same (AS64500)", "Same (AS64501)", "IX (AS64502)"]
        );

        let json = report.render(OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let row = parsed[0].as_object().unwrap();
        assert_eq!(row.len(), 4);
        assert_eq!(row["IX"], "IX1");
        assert_eq!(row["IX (AS64502)"], "v4: ");
    }

    #[test]
    fn test_json_keys_unique_for_hand_built_report() {
        let report = Report {
            title: "t".to_string(),
            header: vec!["a".to_string(), "a".to_string(), "a".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string(), "3".to_string()]],
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!([{"a": "1", "a (2)": "2", "a (3)": "3"}]));
    }
}
