use crate::core::{Ixp, NetIxLan};
use std::collections::HashMap;

/// The summed port speed at one exchange does not fit in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityOverflow {
    pub exchange: String,
}

/// Fold exchange ports into one `Ixp` per exchange name.
///
/// PeeringDB returns a separate record per port, so a network with two
/// ports at the same exchange shows up twice. Groups keep first-seen order,
/// speeds are summed, and every port contributes one slot to each address
/// list (absent addresses included).
pub fn dedup_exchanges(ports: Vec<NetIxLan>) -> Result<Vec<Ixp>, CapacityOverflow> {
    let mut exchanges: Vec<Ixp> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for port in ports {
        match index.get(&port.name) {
            Some(&i) => {
                let ixp = &mut exchanges[i];
                ixp.capacity_mbit =
                    ixp.capacity_mbit
                        .checked_add(port.speed)
                        .ok_or_else(|| CapacityOverflow {
                            exchange: ixp.name.clone(),
                        })?;
                ixp.ipv4_addresses.push(port.ipaddr4);
                ixp.ipv6_addresses.push(port.ipaddr6);
            }
            None => {
                index.insert(port.name.clone(), exchanges.len());
                exchanges.push(Ixp {
                    name: port.name,
                    capacity_mbit: port.speed,
                    ipv4_addresses: vec![port.ipaddr4],
                    ipv6_addresses: vec![port.ipaddr6],
                });
            }
        }
    }

    tracing::trace!("Folded ports into {} exchanges", exchanges.len());
    Ok(exchanges)
}
