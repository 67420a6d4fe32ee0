use std::net::Ipv4Addr;

/// Ranking used when no server address is configured. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AddressPreference {
    Private192,
    Private10,
    Private172,
    Other,
}

impl AddressPreference {
    pub fn of(ip: Ipv4Addr) -> Option<Self> {
        if ip.is_loopback() || ip.is_unspecified() || ip.is_link_local() {
            return None;
        }
        let [a, b, _, _] = ip.octets();
        Some(match (a, b) {
            (192, 168) => Self::Private192,
            (10, _) => Self::Private10,
            (172, 16..=31) => Self::Private172,
            _ => Self::Other,
        })
    }
}

/// Picks the best candidate for answering local names. Ties keep the order
/// the candidates were enumerated in.
pub fn preferred_ipv4<I>(candidates: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = Ipv4Addr>,
{
    candidates
        .into_iter()
        .filter_map(|ip| AddressPreference::of(ip).map(|rank| (rank, ip)))
        .enumerate()
        .min_by_key(|(position, (rank, _))| (*rank, *position))
        .map(|(_, (_, ip))| ip)
}
