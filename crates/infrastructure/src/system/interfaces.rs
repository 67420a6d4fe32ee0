use podhost_dns_domain::{preferred_ipv4, DomainError};
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use tracing::{debug, warn};

/// Any routable address works; no packet is sent.
const ROUTE_PROBE_TARGET: SocketAddr =
    SocketAddr::V4(std::net::SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 53));

/// Address answered for local names: the configured literal when it parses,
/// otherwise the best local interface address.
pub fn select_server_ip(configured: Option<&str>) -> Result<Ipv4Addr, DomainError> {
    if let Some(value) = configured {
        match value.trim().parse::<Ipv4Addr>() {
            Ok(ip) => return Ok(ip),
            Err(_) => warn!(server_ip = %value, "Ignoring unparseable server_ip, auto-detecting"),
        }
    }

    let mut candidates = local_ipv4_addresses();
    if let Some(ip) = route_probe() {
        candidates.push(ip);
    }
    debug!(candidates = ?candidates, "Local IPv4 candidates");

    preferred_ipv4(candidates).ok_or(DomainError::NoServerAddress)
}

/// IPv4 addresses assigned to local interfaces, in kernel order.
#[cfg(unix)]
pub fn local_ipv4_addresses() -> Vec<Ipv4Addr> {
    let mut addrs = Vec::new();
    let mut ifap: *mut libc::ifaddrs = std::ptr::null_mut();

    if unsafe { libc::getifaddrs(&mut ifap) } != 0 {
        warn!(error = %std::io::Error::last_os_error(), "getifaddrs failed");
        return addrs;
    }

    let mut cursor = ifap;
    while !cursor.is_null() {
        let entry = unsafe { &*cursor };
        if !entry.ifa_addr.is_null() {
            let family = unsafe { (*entry.ifa_addr).sa_family };
            if i32::from(family) == libc::AF_INET {
                let sin = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in) };
                addrs.push(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)));
            }
        }
        cursor = entry.ifa_next;
    }

    unsafe { libc::freeifaddrs(ifap) };
    addrs
}

#[cfg(not(unix))]
pub fn local_ipv4_addresses() -> Vec<Ipv4Addr> {
    Vec::new()
}

/// Source address the kernel would use for outbound traffic.
fn route_probe() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect(ROUTE_PROBE_TARGET).ok()?;
    match socket.local_addr().ok()? {
        SocketAddr::V4(addr) => Some(*addr.ip()),
        SocketAddr::V6(_) => None,
    }
}
