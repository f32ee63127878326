//! Startup reporting for Private Share
//!
//! Works out which URLs the server can be reached on and prints them once
//! the listener is bound.

use std::net::{IpAddr, SocketAddr, UdpSocket};

use tracing::info;

/// Best guess at this host's address on the local network.
///
/// Connecting a UDP socket sends nothing; it only selects the outbound
/// interface.
pub fn network_address() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("192.0.2.1:80").ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (!ip.is_unspecified() && !ip.is_loopback()).then_some(ip)
}

/// URLs a browser can use to reach a server bound to `addr`
pub fn reachable_urls(addr: SocketAddr, network: Option<IpAddr>) -> Vec<String> {
    let port = addr.port();
    if !addr.ip().is_unspecified() {
        return vec![format!("http://{}", addr)];
    }

    let mut urls = vec![format!("http://localhost:{}", port)];
    if let Some(ip) = network {
        urls.push(format!("http://{} (probably)", SocketAddr::new(ip, port)));
    }
    urls
}

/// Print where the server is listening
pub fn announce(addr: SocketAddr) {
    let urls = reachable_urls(addr, network_address());

    info!("Listening on {}", addr);
    println!("Private Share now running on:");
    for url in urls {
        println!("- {}", url);
    }
}
