use std::net::SocketAddr;
use std::str::FromStr;

use netcheck_common::network::target::Target;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Binds `127.0.0.1:preferred`, or an ephemeral port if it is taken.
pub async fn bind_tcp(preferred: u16) -> TcpListener {
    match TcpListener::bind(("127.0.0.1", preferred)).await {
        Ok(listener) => listener,
        Err(_) => TcpListener::bind("127.0.0.1:0").await.unwrap(),
    }
}

pub async fn bind_udp(preferred: u16) -> UdpSocket {
    match UdpSocket::bind(("127.0.0.1", preferred)).await {
        Ok(socket) => socket,
        Err(_) => UdpSocket::bind("127.0.0.1:0").await.unwrap(),
    }
}

pub fn target(addr: SocketAddr) -> Target {
    Target::from_str(&addr.to_string()).unwrap()
}

/// Replies with a single byte to every datagram.
pub fn spawn_udp_echo(socket: UdpSocket) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut buf = [0u8; 1500];
        while let Ok((_, from)) = socket.recv_from(&mut buf).await {
            let _ = socket.send_to(b"!", from).await;
        }
    })
}

/// Reads every datagram and never answers. Each payload is forwarded on the
/// returned channel as it arrives.
pub fn spawn_udp_sink(socket: UdpSocket) -> (JoinHandle<()>, mpsc::UnboundedReceiver<Vec<u8>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut buf = [0u8; 1500];
        while let Ok((n, _)) = socket.recv_from(&mut buf).await {
            let _ = tx.send(buf[..n].to_vec());
        }
    });
    (handle, rx)
}
