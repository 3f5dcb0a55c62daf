// Listener module
// TCP listener construction with address reuse enabled

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR` enabled.
///
/// Address reuse lets a replacement process bind the same address:port
/// before the old one exits, so redeploys do not drop the listening socket,
/// and rebinding works while the port sits in TIME_WAIT.
pub fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;

    // tokio requires the socket in non-blocking mode
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let listener = create_reusable_listener(addr).unwrap();
        let bound = listener.local_addr().unwrap();
        assert_ne!(bound.port(), 0);
    }

    #[tokio::test]
    async fn test_reuse_allows_second_bind() {
        let addr = "127.0.0.1:0".parse().unwrap();
        let first = create_reusable_listener(addr).unwrap();
        let bound = first.local_addr().unwrap();

        // SO_REUSEPORT permits a second listener on the identical address
        let second = create_reusable_listener(bound);
        assert!(second.is_ok());
    }
}
