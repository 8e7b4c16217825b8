//! Integration tests for the TCP prober against real loopback sockets.

use std::time::{Duration, Instant};

use roomlink_net::{ProbePolicy, Prober, TcpProber};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

fn fast_policy() -> ProbePolicy {
    ProbePolicy {
        timeout: Duration::from_millis(200),
        max_attempts: 3,
    }
}

/// Returns a loopback port with nothing listening on it.
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_probe_listening_port_is_reachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    assert!(TcpProber.is_reachable("127.0.0.1", port, &fast_policy()).await);
}

#[tokio::test]
async fn test_probe_hostname_is_reachable_without_prior_resolution() {
    // The prober hands the hostname straight to connect.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    assert!(TcpProber.is_reachable("localhost", port, &fast_policy()).await);
}

#[tokio::test]
async fn test_probe_does_not_keep_the_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    assert!(TcpProber.is_reachable("127.0.0.1", port, &fast_policy()).await);

    // The probe socket was dropped, so the accepted side sees EOF.
    let (mut accepted, _) = listener.accept().await.unwrap();
    let mut buf = [0u8; 1];
    let n = tokio::io::AsyncReadExt::read(&mut accepted, &mut buf)
        .await
        .unwrap_or(0);
    assert_eq!(n, 0);
}

#[tokio::test]
async fn test_probe_closed_port_is_unreachable_within_bound() {
    let port = closed_port().await;
    let policy = fast_policy();

    let start = Instant::now();
    let reachable = TcpProber.is_reachable("127.0.0.1", port, &policy).await;

    assert!(!reachable);
    assert!(
        start.elapsed() < policy.worst_case() + Duration::from_secs(1),
        "probe took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_probe_unreachable_is_repeatable() {
    let port = closed_port().await;
    let policy = fast_policy();

    for _ in 0..2 {
        let start = Instant::now();
        assert!(!TcpProber.is_reachable("127.0.0.1", port, &policy).await);
        assert!(start.elapsed() < policy.worst_case() + Duration::from_secs(1));
    }
}

#[tokio::test]
async fn test_probe_unresolvable_name_is_unreachable() {
    let reachable = TcpProber
        .is_reachable("no-such-host.invalid", 7000, &fast_policy())
        .await;
    assert!(!reachable);
}

#[tokio::test]
async fn test_probe_silent_endpoint_gives_up_after_worst_case() {
    // A listener that never accepts stops answering SYNs once its
    // backlog is full, so further connects hang instead of failing.
    let socket = TcpSocket::new_v4().unwrap();
    socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let listener = socket.listen(1).unwrap();
    let addr = listener.local_addr().unwrap();

    let mut held = Vec::new();
    let mut saturated = false;
    for _ in 0..64 {
        match tokio::time::timeout(Duration::from_millis(100), TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => held.push(stream),
            Ok(Err(e)) => panic!("connect to full listener failed: {e}"),
            Err(_) => {
                saturated = true;
                break;
            }
        }
    }
    assert!(saturated, "backlog never filled after {} connects", held.len());

    let policy = fast_policy();
    let start = Instant::now();
    let reachable = TcpProber.is_reachable("127.0.0.1", addr.port(), &policy).await;
    let elapsed = start.elapsed();

    assert!(!reachable);
    assert!(elapsed >= policy.worst_case(), "gave up after {elapsed:?}");
    assert!(
        elapsed < policy.worst_case() + Duration::from_secs(1),
        "probe took {elapsed:?}"
    );
    drop(listener);
}
