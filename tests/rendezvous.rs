//! Integration tests for the TCP readiness gate, over real loopback sockets.

use std::net::TcpStream;
use std::time::{Duration, Instant};
use uart_fixture::rendezvous::{GateError, ReadinessGate, TcpRendezvous};

#[test]
fn unblocks_when_the_orchestrator_connects() {
    let mut gate = TcpRendezvous::bind("127.0.0.1:0", Duration::from_secs(5)).unwrap();
    let addr = gate.local_addr().unwrap();

    let orchestrator = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        TcpStream::connect(addr).unwrap();
    });

    let start = Instant::now();
    gate.await_ready().unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));

    orchestrator.join().unwrap();
}

#[test]
fn connection_before_await_is_still_consumed() {
    // The socket listens from bind time, so an early orchestrator is fine.
    let mut gate = TcpRendezvous::bind("127.0.0.1:0", Duration::from_secs(5)).unwrap();
    let addr = gate.local_addr().unwrap();

    let _conn = TcpStream::connect(addr).unwrap();
    gate.await_ready().unwrap();
}

#[test]
fn times_out_when_nobody_connects() {
    let mut gate = TcpRendezvous::bind("127.0.0.1:0", Duration::from_millis(150)).unwrap();

    let start = Instant::now();
    let err = gate.await_ready().unwrap_err();

    assert!(matches!(err, GateError::Timeout(_)));
    assert!(start.elapsed() >= Duration::from_millis(150));
}

#[test]
fn gate_is_one_shot() {
    let mut gate = TcpRendezvous::bind("127.0.0.1:0", Duration::from_secs(5)).unwrap();
    let addr = gate.local_addr().unwrap();

    let _conn = TcpStream::connect(addr).unwrap();
    gate.await_ready().unwrap();

    // The listening resource is released with the signal.
    assert!(matches!(gate.await_ready(), Err(GateError::Consumed)));
    assert!(matches!(gate.local_addr(), Err(GateError::Consumed)));
}

#[test]
fn listener_port_is_released_after_consumption() {
    let mut gate = TcpRendezvous::bind("127.0.0.1:0", Duration::from_secs(5)).unwrap();
    let addr = gate.local_addr().unwrap();

    let _conn = TcpStream::connect(addr).unwrap();
    gate.await_ready().unwrap();

    // The same port can be bound again once the gate has fired.
    let rebound = TcpRendezvous::bind(addr, Duration::from_millis(100));
    assert!(rebound.is_ok());
}
