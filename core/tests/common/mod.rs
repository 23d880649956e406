//! Shared fixtures for the scenario tests.
//!
//! Every session gets its own mock server on a random port, so scenarios can
//! run in parallel without seeing each other's employees.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::thread;

use reqres_core::{Config, Employee, Resource, Session};
use rstest::fixture;

/// Start the mock server on a random port and return its address.
pub fn spawn_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// A session against a fresh mock server, logging to `logs/` in the working
/// directory.
#[fixture]
pub fn session() -> Session {
    let addr = spawn_mock_server();
    Session::start(&Config::new(format!("http://{addr}"))).unwrap()
}

/// Canonical employee used by the create and update scenarios.
#[fixture]
pub fn employee_template() -> Employee {
    Employee::new("morpheus", "leader")
}

/// Log the `Starting ...` marker for the current scenario.
///
/// Uses `step` when given, otherwise the test's own name (libtest names each
/// test thread after its test).
pub fn start_step(session: &Session, step: Option<&str>) {
    let name = step
        .map(str::to_string)
        .or_else(|| thread::current().name().map(str::to_string))
        .unwrap_or_else(|| "unnamed test".to_string());
    session.step(&name);
}

/// The recorded resource with `id` from `test-data/expected_resource.json`.
pub fn expected_resource(id: u64) -> Resource {
    let raw = include_str!("../../../test-data/expected_resource.json");
    let records: Vec<Resource> = serde_json::from_str(raw).unwrap();
    records
        .into_iter()
        .find(|record| record.id == id)
        .unwrap_or_else(|| panic!("no expected record for resource {id}"))
}
