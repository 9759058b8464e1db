//! Live exchange specs: the binary against a TLS fixture server that
//! speaks the framed wire protocol.

use std::io::Write as _;
use std::net::SocketAddr;
use std::sync::{Arc, Once};
use std::time::Duration;

use rcgen::{CertificateParams, DnType, KeyPair};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::ServerConfig;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use rqe_wire::{
    read_request, write_response, NodeInfo, NodeStatus, Operator, OutcomeStatus, Request,
    Response, Rq, RqItem, RqItemValue, TypeOptions,
};

use crate::prelude::*;

const IO_LIMIT: Duration = Duration::from_secs(5);

static CRYPTO_INIT: Once = Once::new();

fn init_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// A TLS server answering one request per connection, canned per
/// request kind. Lives until the owning test drops it.
struct FixtureServer {
    addr: SocketAddr,
    ca_file: tempfile::NamedTempFile,
    _runtime: tokio::runtime::Runtime,
}

fn fixture_server() -> FixtureServer {
    init_crypto();

    let mut ca_params = CertificateParams::default();
    ca_params.distinguished_name.push(DnType::CommonName, "rqe spec CA");
    ca_params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
    let ca_key = KeyPair::generate().expect("generate CA key");
    let ca_cert = ca_params.self_signed(&ca_key).expect("self-sign CA");

    let mut params = CertificateParams::default();
    params.distinguished_name.push(DnType::CommonName, "localhost");
    params.subject_alt_names =
        vec![rcgen::SanType::DnsName("localhost".try_into().expect("valid DNS name"))];
    let server_key = KeyPair::generate().expect("generate server key");
    let server_cert = params.signed_by(&server_key, &ca_cert, &ca_key).expect("sign server cert");

    let mut ca_file = tempfile::NamedTempFile::new().expect("temp CA file");
    ca_file.write_all(ca_cert.pem().as_bytes()).expect("write CA pem");
    ca_file.flush().expect("flush CA pem");

    let key = PrivateKeyDer::from(PrivatePkcs8KeyDer::from(server_key.serialize_der()));
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(vec![server_cert.der().clone()], key)
        .expect("server TLS config");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("fixture runtime");

    let listener = runtime
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture addr");

    runtime.spawn(async move {
        loop {
            let Ok((tcp, _)) = listener.accept().await else {
                break;
            };
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                let Ok(mut stream) = acceptor.accept(tcp).await else {
                    return;
                };
                let Ok(request) = read_request(&mut stream, IO_LIMIT).await else {
                    return;
                };
                let response = respond(request);
                let _ = write_response(&mut stream, &response, IO_LIMIT).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    FixtureServer { addr, ca_file, _runtime: runtime }
}

fn respond(request: Request) -> Response {
    match request {
        Request::Status => Response::Status {
            status: OutcomeStatus::Ok,
            nodes: vec![
                NodeInfo { name: "rqe-1".to_string(), status: NodeStatus::Up, rq_count: 12 },
                NodeInfo { name: "rqe-2".to_string(), status: NodeStatus::Down, rq_count: 2 },
            ],
        },
        Request::AddRq { .. } => Response::RqAdded {
            status: OutcomeStatus::Ok,
            uuid: uuid::Uuid::new_v4().to_string(),
        },
        Request::DeleteRq { .. } => Response::RqDeleted { status: OutcomeStatus::Ok },
        Request::MatchEntry { entry, .. } => {
            let rqs = if entry.contains_key("age") {
                vec![Rq {
                    uuid: Some("abc".to_string()),
                    items: vec![RqItem::new(
                        "age",
                        RqItemValue::Integer(10),
                        TypeOptions::new(Operator::Gt),
                    )],
                }]
            } else {
                vec![]
            };
            Response::Matches { status: OutcomeStatus::Ok, rqs }
        }
    }
}

fn rqe_against(server: &FixtureServer) -> assert_cmd::Command {
    let mut cmd = rqe();
    cmd.args([
        "--host",
        "localhost",
        "--port",
        &server.addr.port().to_string(),
        "--ca-cert",
    ]);
    cmd.arg(server.ca_file.path());
    cmd
}

#[test]
fn cluster_status_renders_node_table() {
    let server = fixture_server();

    rqe_against(&server)
        .args(["cluster", "status"])
        .assert()
        .success()
        .stdout_has("Node Name")
        .stdout_has("rqe-1")
        .stdout_has("DOWN")
        .stdout_has("Total")
        .stdout_has("14");
}

#[test]
fn rq_add_prints_assigned_uuid() {
    let server = fixture_server();

    rqe_against(&server)
        .args(["rq", "add", "age:GT=10"])
        .assert()
        .success()
        .stdout_has("uuid ");
}

#[test]
fn rq_delete_prints_status_ok() {
    let server = fixture_server();

    rqe_against(&server)
        .args(["rq", "delete", "9a9e92fa-f14e-4a43-bd26-e0c4e9522b1a"])
        .assert()
        .success()
        .stdout_has("uuid to remove: 9a9e92fa-f14e-4a43-bd26-e0c4e9522b1a")
        .stdout_has("Status OK");
}

#[test]
fn entry_match_renders_matched_rq_tree() {
    let server = fixture_server();

    rqe_against(&server)
        .args(["entry", "match", "age=25"])
        .assert()
        .success()
        .stdout_has("- abc")
        .stdout_has("- age")
        .stdout_has("- GT");
}

#[test]
fn entry_match_without_hits_prints_nothing() {
    let server = fixture_server();

    let assert = rqe_against(&server).args(["entry", "match", "color=red"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout, "");
}

#[test]
fn json_format_emits_machine_readable_status() {
    let server = fixture_server();

    let assert =
        rqe_against(&server).args(["--format", "json", "cluster", "status"]).assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let nodes: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(nodes[0]["name"], "rqe-1");
    assert_eq!(nodes[0]["status"], "UP");
    assert_eq!(nodes[0]["rq_count"], 12);
    assert_eq!(nodes[1]["status"], "DOWN");
}
