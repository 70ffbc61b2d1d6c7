use std::sync::Arc;
use std::time::Duration;

use dockwire::{Credentials, Dockwire, TlsVersion};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[test]
fn defaults_target_local_socket() {
    let provider = Dockwire::builder().build().unwrap();
    let config = provider.config();

    assert_eq!(config.endpoint.to_string(), "unix:///var/run/docker.sock");
    assert_eq!(config.connect_timeout, Duration::from_secs(60));
    assert_eq!(config.read_timeout, Duration::from_secs(60));
    assert_eq!(config.tls.min_tls_version, TlsVersion::Tls12);
    assert!(provider.context_builder().is_none());
}

#[test]
fn transport_settings_reach_the_policy() {
    let client = dockwire::builder()
        .endpoint("http://127.0.0.1:2375")
        .connect_timeout(Duration::from_secs(5))
        .read_timeout(Duration::from_secs(30))
        .min_tls_version(TlsVersion::Tls13)
        .connect()
        .unwrap();

    let policy = client.policy();
    assert_eq!(policy.connect_timeout, Duration::from_secs(5));
    assert_eq!(policy.read_timeout, Duration::from_secs(30));
    assert!(!policy.follow_redirects);
}

#[test]
fn tls_endpoint_without_identity_is_rejected() {
    let err = Dockwire::builder()
        .endpoint("tcp://daemon.internal:2376")
        .trust_all_certs(true)
        .build()
        .unwrap_err();
    assert!(err.is_builder());
}

#[test]
fn bad_endpoint_is_rejected() {
    let err = Dockwire::builder().endpoint("ftp://daemon").build().unwrap_err();
    assert!(err.is_builder());
}

#[test]
fn zero_timeout_is_rejected() {
    let err = Dockwire::builder()
        .read_timeout(Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(err.is_builder());
}

#[test]
fn missing_ca_certificate_is_a_tls_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dockwire::builder()
        .endpoint("tcp://daemon.internal:2376")
        .cert_path(dir.path())
        .ca_cert(dir.path().join("ca.pem"))
        .build()
        .unwrap_err();
    assert!(err.is_tls());
}

#[test]
fn identity_files_are_loaded_per_client() {
    let dir = tempfile::tempdir().unwrap();
    let key_pair = rcgen::KeyPair::generate().unwrap();
    let mut params = rcgen::CertificateParams::new(vec!["dockwire-client".to_string()]).unwrap();
    params
        .distinguished_name
        .push(rcgen::DnType::CommonName, "dockwire-client");
    let cert = params.self_signed(&key_pair).unwrap();

    let cert_path = dir.path().join("client.pem");
    let key_path = dir.path().join("client-key.pem");
    std::fs::write(&cert_path, cert.pem()).unwrap();
    std::fs::write(&key_path, key_pair.serialize_pem()).unwrap();

    let provider = Dockwire::builder()
        .endpoint("tcp://daemon.internal:2376")
        .identity(cert_path.to_string_lossy(), key_path.to_string_lossy())
        .trust_all_certs(true)
        .relax_hostname(true)
        .build()
        .unwrap();

    let client = provider.get().unwrap();
    let context = client.transport_context().unwrap();
    assert!(context.key_store().certificate().subject.contains("dockwire-client"));

    std::fs::remove_file(&key_path).unwrap();
    let err = provider.get().unwrap_err();
    assert!(err.is_tls());
}

#[test]
fn closure_suppliers_are_accepted() {
    let provider = Dockwire::builder()
        .endpoint("https://daemon.internal")
        .credentials(Arc::new(|| None::<Credentials>))
        .trust_all_certs(true)
        .build()
        .unwrap();

    let err = provider.get().unwrap_err();
    assert!(err.is_tls());
}

#[tokio::test]
async fn fetches_json_over_cleartext() {
    #[derive(serde::Deserialize)]
    struct Info {
        #[serde(rename = "Containers")]
        containers: u32,
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut read = 0;
        while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf[read..]).await.unwrap();
            if n == 0 {
                break;
            }
            read += n;
        }
        let body = "{\"Containers\":3}";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });

    let client = Dockwire::builder()
        .endpoint(format!("http://127.0.0.1:{port}"))
        .user_agent("dockwire-tests/1.0")
        .debug()
        .connect()
        .unwrap();

    let info: Info = client.get_json("/info").await.unwrap();
    assert_eq!(info.containers, 3);
}
