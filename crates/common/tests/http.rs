use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpListener},
    path::Path,
    thread::{self, JoinHandle},
    time::Duration,
};

use chakra_common::{
    Credentials, ErrorKind, FilePart, HttpTransport, PinOptions, PinRequest, Transport,
};
use tempdir::TempDir;

/// Accepts a single connection, answers it with `status` and `body`, and returns the raw
/// request text.
fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    (addr, handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut buf).unwrap();
        assert!(n > 0, "connection closed before the headers were complete");
        raw.extend_from_slice(&buf[..n]);
        if let Some(pos) = find(&raw, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&raw[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|value| value.trim().parse::<usize>().unwrap());

    loop {
        let complete = match content_length {
            Some(len) => raw.len() >= head_end + len,
            None => find(&raw[head_end..], b"\r\n0\r\n\r\n").is_some(),
        };
        if complete {
            break;
        }
        let n = stream.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
    }

    String::from_utf8_lossy(&raw).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn request(addr: SocketAddr) -> PinRequest {
    PinRequest::new(
        format!("http://{}/pinning/pinFileToIPFS", addr),
        &Credentials::new("k1", "s1").unwrap(),
    )
}

fn write(path: &Path, contents: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_sends_multipart_request_with_auth_headers() {
    let dir = TempDir::new("http").unwrap();
    let image = dir.path().join("chakra-red.png");
    write(&image, b"PNGDATA");

    let (addr, server) = serve_once("200 OK", r#"{"IpfsHash":"QmRed","PinSize":7}"#);
    let mut request = request(addr);
    request.files.push(FilePart::read(&image, "0.png").unwrap());
    request.fields = PinOptions::default()
        .with_name("chakra-red.png")
        .with_cid_version(1)
        .form_fields()
        .unwrap();

    let transport = HttpTransport::new(Duration::from_secs(10)).unwrap();
    let response = transport.send(request).await.unwrap();
    let raw = server.join().unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"IpfsHash":"QmRed","PinSize":7}"#);

    let lowered = raw.to_lowercase();
    assert!(raw.starts_with("POST /pinning/pinFileToIPFS HTTP/1.1\r\n"));
    assert!(lowered.contains("pinata_api_key: k1\r\n"));
    assert!(lowered.contains("pinata_secret_api_key: s1\r\n"));
    assert!(lowered.contains("content-type: multipart/form-data; boundary="));
    assert!(raw.contains("Content-Disposition: form-data; name=\"file\"; filename=\"0.png\""));
    assert!(raw.contains("\r\n\r\nPNGDATA\r\n"));
    assert!(raw.contains(
        "Content-Disposition: form-data; name=\"pinataMetadata\"\r\n\r\n{\"name\":\"chakra-red.png\"}\r\n"
    ));
    assert!(raw.contains(
        "Content-Disposition: form-data; name=\"pinataOptions\"\r\n\r\n{\"cidVersion\":1}\r\n"
    ));
    assert!(raw.find("name=\"file\"").unwrap() < raw.find("name=\"pinataMetadata\"").unwrap());
}

#[tokio::test]
async fn test_directory_part_names_are_not_escaped() {
    let dir = TempDir::new("http").unwrap();
    let first = dir.path().join("metadata/0.json");
    let nested = dir.path().join("metadata/extra/1.json");
    write(&first, b"{}");
    write(&nested, b"{}");

    let (addr, server) = serve_once("200 OK", r#"{"IpfsHash":"QmDir"}"#);
    let mut request = request(addr);
    request.files.push(FilePart::read(&first, "metadata/0.json").unwrap());
    request.files.push(FilePart::read(&nested, "metadata/extra/1.json").unwrap());

    let transport = HttpTransport::new(Duration::from_secs(10)).unwrap();
    transport.send(request).await.unwrap();
    let raw = server.join().unwrap();

    assert!(raw.contains("name=\"file\"; filename=\"metadata/0.json\""));
    assert!(raw.contains("name=\"file\"; filename=\"metadata/extra/1.json\""));
    assert_eq!(raw.matches("name=\"file\"").count(), 2);
}

#[tokio::test]
async fn test_error_status_is_returned_as_a_response() {
    let (addr, server) = serve_once("403 Forbidden", r#"{"error":"forbidden"}"#);

    let transport = HttpTransport::new(Duration::from_secs(10)).unwrap();
    let response = transport.send(request(addr)).await.unwrap();
    server.join().unwrap();

    assert_eq!(response.status, 403);
    assert_eq!(response.body, r#"{"error":"forbidden"}"#);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_refused_connection_is_a_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let transport = HttpTransport::new(Duration::from_secs(10)).unwrap();
    let err = transport.send(request(addr)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
}
