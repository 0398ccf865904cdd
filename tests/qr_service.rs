use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use qrgen::models::GENERATION_FAILED_MESSAGE;
use qrgen::{DirectoryTarget, DownloadOutcome, GenerationResult, QrConfig, QrSession, SubmitOutcome};

const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-qr";

#[derive(Clone, Copy)]
enum Mode {
    Ok,
    ServerError,
}

/// Minimal stand-in for the QR service. In `Ok` mode the create endpoint
/// redirects to a stored image, the way a CDN-backed service does.
async fn spawn_service(mode: Mode) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock service");
    let addr = listener.local_addr().expect("local addr");
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let log = log.clone();
            tokio::spawn(async move {
                let _ = handle(stream, mode, log).await;
            });
        }
    });

    (addr, seen)
}

async fn handle(mut stream: TcpStream, mode: Mode, seen: Arc<Mutex<Vec<String>>>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request = String::from_utf8_lossy(&buf);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().unwrap().push(path.clone());

    let head = match (mode, path.starts_with("/v1/create-qr-code/")) {
        (Mode::ServerError, _) => {
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
        (Mode::Ok, true) => {
            "HTTP/1.1 302 Found\r\nLocation: /images/qr.png\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
        (Mode::Ok, false) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            IMAGE_BYTES.len()
        ),
    };

    stream.write_all(head.as_bytes()).await?;
    if matches!(mode, Mode::Ok) && !path.starts_with("/v1/create-qr-code/") {
        stream.write_all(IMAGE_BYTES).await?;
    }
    stream.shutdown().await
}

fn session_for(addr: SocketAddr) -> QrSession {
    let config = QrConfig::new().with_endpoint(format!("http://{}/v1/create-qr-code/", addr));
    QrSession::new(&config).expect("build session")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ok_response_displays_resolved_url() {
    let (addr, seen) = spawn_service(Mode::Ok).await;
    let session = session_for(addr);

    session.set_text("https://example.com");
    let outcome = session.submit().await;

    let expected = format!("http://{}/images/qr.png", addr);
    assert_eq!(outcome, SubmitOutcome::Generated(expected.clone()));
    assert_eq!(session.snapshot().result.image_url(), Some(expected.as_str()));

    let paths = seen.lock().unwrap().clone();
    assert_eq!(
        paths.first().map(String::as_str),
        Some("/v1/create-qr-code/?size=150x150&data=https%3A%2F%2Fexample.com")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_error_displays_fixed_message() {
    let (addr, _) = spawn_service(Mode::ServerError).await;
    let session = session_for(addr);

    session.set_text("https://example.com");
    assert_eq!(session.submit().await, SubmitOutcome::Failed);

    let view = session.snapshot();
    assert_eq!(view.result, GenerationResult::failure());
    assert_eq!(view.result.error_message(), Some(GENERATION_FAILED_MESSAGE));
    assert_eq!(view.result.image_url(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn download_writes_image_file() {
    let (addr, _) = spawn_service(Mode::Ok).await;
    let session = session_for(addr);
    session.set_text("https://example.com");
    session.submit().await;

    let dir = std::env::temp_dir().join(format!("qrgen-download-{}", addr.port()));
    let mut target = DirectoryTarget::new(&dir);
    let outcome = session.download(&mut target).await;

    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            filename: "QRCode.png".into()
        }
    );
    let written = tokio::fs::read(dir.join("QRCode.png")).await.expect("read saved file");
    assert_eq!(written, IMAGE_BYTES);
    assert_eq!(session.blobs().live_count(), 0);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
