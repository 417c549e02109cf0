//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body at any path. Responds to HEAD with
//! Content-Length and to GET with the body, counting GETs and bytes sent so
//! tests can tell whether a fetch downloaded anything.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct FileServerOptions {
    /// Status for HEAD. Anything but 200 is sent with an empty body.
    pub head_status: u16,
    /// Override the Content-Length announced on HEAD (simulates lying metadata).
    pub head_length: Option<u64>,
    /// If false, HEAD omits Content-Length.
    pub head_sends_length: bool,
    /// Status for GET. Anything but 200 is sent with an empty body.
    pub get_status: u16,
    /// If false, GET omits Content-Length and ends the body by closing.
    pub get_sends_length: bool,
    /// Announce the full length on GET but close after this many bytes.
    pub get_truncate_to: Option<usize>,
}

impl Default for FileServerOptions {
    fn default() -> Self {
        Self {
            head_status: 200,
            head_length: None,
            head_sends_length: true,
            get_status: 200,
            get_sends_length: true,
            get_truncate_to: None,
        }
    }
}

/// Handle to a running server.
#[derive(Clone)]
pub struct FileServer {
    base: String,
    gets: Arc<AtomicUsize>,
    bytes_sent: Arc<AtomicU64>,
}

impl FileServer {
    /// URL for `name` on this server, e.g. `http://127.0.0.1:1234/data/notMNIST.h5`.
    pub fn url(&self, name: &str) -> String {
        format!("{}data/{}", self.base, name)
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body`. The server runs
/// until the process exits.
pub fn start(body: Vec<u8>) -> FileServer {
    start_with_options(body, FileServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: FileServerOptions) -> FileServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let server = FileServer {
        base: format!("http://127.0.0.1:{}/", port),
        gets: Arc::new(AtomicUsize::new(0)),
        bytes_sent: Arc::new(AtomicU64::new(0)),
    };
    let shared = server.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let shared = shared.clone();
            thread::spawn(move || handle(stream, &body, opts, &shared));
        }
    });
    server
}

/// A URL on a port nothing listens on.
pub fn unreachable_url(name: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/data/{}", port, name)
}

fn status_line(code: u16) -> String {
    let reason = match code {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    format!("HTTP/1.1 {} {}\r\n", code, reason)
}

fn empty_response(code: u16) -> String {
    format!("{}Content-Length: 0\r\nConnection: close\r\n\r\n", status_line(code))
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: FileServerOptions, server: &FileServer) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");
    let total = body.len() as u64;

    if method.eq_ignore_ascii_case("HEAD") {
        if opts.head_status != 200 {
            let _ = stream.write_all(empty_response(opts.head_status).as_bytes());
            return;
        }
        let length = if opts.head_sends_length {
            format!("Content-Length: {}\r\n", opts.head_length.unwrap_or(total))
        } else {
            String::new()
        };
        let response = format!("{}{}Connection: close\r\n\r\n", status_line(200), length);
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        server.gets.fetch_add(1, Ordering::SeqCst);
        if opts.get_status != 200 {
            let _ = stream.write_all(empty_response(opts.get_status).as_bytes());
            return;
        }
        let length = if opts.get_sends_length {
            format!("Content-Length: {}\r\n", total)
        } else {
            String::new()
        };
        let response = format!("{}{}Connection: close\r\n\r\n", status_line(200), length);
        let _ = stream.write_all(response.as_bytes());
        let sent = match opts.get_truncate_to {
            Some(n) => &body[..n.min(body.len())],
            None => body,
        };
        if stream.write_all(sent).is_ok() {
            server.bytes_sent.fetch_add(sent.len() as u64, Ordering::SeqCst);
        }
        return;
    }
    let _ = stream.write_all(empty_response(405).as_bytes());
}
