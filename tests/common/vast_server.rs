//! Minimal HTTP/1.1 server for fetch integration tests.
//!
//! Answers every request with a fixed status and body, or never answers at
//! all. Raw request heads are forwarded to the test through a channel.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Respond with this status line and body.
    Status(&'static str, &'static str),
    /// Read the request and keep the connection open without responding.
    Silent,
}

/// Starts a server in a background thread. Returns the document URL
/// (e.g. "http://127.0.0.1:12345/vast.xml") and the captured request heads.
pub fn start(reply: Reply) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let tx = tx.clone();
            thread::spawn(move || handle(stream, reply, tx));
        }
    });
    (format!("http://127.0.0.1:{}/vast.xml", port), rx)
}

fn handle(mut stream: TcpStream, reply: Reply, requests: Sender<String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let _ = requests.send(String::from_utf8_lossy(&buf[..n]).into_owned());

    match reply {
        Reply::Status(status, body) => {
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
        Reply::Silent => thread::sleep(Duration::from_secs(2)),
    }
}

/// Value of a header in a raw request head, matched case-insensitively.
pub fn header<'a>(request: &'a str, name: &str) -> Option<&'a str> {
    request
        .lines()
        .skip(1)
        .take_while(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
}
