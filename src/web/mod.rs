//! Embedded web dashboard.
//!
//! `phishguard web` runs a small synchronous HTTP server (`tiny_http`) on a
//! loopback address and serves the single-file dashboard plus a JSON API
//! backed by the demo simulator, the static model report, and the scan log.
//! Requests are answered one at a time; a handler error becomes a 500 JSON
//! body and the loop keeps serving.

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Response type shared by every handler.
pub(crate) type Reply = Response<Cursor<Vec<u8>>>;

/// Run the dashboard server until the process is killed.
///
/// Sequential handling is plenty for a single local user, and it keeps the
/// scan log free of interleaved writes.
pub fn serve(addr: &str) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to bind dashboard to {addr}: {e}"))?;

    println!("phishguard dashboard on http://{addr} (Ctrl+C stops it)");
    let _ = open_browser(&format!("http://{addr}"));

    for request in server.incoming_requests() {
        handle(request);
    }

    Ok(())
}

/// Answer one request and print a brief access line.
fn handle(mut request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    // Only the scan endpoint takes a body.
    let mut body = String::new();
    if method == Method::Post {
        let _ = request.as_reader().read_to_string(&mut body);
    }

    let reply = match route(&method, &url, &body) {
        Ok(reply) => reply,
        Err(err) => {
            let body = serde_json::json!({ "error": err.to_string() }).to_string();
            json_reply(500, body)
        }
    };

    println!(
        "{} {} {}",
        chrono::Local::now().format("%H:%M:%S"),
        method,
        url
    );

    let _ = request.respond(reply);
}

/// Map method + path to a handler. The query string stays on `url` for
/// handlers that read parameters.
fn route(method: &Method, url: &str, body: &str) -> Result<Reply> {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => {
            Ok(html_reply(frontend::INDEX_HTML))
        }
        (&Method::Post, "/api/scan") => api::post_scan(body),
        (&Method::Get, "/api/model") => api::get_model(),
        (&Method::Get, "/api/importance") => api::get_importance(),
        (&Method::Get, "/api/history") => api::get_history(url),
        (&Method::Get, "/api/health") => api::get_health(),
        _ => Ok(json_reply(404, r#"{"error": "not found"}"#.to_string())),
    }
}

/// JSON reply with the given status code.
pub(crate) fn json_reply(status: u16, body: String) -> Reply {
    Response::from_data(body.into_bytes())
        .with_header(header("Content-Type", "application/json; charset=utf-8"))
        .with_status_code(StatusCode(status))
}

fn html_reply(html: &str) -> Reply {
    Response::from_data(html.as_bytes().to_vec())
        .with_header(header("Content-Type", "text/html; charset=utf-8"))
        .with_status_code(StatusCode(200))
}

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static header")
}

/// Best-effort launch of the system browser.
fn open_browser(url: &str) -> Result<()> {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", url])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else {
        ("xdg-open", vec![url])
    };

    std::process::Command::new(program)
        .args(&args)
        .spawn()
        .context("failed to open browser")?;

    Ok(())
}
