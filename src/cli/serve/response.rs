//! HTTP response handlers.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::config::SiteConfig;
use crate::utils::mime;

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with the shell document (extensionless route fallback).
pub fn respond_shell(request: Request, config: &SiteConfig) -> Result<()> {
    use mime::types::HTML;

    let shell = config.shell_path();
    if !shell.is_file() {
        return respond_not_found(request);
    }
    if is_head_request(&request) {
        return send_head(request, 200, HTML);
    }

    let body = fs::read(&shell).with_context(|| format!("failed to read {}", shell.display()))?;
    send_body(request, 200, HTML, body)
}

/// Respond with a plain 404 page.
pub fn respond_not_found(request: Request) -> Result<()> {
    use mime::types::HTML;

    if is_head_request(&request) {
        return send_head(request, 404, HTML);
    }

    let path = crate::utils::html::escape(request.url());
    let body = format!(
        "<html><body><h1>404 Not Found</h1><p>No file at <code>{path}</code>.</p></body></html>"
    );
    send_body(request, 404, HTML, body.into_bytes())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    use mime::types::PLAIN;
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).expect("static header")
}
