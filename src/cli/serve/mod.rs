//! Static file server with shell fallback.
//!
//! Serves files from the site root with their content types. A miss on an
//! extensionless path gets the shell document instead of a 404, so deep route
//! addresses load the shell and resolve client-side; a miss with a file
//! extension is a true 404.

mod lifecycle;
mod path;
mod response;

use anyhow::Result;
use crossbeam::channel;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Request, Server};

use crate::{
    config::{SiteConfig, cfg},
    debug, log,
};

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop.
pub fn bind_server(
    interface: Option<std::net::IpAddr>,
    port: Option<u16>,
) -> Result<BoundServer> {
    let config = cfg();
    let interface = interface.unwrap_or(config.serve.interface);
    let port = port.unwrap_or(config.serve.port);

    let (server, addr) = lifecycle::bind_with_retry(interface, port)?;
    let server = Arc::new(server);

    let (shutdown_tx, _shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer { server, addr })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking until shutdown).
    pub fn run(self) -> Result<()> {
        run_request_loop(&self.server);
        Ok(())
    }
}

fn run_request_loop(server: &Server) {
    let config = cfg();
    // Thread pool keeps a slow disk read from blocking other requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();
    debug!("serve"; "{} {}", request.method(), url);

    if let Some(path) = path::resolve_path(&url, &config.root) {
        return response::respond_file(request, &path);
    }

    // Extensionless miss: the shell document resolves the route client-side
    if !path::has_extension(&url) {
        return response::respond_shell(request, config);
    }

    response::respond_not_found(request)
}

/// Serve command entry point.
pub fn run_serve(interface: Option<std::net::IpAddr>, port: Option<u16>) -> Result<()> {
    let server = bind_server(interface, port)?;
    server.run()
}
