//! browserstore RPC server: JSON-RPC over stdin/stdout for the browser shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tabs.list", "params":{"client_guid":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr (`RUST_LOG` controls the level) so stdout carries only
//! protocol lines.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use browserstore::app::App;
use browserstore::platform;
use browserstore::rpc_handler::handle_method;

use serde_json::{json, Value};

/// Fixed-window limiter on requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn db_path() -> PathBuf {
    let dir = match std::env::var("BROWSERSTORE_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => platform::get_data_dir(),
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Could not create data dir {}: {}", dir.display(), e);
    }
    dir.join("browserstore.db")
}

fn emit(stdout: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(stdout, "{}", value)?;
    stdout.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let db_path = db_path();
    let prefs_path = std::env::var("BROWSERSTORE_PREFS").ok();
    let app = Mutex::new(App::new(&db_path.to_string_lossy(), prefs_path)?);
    log::info!("Serving store at {}", db_path.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;

    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            log::warn!("Rate limit exceeded, rejecting request {}", id);
            emit(&mut out, &json!({"id": id, "error": "rate limit exceeded"}))?;
            continue;
        }

        let method = req.get("method").and_then(Value::as_str).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                log::debug!("{} failed: {}", method, err);
                json!({"id": id, "error": err})
            }
        };
        emit(&mut out, &response)?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}
