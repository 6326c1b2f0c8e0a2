use std::convert::Infallible;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{mpsc, Arc};

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Request, Response, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use notify::{EventKind, RecursiveMode, Watcher};
use tokio::net::TcpListener;
use tokio::runtime::Builder;

use crate::report::{Context, Error, Report};
use crate::{build, log, Build, Serve};

pub fn serve(s: &Serve) -> Report<()> {
    build::build(&s.build)?;

    let version = Arc::new(AtomicU32::new(0));

    if s.watch {
        spawn_watcher(s.build.clone(), version.clone());
    }

    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?
        .block_on(start(s, version))
}

async fn start(s: &Serve, version: Arc<AtomicU32>) -> Report<()> {
    let ip = Ipv4Addr::LOCALHOST;
    let port = s.port;

    let listener = TcpListener::bind((ip, port))
        .await
        .with_context(|| format!("failed to bind tcp listener to {ip}:{port}"))?;

    log::status!("Starting", "development server at http://{ip}:{port}");

    loop {
        let (tcp, _) = listener
            .accept()
            .await
            .context("failed to accept tcp connection")?;

        let dist = s.build.dist.clone();
        let version = version.clone();

        tokio::spawn(async move {
            let io = TokioIo::new(tcp);
            let service = service_fn(move |req| handle(req, dist.clone(), version.clone()));

            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(io, service)
                .await
            {
                log::error!("serving connection: {err}");
            }
        });
    }
}

async fn handle(
    req: Request<Incoming>,
    dist: PathBuf,
    version: Arc<AtomicU32>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();

    if path == "/__wisp/version" {
        let version = version.load(Ordering::Relaxed).to_string();
        return Ok(text_response(StatusCode::OK, version));
    }

    let rel = path.trim_start_matches('/');
    if rel.split('/').any(|part| part == "..") {
        return Ok(text_response(StatusCode::NOT_FOUND, "not found".into()));
    }

    let file = if rel.is_empty() { "index.html" } else { rel };
    let target = dist.join(file);

    match fs::read(&target) {
        Ok(data) => {
            log::info!("GET {path}");

            Ok(Response::builder()
                .header(header::CONTENT_TYPE, content_type(&target))
                .body(Full::new(Bytes::from(data)))
                .expect("response is valid"))
        }
        Err(_) => Ok(text_response(StatusCode::NOT_FOUND, "not found".into())),
    }
}

fn text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .expect("response is valid")
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

fn spawn_watcher(build: Build, version: Arc<AtomicU32>) {
    std::thread::spawn(move || {
        if let Err(err) = watch(&build, &version) {
            log::error!("{err}");
        }
    });
}

fn watch(build: &Build, version: &AtomicU32) -> Report<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();

    let mut watcher = notify::recommended_watcher(tx)
        .map_err(|err| Error::message(format!("failed to create file watcher: {err}")))?;

    watcher
        .watch(Path::new("src"), RecursiveMode::Recursive)
        .map_err(|err| Error::message(format!("failed to watch src: {err}")))?;

    // Page assets are optional, watch them only if they exist.
    let _ = watcher.watch(Path::new("index.html"), RecursiveMode::NonRecursive);
    if let Ok(entries) = fs::read_dir(".") {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "css") {
                let _ = watcher.watch(&path, RecursiveMode::NonRecursive);
            }
        }
    }

    for res in &rx {
        let Ok(event) = res else {
            continue;
        };

        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            continue;
        }

        // Editors fire bursts of events per save, coalesce them.
        while rx.try_recv().is_ok() {}

        log::status!("Rebuilding", "source change detected");
        match build::build(build) {
            Ok(()) => {
                version.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => log::error!("{err}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(
            content_type(Path::new("dist/index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type(Path::new("dist/counter.js")), "text/javascript");
        assert_eq!(
            content_type(Path::new("dist/counter_bg.wasm")),
            "application/wasm"
        );
        assert_eq!(content_type(Path::new("dist/style.css")), "text/css");
        assert_eq!(
            content_type(Path::new("dist/counter_bg")),
            "application/octet-stream"
        );
    }
}
