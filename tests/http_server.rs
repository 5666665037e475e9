//! End-to-end tests against a running listener.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use common::{ZipBuilder, archive_id};
use tokio::sync::oneshot;
use zipbrowser::{ArchiveGateway, NOT_FOUND_BODY, gateway_url, http};

struct Running {
    addr: SocketAddr,
    gateway: Arc<ArchiveGateway>,
    stop: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Running {
    fn start() -> Self {
        let listener = http::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let gateway = Arc::new(ArchiveGateway::new());
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(http::http_listener(
            listener,
            gateway.clone(),
            async move {
                let _ = stopped.await;
            },
        ));
        Self {
            addr,
            gateway,
            stop: Some(stop),
            task,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn serves_archive_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let (path, id) = archive_id(dir.path(), "site.zip");
    let script = b"function f() { return 1; }\n".repeat(100);
    ZipBuilder::new()
        .stored("INDEX.HTML", b"<html>home</html>")
        .deflated("js/app.js", &script)
        .write_to(&path);

    let server = Running::start();
    let client = reqwest::Client::new();

    let resp = client.get(gateway_url(server.addr, &id)).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"<html>home</html>");

    let resp = client
        .get(server.url(&format!("{}/__FILES/js/app.js", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body = resp.bytes().await.unwrap();
    assert_eq!(body.len(), script.len());
    assert_eq!(body.as_ref(), script.as_slice());

    assert_eq!(server.gateway.opens().await, 1);
    server.shutdown().await;
}

#[tokio::test]
async fn failures_answer_ok_with_not_found_page() {
    let dir = tempfile::tempdir().unwrap();
    let (path, id) = archive_id(dir.path(), "site.zip");
    let (_, missing) = archive_id(dir.path(), "gone.zip");
    ZipBuilder::new()
        .stored_with_size("broken.html", b"abc", 300)
        .write_to(&path);

    let server = Running::start();
    let client = reqwest::Client::new();

    for path in [
        "/no/marker/here".to_string(),
        format!("{}/__FILES/index.html", missing),
        format!("{}/__FILES/absent.html", id),
        format!("{}/__FILES/broken.html", id),
    ] {
        let resp = client.get(server.url(&path)).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "{}", path);
        assert_eq!(resp.text().await.unwrap(), NOT_FOUND_BODY, "{}", path);
    }
    server.shutdown().await;
}

#[tokio::test]
async fn rejects_non_get() {
    let server = Running::start();
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/x.zip/__FILES/index.html"))
        .body("data")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(server.gateway.opens().await, 0);
    server.shutdown().await;
}
