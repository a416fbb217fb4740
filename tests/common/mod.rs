#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// A proxy process bound to a free port, talking to `vendor_url`.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn(vendor_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_meraki-proxy"))
            .env("SERVER_HOST", "127.0.0.1")
            .env("SERVER_PORT", port.to_string())
            .env("VENDOR_BASE_URL", vendor_url)
            .env("VENDOR_TIMEOUT_SECS", "5")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /set_api_key and assert it was accepted.
    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        let res = reqwest::Client::new()
            .post(self.url("/set_api_key"))
            .json(&json!({ "api_key": key }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "set_api_key failed: {}", res.status());
        Ok(())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Start a fresh proxy pointed at `vendor_url`.
pub async fn start_server(vendor_url: &str) -> Result<TestServer> {
    let server = TestServer::spawn(vendor_url)?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Start a proxy whose vendor endpoint is never reached.
pub async fn start_offline_server() -> Result<TestServer> {
    start_server("http://127.0.0.1:9").await
}

pub async fn get_json(url: &str) -> Result<(StatusCode, Value)> {
    let res = reqwest::Client::new().get(url).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

pub async fn post_json(url: &str, body: &Value) -> Result<(StatusCode, Value)> {
    let res = reqwest::Client::new().post(url).json(body).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}
