#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use tempfile::TempDir;

use skillmatch::mock::{spawn_mock, MockServer, MockState};
use skillmatch::session::{FileBackend, SessionStore, SESSION_KEY};
use skillmatch::{ApiClient, Platform, ReloadBus};

/// A mock backend on a free port plus a platform pointed at it, with the
/// session kept in a throwaway directory
pub struct TestBackend {
    pub server: MockServer,
    pub platform: Platform,
    pub session_dir: TempDir,
}

impl TestBackend {
    pub fn state(&self) -> &MockState {
        self.server.state()
    }

    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    pub fn session_file(&self) -> std::path::PathBuf {
        self.session_dir.path().join(format!("{}.json", SESSION_KEY))
    }

    /// A second platform sharing the same session file
    pub fn reopen(&self) -> Platform {
        platform_for(&self.base_url(), &self.session_dir)
    }
}

fn platform_for(base_url: &str, dir: &TempDir) -> Platform {
    let session = Arc::new(SessionStore::new(FileBackend::new(dir.path(), SESSION_KEY)));
    let client = ApiClient::new(base_url, session);
    Platform::new(client, Arc::new(ReloadBus::new()))
}

pub async fn start_backend() -> Result<TestBackend> {
    start_with(MockState::new()).await
}

pub async fn start_with(state: MockState) -> Result<TestBackend> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let server = spawn_mock(state, addr)
        .await
        .context("failed to start mock backend")?;

    let session_dir = tempfile::tempdir().context("failed to create session dir")?;
    let platform = platform_for(&server.base_url(), &session_dir);

    Ok(TestBackend {
        server,
        platform,
        session_dir,
    })
}
