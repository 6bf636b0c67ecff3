#![allow(dead_code)]

//! Test dependencies shared by the HTTP suites.
//!
//! Each [`TestDependencies`] bundles an HTTP client and the repository the
//! server behind it reads from, so a scenario can seed fixtures and then
//! exercise the HTTP surface without knowing which strategy it runs under:
//!
//! - `unit`: in-memory stub repository, router driven in-process
//! - `integration`: in-memory SQLite with migrations, router served on a real localhost socket
//! - `smoke`: a live deployment at `TARGET_URL`, fixtures written via `DATABASE_URL`

use axum::http::header::LOCATION;
use axum_test::TestServer;
use futures::FutureExt;
use multitest_shortener::config::Config;
use multitest_shortener::domain::repositories::UrlMappingRepository;
use multitest_shortener::infrastructure::database::connect_repository;
use multitest_shortener::infrastructure::persistence::{
    InMemoryUrlMappingRepository, SqliteUrlMappingRepository,
};
use multitest_shortener::routes::app_router;
use multitest_shortener::state::AppState;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Unit,
    Integration,
    Smoke,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::Smoke => "smoke",
        };
        f.write_str(name)
    }
}

/// What a scenario needs to talk to the service and seed its storage.
pub struct TestDependencies {
    pub strategy: Strategy,
    pub client: HttpClient,
    pub repository: Arc<dyn UrlMappingRepository>,
}

/// Transport used to reach the service under test.
pub enum HttpClient {
    /// axum-test server driven in-process
    Server(TestServer),
    /// A server reached over the network; redirects are never followed
    Live {
        base_url: String,
        client: reqwest::Client,
        _server: Option<ServerGuard>,
    },
}

/// Aborts a locally spawned server when the dependencies are dropped.
pub struct ServerGuard(JoinHandle<()>);

impl Drop for ServerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// The parts of a response the scenarios assert on.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

impl HttpClient {
    pub async fn get(&self, path: &str) -> Reply {
        match self {
            Self::Server(server) => {
                let response = server.get(path).await;

                Reply {
                    status: response.status_code().as_u16(),
                    location: response
                        .headers()
                        .get(LOCATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: response.text(),
                }
            }
            Self::Live {
                base_url, client, ..
            } => {
                let response = client
                    .get(format!("{base_url}{path}"))
                    .send()
                    .await
                    .unwrap_or_else(|e| panic!("GET {base_url}{path} failed: {e}"));

                let status = response.status().as_u16();
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let body = response.text().await.expect("failed to read response body");

                Reply {
                    status,
                    location,
                    body,
                }
            }
        }
    }
}

/// Dependencies for every strategy this run should cover.
///
/// With `TARGET_URL` set only the smoke strategy runs; otherwise unit and
/// integration both run.
pub async fn strategies() -> Vec<TestDependencies> {
    match std::env::var("TARGET_URL") {
        Ok(target) if !target.is_empty() => vec![smoke_dependencies(&target).await],
        _ => vec![unit_dependencies(), integration_dependencies().await],
    }
}

pub fn unit_dependencies() -> TestDependencies {
    let repository: Arc<dyn UrlMappingRepository> = Arc::new(InMemoryUrlMappingRepository::new());
    let server = TestServer::new(app_router(AppState::new(repository.clone())))
        .expect("failed to start in-process server");

    TestDependencies {
        strategy: Strategy::Unit,
        client: HttpClient::Server(server),
        repository,
    }
}

pub async fn integration_dependencies() -> TestDependencies {
    let repository: Arc<dyn UrlMappingRepository> = Arc::new(
        SqliteUrlMappingRepository::in_memory()
            .await
            .expect("error creating in memory store"),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not listen for HTTP requests");
    let addr = listener.local_addr().expect("listener has no address");
    let app = app_router(AppState::new(repository.clone()));
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("testing HTTP server stopped: {e}");
        }
    });

    TestDependencies {
        strategy: Strategy::Integration,
        client: HttpClient::Live {
            base_url: format!("http://{addr}"),
            client: no_redirect_client(),
            _server: Some(ServerGuard(server)),
        },
        repository,
    }
}

pub async fn smoke_dependencies(target: &str) -> TestDependencies {
    let config = Config::from_env().expect("invalid smoke configuration");
    let repository = connect_repository(&config)
        .await
        .expect("could not reach the smoke database");

    TestDependencies {
        strategy: Strategy::Smoke,
        client: HttpClient::Live {
            base_url: target.trim_end_matches('/').to_string(),
            client: no_redirect_client(),
            _server: None,
        },
        repository,
    }
}

fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build HTTP client")
}

/// Runs `test`, then `teardown`, even if `test` panicked.
///
/// The panic is re-raised once the teardown has finished.
pub async fn with_teardown<T, D>(test: T, teardown: D)
where
    T: Future<Output = ()>,
    D: Future<Output = ()>,
{
    let outcome = AssertUnwindSafe(test).catch_unwind().await;

    teardown.await;

    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
}
