//! Shared fixtures: throwaway git repositories and a fake OpenAI + GitHub API.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Runs git with a fixed identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("git must be installed");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(dir.join(name), content).unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "-m", message]);
}

/// An "origin" repository with one commit on `main`, and a clone of it
/// checked out on a `feature` branch.
pub struct RepoFixture {
    _tmp: TempDir,
    pub origin: PathBuf,
    pub work: PathBuf,
}

impl RepoFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let origin = tmp.path().join("origin");
        let work = tmp.path().join("work");
        std::fs::create_dir(&origin).unwrap();

        git(&origin, &["init"]);
        git(&origin, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        commit_file(&origin, "README.md", "# widgets\n", "initial");

        git(
            tmp.path(),
            &["clone", origin.to_str().unwrap(), work.to_str().unwrap()],
        );
        git(&work, &["checkout", "-b", "feature"]);

        Self {
            _tmp: tmp,
            origin,
            work,
        }
    }
}

/// One request captured by the fake API.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    completion_status: StatusCode,
    completion_text: String,
    comment_status: StatusCode,
    completions: Arc<Mutex<Vec<Captured>>>,
    comments: Arc<Mutex<Vec<Captured>>>,
}

/// Fake OpenAI + GitHub endpoints on one ephemeral port.
pub struct FakeApi {
    pub base_url: String,
    completions: Arc<Mutex<Vec<Captured>>>,
    comments: Arc<Mutex<Vec<Captured>>>,
}

impl FakeApi {
    pub async fn start(
        completion_status: StatusCode,
        completion_text: &str,
        comment_status: StatusCode,
    ) -> Self {
        let completions = Arc::new(Mutex::new(Vec::new()));
        let comments = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            completion_status,
            completion_text: completion_text.to_string(),
            comment_status,
            completions: completions.clone(),
            comments: comments.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .route(
                "/repos/{owner}/{repo}/issues/{number}/comments",
                post(issue_comments),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            completions,
            comments,
        }
    }

    pub fn completions(&self) -> Vec<Captured> {
        self.completions.lock().unwrap().clone()
    }

    pub fn comments(&self) -> Vec<Captured> {
        self.comments.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn chat_completions(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.completions.lock().unwrap().push(Captured {
        path: "/v1/chat/completions".into(),
        authorization: header(&headers, "authorization"),
        accept: header(&headers, "accept"),
        body,
    });

    if !state.completion_status.is_success() {
        return (
            state.completion_status,
            Json(json!({ "error": { "message": "upstream exploded" } })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": state.completion_text } }
            ]
        })),
    )
}

async fn issue_comments(
    State(state): State<FakeState>,
    UrlPath((owner, repo, number)): UrlPath<(String, String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.comments.lock().unwrap().push(Captured {
        path: format!("/repos/{owner}/{repo}/issues/{number}/comments"),
        authorization: header(&headers, "authorization"),
        accept: header(&headers, "accept"),
        body,
    });

    if !state.comment_status.is_success() {
        return (
            state.comment_status,
            Json(json!({ "message": "Validation Failed" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 1001,
            "html_url": format!("https://github.com/{owner}/{repo}/pull/{number}#issuecomment-1001")
        })),
    )
}
