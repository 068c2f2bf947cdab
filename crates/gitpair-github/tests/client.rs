use std::sync::{Arc, Mutex};

use gitpair_core::{CommitSource, GitHubConfig, GitpairError, RepoRef};
use gitpair_github::GitHubClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve canned responses on a loopback port, recording each request head.
///
/// `routes` maps a path prefix to `(status line, body)`; the first match wins.
async fn serve(routes: Vec<(&'static str, &'static str, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let head = String::from_utf8_lossy(&buf).to_string();
            let path = head.split_whitespace().nth(1).unwrap_or("").to_string();
            log.lock().unwrap().push(head);

            let (status, body) = routes
                .iter()
                .find(|(prefix, _, _)| path.starts_with(prefix))
                .map(|(_, status, body)| (*status, *body))
                .unwrap_or(("404 Not Found", r#"{"message":"Not Found"}"#));
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    (format!("http://{addr}"), seen)
}

fn client(api_base: &str, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(&GitHubConfig {
        api_base: api_base.to_string(),
        token: token.map(str::to_string),
    })
    .unwrap()
}

fn repo() -> RepoRef {
    RepoRef::new("octocat", "hello-world").unwrap()
}

#[tokio::test]
async fn list_commits_sends_per_page_and_bearer_token() {
    let (base, seen) = serve(vec![(
        "/repos/octocat/hello-world/commits",
        "200 OK",
        r#"[{"sha":"abc","commit":{"author":{"name":"Alice"}},"author":{"login":"alice"}}]"#,
    )])
    .await;

    let commits = client(&base, Some("ghp_test"))
        .list_commits(&repo(), 25)
        .await
        .unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].author_name, "alice");

    let requests = seen.lock().unwrap();
    let head = requests[0].to_lowercase();
    assert!(head.starts_with("get /repos/octocat/hello-world/commits?per_page=25 "));
    assert!(head.contains("authorization: bearer ghp_test"));
    assert!(head.contains("user-agent: gitpair/"));
}

#[tokio::test]
async fn list_commits_surfaces_status_code() {
    let (base, _seen) = serve(vec![]).await;

    let err = client(&base, None)
        .list_commits(&repo(), 50)
        .await
        .unwrap_err();
    match &err {
        GitpairError::Api { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn commit_files_reads_detail_endpoint() {
    let (base, seen) = serve(vec![(
        "/repos/octocat/hello-world/commits/abc",
        "200 OK",
        r#"{"sha":"abc","files":[{"filename":"src/main.rs"},{"filename":"Cargo.toml"}]}"#,
    )])
    .await;

    let files = client(&base, None)
        .commit_files(&repo(), "abc")
        .await
        .unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].filename, "src/main.rs");

    let requests = seen.lock().unwrap();
    assert!(!requests[0].to_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn commit_files_error_propagates() {
    let (base, _seen) = serve(vec![(
        "/repos/octocat/hello-world/commits/abc",
        "500 Internal Server Error",
        "",
    )])
    .await;

    let err = client(&base, None)
        .commit_files(&repo(), "abc")
        .await
        .unwrap_err();
    assert!(matches!(err, GitpairError::Api { status: 500, .. }));
}
