use crate::error::Result;
use crate::github::RepoClient;
use serde::Serialize;
use sha2::{Digest, Sha256};

pub const INDEX_FILE: &str = "index.html";

/// Hex SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn is_same_content(a: &str, b: &str) -> bool {
    content_hash(a) == content_hash(b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Write `content` to `path` on `branch` unless the published file already
/// has the same content hash. `git_ref` pins the read to a specific commit.
pub fn publish_file(
    repo: &RepoClient<'_>,
    path: &str,
    content: &str,
    branch: &str,
    git_ref: &str,
    messages: (&str, &str),
) -> Result<PublishOutcome> {
    let (create_message, update_message) = messages;
    match repo.file(path, git_ref)? {
        Some(existing) if is_same_content(content, &existing.content) => {
            tracing::info!(path, "published content unchanged, skipping write");
            Ok(PublishOutcome::Unchanged)
        }
        Some(existing) => {
            repo.put_file(path, content, update_message, Some(branch), Some(&existing.sha))?;
            Ok(PublishOutcome::Updated)
        }
        None => {
            repo.put_file(path, content, create_message, Some(branch), None)?;
            Ok(PublishOutcome::Created)
        }
    }
}

/// Publish the rendered status page as `index.html`.
pub fn publish_index(
    repo: &RepoClient<'_>,
    content: &str,
    branch: &str,
    git_ref: &str,
) -> Result<PublishOutcome> {
    publish_file(
        repo,
        INDEX_FILE,
        content,
        branch,
        git_ref,
        ("initial", "update index"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GithubClient;
    use base64::Engine as _;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn file_body(content: &str) -> String {
        json!({
            "path": "index.html",
            "sha": "blob-1",
            "content": base64::engine::general_purpose::STANDARD.encode(content),
            "encoding": "base64",
        })
        .to_string()
    }

    #[test]
    fn hash_is_stable_hex() {
        let hash = content_hash("some foo");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, content_hash("some foo"));
        assert_ne!(hash, content_hash("some bar"));
        assert!(is_same_content("a", "a"));
    }

    #[test]
    fn unchanged_content_skips_write() {
        let mut server = Server::new();
        server
            .mock("GET", "/repos/acme/status/contents/index.html")
            .match_query(Matcher::UrlEncoded("ref".into(), "head-sha".into()))
            .with_body(file_body("<p>ok</p>"))
            .create();
        let put = server
            .mock("PUT", "/repos/acme/status/contents/index.html")
            .expect(0)
            .create();

        let client = GithubClient::new(&server.url(), "token").unwrap();
        let repo = client.repo("acme", "status");
        let outcome = publish_index(&repo, "<p>ok</p>", "gh-pages", "head-sha").unwrap();
        assert_eq!(outcome, PublishOutcome::Unchanged);
        put.assert();
    }

    #[test]
    fn changed_content_updates_with_blob_sha() {
        let mut server = Server::new();
        server
            .mock("GET", "/repos/acme/status/contents/index.html")
            .match_query(Matcher::Any)
            .with_body(file_body("<p>old</p>"))
            .create();
        let put = server
            .mock("PUT", "/repos/acme/status/contents/index.html")
            .match_body(Matcher::PartialJson(json!({
                "message": "update index",
                "sha": "blob-1",
                "branch": "gh-pages",
            })))
            .with_body("{}")
            .create();

        let client = GithubClient::new(&server.url(), "token").unwrap();
        let repo = client.repo("acme", "status");
        let outcome = publish_index(&repo, "<p>new</p>", "gh-pages", "head-sha").unwrap();
        assert_eq!(outcome, PublishOutcome::Updated);
        put.assert();
    }

    #[test]
    fn missing_index_is_created() {
        let mut server = Server::new();
        server
            .mock("GET", "/repos/acme/status/contents/index.html")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create();
        let put = server
            .mock("PUT", "/repos/acme/status/contents/index.html")
            .match_body(Matcher::PartialJson(json!({ "message": "initial" })))
            .with_status(201)
            .with_body("{}")
            .create();

        let client = GithubClient::new(&server.url(), "token").unwrap();
        let repo = client.repo("acme", "status");
        let outcome = publish_index(&repo, "<p>new</p>", "gh-pages", "head-sha").unwrap();
        assert_eq!(outcome, PublishOutcome::Created);
        put.assert();
    }
}
