use crate::error::{Result, StatusPageError};
use crate::models::{ContentFile, GitRef, Issue, IssueComment, Label, Repository, User};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const PAGES_BRANCH: &str = "gh-pages";

const PER_PAGE: usize = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// GithubClient
// ---------------------------------------------------------------------------

/// Blocking GitHub REST client. Every failed request is returned as an error;
/// nothing is retried.
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    base: Url,
}

impl GithubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StatusPageError::InvalidToken);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(concat!("statuspage/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| StatusPageError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let base = Url::parse(api_url.trim_end_matches('/'))
            .map_err(|e| StatusPageError::InvalidApiUrl(format!("{api_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StatusPageError::InvalidApiUrl(api_url.to_string()));
        }

        Ok(Self { http, base })
    }

    pub fn repo(&self, owner: impl Into<String>, name: impl Into<String>) -> RepoClient<'_> {
        RepoClient {
            client: self,
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn authenticated_user(&self) -> Result<User> {
        let url = self.url(&["user"]);
        self.json("get authenticated user", self.http.get(url))
    }

    /// Create a repository for the authenticated user, or under `org`.
    pub fn create_repo(
        &self,
        org: Option<&str>,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<Repository> {
        let url = match org {
            Some(org) => self.url(&["orgs", org, "repos"]),
            None => self.url(&["user", "repos"]),
        };
        let payload = json!({
            "name": name,
            "description": description,
            "private": private,
        });
        tracing::info!(repo = name, private, "creating repository");
        self.json("create repository", self.http.post(url).json(&payload))
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, context: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "{context}");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(StatusPageError::Api {
            status: status.as_u16(),
            context: context.to_string(),
            message: error_message(&body),
        })
    }

    fn json<T: DeserializeOwned>(&self, context: &str, request: RequestBuilder) -> Result<T> {
        let response = self.send(context, request)?;
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Follow `page=` until a page comes back with fewer than `PER_PAGE` rows.
    fn paginate<T: DeserializeOwned>(
        &self,
        context: &str,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        let mut page = 1_u32;
        loop {
            let request = self
                .http
                .get(url.clone())
                .query(query)
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())]);
            let chunk: Vec<T> = self.json(context, request)?;
            let len = chunk.len();
            rows.extend(chunk);
            if len < PER_PAGE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }
}

/// Pull `message` out of a GitHub error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

// ---------------------------------------------------------------------------
// RepoClient
// ---------------------------------------------------------------------------

/// Requests scoped to one repository.
pub struct RepoClient<'a> {
    client: &'a GithubClient,
    owner: String,
    name: String,
}

impl RepoClient<'_> {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut all = vec!["repos", self.owner.as_str(), self.name.as_str()];
        all.extend_from_slice(segments);
        self.client.url(&all)
    }

    pub fn labels(&self) -> Result<Vec<Label>> {
        self.client.paginate("list labels", self.url(&["labels"]), &[])
    }

    pub fn create_label(&self, name: &str, color: &str) -> Result<Label> {
        let payload = json!({ "name": name, "color": color });
        tracing::info!(label = name, color, "creating label");
        self.client.json(
            "create label",
            self.client.http.post(self.url(&["labels"])).json(&payload),
        )
    }

    pub fn delete_label(&self, name: &str) -> Result<()> {
        tracing::info!(label = name, "deleting label");
        self.client.send(
            "delete label",
            self.client.http.delete(self.url(&["labels", name])),
        )?;
        Ok(())
    }

    /// Issues in any state updated at or after `since`. Pull requests, which
    /// the issues endpoint also returns, are dropped.
    pub fn issues_since(&self, since: DateTime<Utc>) -> Result<Vec<Issue>> {
        let query = [
            ("state", "all".to_string()),
            ("since", since.to_rfc3339()),
        ];
        let issues: Vec<Issue> = self
            .client
            .paginate("list issues", self.url(&["issues"]), &query)?;
        Ok(issues
            .into_iter()
            .filter(|i| i.pull_request.is_none())
            .collect())
    }

    pub fn issue_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        let number = number.to_string();
        self.client.paginate(
            "list issue comments",
            self.url(&["issues", &number, "comments"]),
            &[],
        )
    }

    pub fn collaborators(&self) -> Result<Vec<User>> {
        self.client
            .paginate("list collaborators", self.url(&["collaborators"]), &[])
    }

    /// Head commit sha of `branch`.
    pub fn branch_sha(&self, branch: &str) -> Result<String> {
        let url = self.url(&["git", "ref", "heads", branch]);
        match self
            .client
            .json::<GitRef>("get branch ref", self.client.http.get(url))
        {
            Ok(git_ref) => Ok(git_ref.object.sha),
            Err(e) if e.is_not_found() => Err(StatusPageError::MissingBranch(branch.to_string())),
            Err(e) => Err(e),
        }
    }

    pub fn create_branch(&self, branch: &str, sha: &str) -> Result<()> {
        let payload = json!({ "ref": format!("refs/heads/{branch}"), "sha": sha });
        tracing::info!(branch, sha, "creating branch");
        self.client.send(
            "create branch",
            self.client.http.post(self.url(&["git", "refs"])).json(&payload),
        )?;
        Ok(())
    }

    pub fn set_default_branch(&self, branch: &str) -> Result<()> {
        let payload = json!({ "name": self.name, "default_branch": branch });
        self.client.send(
            "set default branch",
            self.client.http.patch(self.url(&[])).json(&payload),
        )?;
        Ok(())
    }

    /// Fetch a file at `git_ref` (branch name or commit sha). A missing file
    /// is `Ok(None)`.
    pub fn file(&self, path: &str, git_ref: &str) -> Result<Option<RepoFile>> {
        let mut segments = vec!["contents"];
        segments.extend(path.trim_start_matches('/').split('/'));
        let request = self
            .client
            .http
            .get(self.url(&segments))
            .query(&[("ref", git_ref)]);
        let file: ContentFile = match self.client.json("get file contents", request) {
            Ok(file) => file,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(Some(RepoFile::decode(file)?))
    }

    /// Create (`sha == None`) or update a file on `branch` in one commit.
    pub fn put_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: Option<&str>,
        sha: Option<&str>,
    ) -> Result<()> {
        let mut payload = json!({
            "message": message,
            "content": base64::engine::general_purpose::STANDARD.encode(content),
        });
        if let Some(branch) = branch {
            payload["branch"] = json!(branch);
        }
        if let Some(sha) = sha {
            payload["sha"] = json!(sha);
        }
        let mut segments = vec!["contents"];
        segments.extend(path.trim_start_matches('/').split('/'));
        tracing::info!(path, ?branch, update = sha.is_some(), "writing file");
        self.client.send(
            "write file contents",
            self.client.http.put(self.url(&segments)).json(&payload),
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RepoFile
// ---------------------------------------------------------------------------

/// A decoded file from the contents API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    pub path: String,
    /// Blob sha, required to update the file.
    pub sha: String,
    pub content: String,
}

impl RepoFile {
    fn decode(file: ContentFile) -> Result<Self> {
        let content = match file.encoding.as_deref() {
            Some("base64") | None => {
                // The API wraps base64 payloads at 60 columns.
                let packed: String = file.content.split_whitespace().collect();
                let bytes = base64::engine::general_purpose::STANDARD.decode(packed)?;
                String::from_utf8(bytes)?
            }
            Some(_) => file.content,
        };
        Ok(Self {
            path: file.path,
            sha: file.sha,
            content,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
