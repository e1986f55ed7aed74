pub mod create;
pub mod system;
pub mod update;
pub mod upgrade;

use anyhow::Context;
use clap::Args;
use statuspage_core::github::{GithubClient, RepoClient, DEFAULT_API_URL};

/// Where the status page lives and how to reach it.
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Repository name
    #[arg(long)]
    pub name: String,

    /// Organization owning the repository (default: the token's user)
    #[arg(long)]
    pub org: Option<String>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL
    #[arg(long, env = "STATUSPAGE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl RepoArgs {
    pub fn client(&self) -> anyhow::Result<GithubClient> {
        GithubClient::new(&self.api_url, &self.token).context("failed to create GitHub client")
    }

    /// Resolve the owner and scope a client to the page repository.
    pub fn repo<'a>(&self, client: &'a GithubClient) -> anyhow::Result<RepoClient<'a>> {
        let owner = statuspage_core::repo::resolve_owner(client, self.org.as_deref())
            .context("failed to resolve repository owner")?;
        Ok(client.repo(owner, self.name.clone()))
    }
}
