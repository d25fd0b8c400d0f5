//! Remote URL and SSH credential helpers

use std::path::{Path, PathBuf};

use super::GitError;

/// Who we authenticate as, and with which private key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    /// Private key file. `None` leaves ssh to its own defaults (agent, ~/.ssh).
    pub key_path: Option<PathBuf>,
}

impl Credentials {
    /// Value for `GIT_SSH_COMMAND`, or `None` when no key is configured.
    ///
    /// BatchMode keeps ssh from prompting on a terminal nobody is watching.
    pub fn ssh_command(&self) -> Option<String> {
        let key = self.key_path.as_deref()?;
        Some(format!(
            "ssh -i {} -o IdentitiesOnly=yes -o BatchMode=yes -o StrictHostKeyChecking=accept-new",
            shell_quote(key)
        ))
    }
}

/// Build `ssh://user@host:port/repository.git`.
///
/// The user and port parts are dropped when empty. A trailing `.git` on the
/// repository is not doubled.
pub fn remote_url(user: &str, host: &str, port: &str, repository: &str) -> Result<String, GitError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(GitError::MissingSetting("GitHost"));
    }

    let repository = repository.trim().trim_matches('/');
    let repository = repository.strip_suffix(".git").unwrap_or(repository);
    if repository.is_empty() {
        return Err(GitError::MissingSetting("GitRepository"));
    }

    let mut url = String::from("ssh://");
    let user = user.trim();
    if !user.is_empty() {
        url.push_str(user);
        url.push('@');
    }
    url.push_str(host);
    let port = port.trim();
    if !port.is_empty() {
        url.push(':');
        url.push_str(port);
    }
    url.push('/');
    url.push_str(repository);
    url.push_str(".git");

    Ok(url)
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url() {
        assert_eq!(
            remote_url("git", "example.com", "22", "me/blog").unwrap(),
            "ssh://git@example.com:22/me/blog.git"
        );
    }

    #[test]
    fn optional_parts_are_dropped() {
        assert_eq!(
            remote_url("", "example.com", " ", "/me/blog.git").unwrap(),
            "ssh://example.com/me/blog.git"
        );
    }

    #[test]
    fn host_and_repository_are_required() {
        assert!(matches!(
            remote_url("git", "", "22", "me/blog"),
            Err(GitError::MissingSetting("GitHost"))
        ));
        assert!(matches!(
            remote_url("git", "example.com", "22", " .git"),
            Err(GitError::MissingSetting("GitRepository"))
        ));
    }

    #[test]
    fn ssh_command_quotes_key_path() {
        let creds = Credentials {
            user: "git".to_string(),
            key_path: Some(PathBuf::from("/home/me/my key's")),
        };
        let cmd = creds.ssh_command().unwrap();
        assert!(cmd.starts_with(r"ssh -i '/home/me/my key'\''s' -o IdentitiesOnly=yes"));

        assert!(Credentials::default().ssh_command().is_none());
    }
}
