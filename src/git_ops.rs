use std::path::Path;

use git2::{PushOptions, RemoteCallbacks, Repository, Signature};

use crate::config::IdentityConfig;
use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// Wrapper around git2 Repository for the publish sequence.
///
/// Provides the version-control side effects of a release: setting the
/// committer identity, staging the manifest, committing, tagging, and
/// pushing. Each operation is a separate step so failures surface at the
/// step that caused them.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discovers the git repository in the current directory or parent
    /// directories.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully initialized repository wrapper
    /// * `Err` - If not in a git repository
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".")?;
        Ok(GitRepo { repo })
    }

    /// Opens the repository at a specific path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(GitRepo { repo })
    }

    /// Persists the committer identity into the repository-local config.
    ///
    /// This is a durable configuration change (`user.name` / `user.email`
    /// in `.git/config`), not a transient override, matching what a CI bot
    /// leaves behind after running.
    pub fn set_identity(&self, identity: &IdentityConfig) -> Result<()> {
        let mut config = self.repo.config()?;
        config.set_str("user.name", &identity.name)?;
        config.set_str("user.email", &identity.email)?;
        Ok(())
    }

    /// Stages a file for the next commit.
    ///
    /// # Arguments
    /// * `path` - Path relative to the repository work tree
    pub fn stage(&self, path: &Path) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(path)?;
        index.write()?;
        Ok(())
    }

    /// Commits the staged index with the given message.
    ///
    /// HEAD may be unborn on a fresh repository; the release commit then
    /// becomes the root commit.
    pub fn commit_release(&self, message: &str, identity: &IdentityConfig) -> Result<git2::Oid> {
        let sig = Signature::now(&identity.name, &identity.email)?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        Ok(oid)
    }

    /// Creates an annotated tag on the current HEAD commit.
    ///
    /// # Arguments
    /// * `tag_name` - Name of the tag to create (e.g. "v1.0.1")
    /// * `message` - Annotation message carried by the tag object
    pub fn tag_release(
        &self,
        tag_name: &str,
        message: &str,
        identity: &IdentityConfig,
    ) -> Result<()> {
        let sig = Signature::now(&identity.name, &identity.email)?;
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .tag(tag_name, head.as_object(), &sig, message, false)?;
        Ok(())
    }

    /// Returns the short name of the branch HEAD points at.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::remote("HEAD is detached or invalid"))
    }

    /// Pushes the given branch to a remote.
    pub fn push_branch(&self, remote_name: &str, branch: &str) -> Result<()> {
        self.push_refspec(remote_name, &format!("refs/heads/{0}:refs/heads/{0}", branch))
    }

    /// Pushes a tag to a remote.
    pub fn push_tag(&self, remote_name: &str, tag_name: &str) -> Result<()> {
        self.push_refspec(remote_name, &format!("refs/tags/{}", tag_name))
    }

    /// Pushes a single refspec with SSH credential resolution.
    ///
    /// Tries SSH keys from ~/.ssh/ first, then the SSH agent, then default
    /// credentials. Transport output is not echoed; only success or failure
    /// is reported.
    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            ReleaseError::remote(format!("No remote named '{}' found", remote_name))
        })?;

        let mut push_options = PushOptions::new();
        let mut callbacks = RemoteCallbacks::new();

        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Catch per-reference rejections reported during the push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::remote(format!("Network error during push: {}", e))
                } else {
                    ReleaseError::remote(format!("Failed to push '{}': {}", refspec, e))
                }
            })
    }

    /// Runs the full publish sequence for a bumped version.
    ///
    /// In order: set identity, stage the manifest, commit, annotated tag,
    /// push the current branch, push the tag. The first failing step aborts
    /// the sequence; steps already performed are not rolled back, since a
    /// created commit or tag is externally observable and re-invocation is
    /// the recovery mechanism.
    pub fn publish(
        &self,
        manifest: &Path,
        version: &Version,
        identity: &IdentityConfig,
        remote: &str,
    ) -> Result<()> {
        self.set_identity(identity)?;
        self.stage(manifest)?;
        self.commit_release(
            &format!("chore(release): bump version to {}", version),
            identity,
        )?;

        let tag_name = format!("v{}", version);
        self.tag_release(&tag_name, &format!("Release {}", version), identity)?;

        let branch = self.current_branch()?;
        self.push_branch(remote, &branch)?;
        self.push_tag(remote, &tag_name)?;

        Ok(())
    }
}
