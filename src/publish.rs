// ABOUTME: Publish synchronizer for the markdown-to-presentation application
// ABOUTME: Reconciles a build into a remote pages branch through a persistent workspace

use crate::config::PublishConfig;
use crate::errors::{MtpError, Result};
use crate::utils::{copy_dir_all, validate_directory_exists, validate_file_exists};
use log::{debug, info, warn};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const GIT_USER: &str = "markdown-to-presentation";
const GIT_EMAIL: &str = "mtp@example.com";

/// The persistent local checkout of the pages branch. It survives across
/// invocations, is mutated only by [`publish`], and goes away only through
/// [`Workspace::destroy`]. Deleting it costs nothing but a fresh fetch on
/// the next publish.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open the workspace at `root`, creating and initializing it if absent.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.join(".git").is_dir() {
            info!("Initializing publish workspace at {:?}", root);
            fs::create_dir_all(root)?;
            git(root, &["init", "--quiet"])?;
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove the workspace from disk. Remote state is untouched; the next
    /// publish starts from a fresh fetch.
    pub fn destroy(self) -> Result<()> {
        info!("Removing publish workspace at {:?}", self.root);
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        git(&self.root, args)
    }

    /// Delete everything in the workspace except the version-control
    /// metadata, then copy in the redirect file and build directory with
    /// their relative layout preserved.
    fn replace_contents(&self, redirect_file: &Path, build_dir: &Path) -> Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_name() == ".git" {
                continue;
            }
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }

        let redirect_name = redirect_file
            .file_name()
            .ok_or_else(|| MtpError::InputError(format!("Bad redirect path: {:?}", redirect_file)))?;
        fs::copy(redirect_file, self.root.join(redirect_name))?;

        let build_name = build_dir
            .file_name()
            .ok_or_else(|| MtpError::InputError(format!("Bad build path: {:?}", build_dir)))?;
        copy_dir_all(build_dir, &self.root.join(build_name))?;
        Ok(())
    }

    fn has_commit(&self) -> bool {
        self.git(&["rev-parse", "--verify", "--quiet", "HEAD"]).is_ok()
    }
}

/// Publish the redirect file and build directory to the pages branch.
///
/// The branch is fetched into the persistent workspace (or started as an
/// orphan with no parent commits if it does not exist remotely), the
/// workspace contents are replaced wholesale, and the result is committed
/// and pushed only when the tree actually changed. Pushing uses a remote
/// URL with the credential injected for that one invocation; the token is
/// never written to any persisted configuration.
pub fn publish(redirect_file: &Path, build_dir: &Path, config: &PublishConfig) -> Result<()> {
    validate_file_exists(redirect_file)?;
    validate_directory_exists(build_dir)?;

    let remote_url = match &config.remote_url {
        Some(url) => url.clone(),
        None => discover_remote_url(&config.repo_dir, &config.remote)?,
    };

    let workspace = Workspace::open(&config.workspace_dir)?;
    checkout_branch(&workspace, &remote_url, &config.branch)?;
    workspace.replace_contents(redirect_file, build_dir)?;

    workspace.git(&["add", "-A"])?;
    let status = workspace.git(&["status", "--porcelain"])?;
    if status.is_empty() {
        if workspace.has_commit() {
            info!("Branch {} already up to date, nothing to push", config.branch);
        } else {
            warn!("Nothing staged for the initial commit, nothing to push");
        }
        return Ok(());
    }

    let message = format!("Deployed {} to pages", chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"));
    info!("Committing: {}", message);
    workspace.git(&[
        "-c",
        &format!("user.name={}", GIT_USER),
        "-c",
        &format!("user.email={}", GIT_EMAIL),
        "commit",
        "--quiet",
        "-m",
        &message,
    ])?;

    push_head(&workspace, &remote_url, config)
}

/// Fetch the remote branch into the workspace, or point HEAD at an unborn
/// orphan branch when the remote does not have it yet.
fn checkout_branch(workspace: &Workspace, remote_url: &str, branch: &str) -> Result<()> {
    match workspace.git(&["fetch", "--quiet", remote_url, branch]) {
        Ok(_) => {
            info!("Checking out {} from remote", branch);
            workspace.git(&["checkout", "--quiet", "-f", "-B", branch, "FETCH_HEAD"])?;
            Ok(())
        }
        Err(MtpError::GitError { stderr, .. })
            if stderr.to_lowercase().contains("couldn't find remote ref") =>
        {
            info!("Remote branch {} not found, starting an orphan tree", branch);
            let head_ref = format!("refs/heads/{}", branch);
            workspace.git(&["symbolic-ref", "HEAD", &head_ref])?;
            // Drop any stale local tip so the first commit has no parents.
            let _ = workspace.git(&["update-ref", "-d", &head_ref]);
            Ok(())
        }
        Err(MtpError::GitError { command, stderr }) => {
            Err(classify_transport_error(command, stderr))
        }
        Err(other) => Err(other),
    }
}

/// Push HEAD to the remote branch through a URL carrying the credential.
/// The token lives only in this call's argument list and is scrubbed from
/// any error text.
fn push_head(workspace: &Workspace, remote_url: &str, config: &PublishConfig) -> Result<()> {
    let (push_url, token) = authenticated_url(remote_url, &config.token_var)?;
    let refspec = format!("HEAD:refs/heads/{}", config.branch);

    info!("Pushing {} to {}", config.branch, config.remote);
    match run_git(
        workspace.root(),
        &["push", "--quiet", &push_url, &refspec],
        token.as_deref(),
    ) {
        Ok(_) => {
            info!("Push complete");
            Ok(())
        }
        Err(MtpError::GitError { command, stderr }) => {
            Err(classify_transport_error(command, stderr))
        }
        Err(other) => Err(other),
    }
}

/// Read the configured remote's URL from the enclosing repository.
fn discover_remote_url(repo_dir: &Path, remote: &str) -> Result<String> {
    let key = format!("remote.{}.url", remote);
    git(repo_dir, &["config", "--get", &key]).map_err(|_| {
        MtpError::ConfigError(format!(
            "No URL configured for remote {:?} in {:?}",
            remote, repo_dir
        ))
    })
}

/// Inject the credential into the authentication segment of an http(s)
/// remote URL. Other transports (ssh, local paths) are passed through
/// untouched; the credential only applies to http authentication.
pub(crate) fn authenticated_url(url: &str, token_var: &str) -> Result<(String, Option<String>)> {
    for scheme in ["https://", "http://"] {
        if let Some(rest) = url.strip_prefix(scheme) {
            let token = env::var(token_var)
                .map_err(|_| MtpError::MissingCredential(token_var.to_string()))?;
            // Only an `@` before the first path segment is userinfo; an `@`
            // later in the URL is part of the path.
            let rest = match rest.split_once('@') {
                Some((userinfo, host)) if !userinfo.contains('/') => host,
                _ => rest,
            };
            return Ok((format!("{}{}@{}", scheme, token, rest), Some(token)));
        }
    }
    Ok((url.to_string(), None))
}

pub(crate) fn redact(text: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => text.replace(token, "***"),
        _ => text.to_string(),
    }
}

/// Sort a failed remote interaction into the publish error taxonomy:
/// credential rejection, non-fast-forward conflict, or transport failure.
pub(crate) fn classify_transport_error(command: String, stderr: String) -> MtpError {
    let lower = stderr.to_lowercase();
    if lower.contains("non-fast-forward")
        || lower.contains("fetch first")
        || lower.contains("[rejected]")
    {
        MtpError::PublishConflictError(stderr)
    } else if lower.contains("authentication failed")
        || lower.contains("invalid username or password")
        || lower.contains("could not read username")
        || lower.contains("403")
        || lower.contains("401")
    {
        MtpError::PublishAuthError(stderr)
    } else if lower.contains("could not resolve host")
        || lower.contains("unable to access")
        || lower.contains("connection refused")
        || lower.contains("connection reset")
        || lower.contains("timed out")
        || lower.contains("network is unreachable")
    {
        MtpError::PublishNetworkError(stderr)
    } else {
        MtpError::GitError { command, stderr }
    }
}

/// Run git in `dir`, returning trimmed stdout on success and a `GitError`
/// carrying stderr on failure.
fn git(dir: &Path, args: &[&str]) -> Result<String> {
    run_git(dir, args, None)
}

/// Core git runner. When a secret is supplied it is scrubbed from the debug
/// log and from any error text, so a credential embedded in an argument
/// never escapes process memory.
fn run_git(dir: &Path, args: &[&str], secret: Option<&str>) -> Result<String> {
    debug!("git -C {:?} {}", dir, redact(&args.join(" "), secret));
    let output = Command::new("git").arg("-C").arg(dir).args(args).output()?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(MtpError::GitError {
            command: redact(&format!("git {}", args.join(" ")), secret),
            stderr: redact(String::from_utf8_lossy(&output.stderr).trim(), secret),
        })
    }
}
