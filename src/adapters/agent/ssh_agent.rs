//! SSH agent client.
//!
//! Lists the identities held by a running agent over its Unix socket. When
//! the agent is locked and a passphrase is known, the agent is unlocked for
//! exactly one listing call and locked again straight after.

use std::io;
use std::path::{Path, PathBuf};

use ssh_agent_lib::proto::Request;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::runtime::Runtime;

use super::wire::{self, AgentIdentity, Reply};
use crate::core::errors::{Result, SshareError};
use crate::core::models::key::Key;
use crate::core::models::key_listing::KeyListing;
use crate::core::traits::key_source::KeySource;

/// An open connection to an SSH agent.
///
/// The socket is released by [`SshAgentClient::close`] or on drop.
pub struct SshAgentClient {
    stream: UnixStream,
    runtime: Runtime,
    passphrase: Option<String>,
}

impl SshAgentClient {
    /// Connect to the agent listening on `path` (usually `$SSH_AUTH_SOCK`).
    pub fn connect(path: &Path) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let stream = runtime
            .block_on(UnixStream::connect(path))
            .map_err(|e| SshareError::AgentConnection {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            stream,
            runtime,
            passphrase: None,
        })
    }

    /// Passphrase used to unlock the agent around [`list_keys`](Self::list_keys).
    /// An empty passphrase means the agent is not locked.
    pub fn with_passphrase(self, passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        Self {
            passphrase: (!passphrase.is_empty()).then_some(passphrase),
            ..self
        }
    }

    /// List every identity in the agent as a [`Key`], in agent order.
    ///
    /// A failed unlock aborts before anything is listed. Once unlocked, the
    /// agent is locked again whether or not listing succeeded. A failed
    /// re-lock does not discard the keys; it is returned as the listing's
    /// warning.
    pub fn list_keys(&mut self) -> Result<KeyListing> {
        let passphrase = self.passphrase.clone();
        if let Some(passphrase) = &passphrase {
            self.unlock(passphrase)?;
        }

        let listed = self.request_keys();

        let Some(passphrase) = &passphrase else {
            return listed.map(KeyListing::new);
        };
        let relocked = self.lock(passphrase);
        let listing = KeyListing::new(listed?);
        Ok(match relocked {
            Ok(()) => listing,
            Err(e) => listing.with_warning(e),
        })
    }

    /// Release the connection.
    pub fn close(self) {
        drop(self);
    }

    fn request_keys(&mut self) -> Result<Vec<Key>> {
        match self.call(Request::RequestIdentities)? {
            Reply::Identities(identities) => identities.iter().map(identity_to_key).collect(),
            reply => Err(rejected("failed to get keys from agent", &reply)),
        }
    }

    fn unlock(&mut self, passphrase: &str) -> Result<()> {
        match self.call(Request::Unlock(passphrase.to_string()))? {
            Reply::Success => Ok(()),
            reply => Err(rejected("failed to unlock ssh agent", &reply)),
        }
    }

    fn lock(&mut self, passphrase: &str) -> Result<()> {
        match self.call(Request::Lock(passphrase.to_string()))? {
            Reply::Success => Ok(()),
            reply => Err(rejected("failed to re-lock ssh agent", &reply)),
        }
    }

    /// Send one request and wait for its reply.
    fn call(&mut self, request: Request) -> Result<Reply> {
        let frame = wire::frame(&request)?;
        let body = self
            .runtime
            .block_on(exchange(&mut self.stream, &frame))
            .map_err(|e| SshareError::Agent {
                reason: format!("agent connection failed: {e}"),
            })?;
        wire::decode_reply(&body)
    }
}

async fn exchange(stream: &mut UnixStream, frame: &[u8]) -> io::Result<Vec<u8>> {
    stream.write_all(frame).await?;

    let mut len = [0u8; 4];
    stream.read_exact(&mut len).await?;
    let len = u32::from_be_bytes(len) as usize;
    if len > wire::MAX_REPLY_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("reply of {len} bytes exceeds the limit"),
        ));
    }

    let mut body = vec![0; len];
    stream.read_exact(&mut body).await?;
    Ok(body)
}

fn rejected(action: &str, reply: &Reply) -> SshareError {
    let reason = match reply {
        Reply::Failure => "the agent refused the request",
        _ => "unexpected reply from the agent",
    };
    SshareError::Agent {
        reason: format!("{action}: {reason}"),
    }
}

fn identity_to_key(identity: &AgentIdentity) -> Result<Key> {
    let line = identity.to_openssh()?;
    Key::parse(&line, &identity.comment).map_err(|e| SshareError::Agent {
        reason: format!("failed to parse key from agent: {e}"),
    })
}

/// Key source backed by an SSH agent socket.
///
/// Each fetch opens a connection and closes it again, on success and
/// failure alike.
pub struct AgentKeySource {
    path: PathBuf,
    passphrase: Option<String>,
}

impl AgentKeySource {
    pub fn new(path: impl Into<PathBuf>, passphrase: Option<String>) -> Self {
        Self {
            path: path.into(),
            passphrase,
        }
    }
}

impl KeySource for AgentKeySource {
    fn name(&self) -> &str {
        "SSH agent"
    }

    fn fetch_keys(&mut self) -> Result<KeyListing> {
        let mut agent = SshAgentClient::connect(&self.path)?
            .with_passphrase(self.passphrase.clone().unwrap_or_default());
        let listing = agent.list_keys();
        agent.close();
        listing
    }
}
