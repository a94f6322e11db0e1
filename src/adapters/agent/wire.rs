//! SSH agent message framing.
//!
//! Requests are encoded with `ssh-agent-lib`. Replies are decoded here:
//! an agent can hold OpenSSH certificates next to plain keys, and each
//! identity blob has to be read according to its own algorithm tag.

use ssh_agent_lib::proto::Request;
use ssh_agent_lib::ssh_encoding::{self, Decode, Encode};
use ssh_key::public::KeyData;
use ssh_key::{Certificate, PublicKey};

use crate::core::errors::{Result, SshareError};

const SSH_AGENT_FAILURE: u8 = 5;
const SSH_AGENT_SUCCESS: u8 = 6;
const SSH_AGENT_IDENTITIES_ANSWER: u8 = 12;

const CERT_SUFFIX: &str = "-cert-v01@openssh.com";

/// Largest reply accepted from an agent.
pub const MAX_REPLY_LEN: usize = 256 * 1024;

/// Public half of an agent identity.
#[derive(Debug, Clone)]
pub enum Credential {
    Key(KeyData),
    Certificate(Box<Certificate>),
}

#[derive(Debug, Clone)]
pub struct AgentIdentity {
    pub credential: Credential,
    pub comment: String,
}

impl AgentIdentity {
    /// The identity as a single authorized-key line, carrying the agent's comment.
    pub fn to_openssh(&self) -> Result<String> {
        let line = match &self.credential {
            Credential::Key(key) => PublicKey::new(key.clone(), self.comment.as_str()).to_openssh(),
            Credential::Certificate(cert) => cert.to_openssh().map(|line| {
                if self.comment.is_empty() {
                    line
                } else {
                    format!("{} {}", line.trim_end(), self.comment)
                }
            }),
        };
        line.map_err(|e| SshareError::Agent {
            reason: format!("failed to encode key from agent: {e}"),
        })
    }
}

#[derive(Debug)]
pub enum Reply {
    Success,
    Failure,
    Identities(Vec<AgentIdentity>),
}

/// Encode `request` behind its `uint32` length prefix.
pub fn frame(request: &Request) -> Result<Vec<u8>> {
    let mut framed = Vec::new();
    request.encode_prefixed(&mut framed).map_err(malformed)?;
    Ok(framed)
}

/// Decode one reply body (without its length prefix).
pub fn decode_reply(mut body: &[u8]) -> Result<Reply> {
    let reader = &mut body;
    match u8::decode(&mut *reader).map_err(malformed)? {
        SSH_AGENT_SUCCESS => Ok(Reply::Success),
        SSH_AGENT_FAILURE => Ok(Reply::Failure),
        SSH_AGENT_IDENTITIES_ANSWER => decode_identities(reader).map(Reply::Identities),
        other => Err(SshareError::Agent {
            reason: format!("unexpected agent reply type {other}"),
        }),
    }
}

fn decode_identities(reader: &mut &[u8]) -> Result<Vec<AgentIdentity>> {
    let count = u32::decode(&mut *reader).map_err(malformed)?;
    (0..count)
        .map(|_| {
            let blob = Vec::<u8>::decode(&mut *reader).map_err(malformed)?;
            let comment = String::decode(&mut *reader).map_err(malformed)?;
            Ok(AgentIdentity {
                credential: decode_credential(&blob)?,
                comment,
            })
        })
        .collect()
}

fn decode_credential(blob: &[u8]) -> Result<Credential> {
    let algorithm = String::decode(&mut &blob[..]).map_err(malformed)?;
    let decoded = if algorithm.ends_with(CERT_SUFFIX) {
        Certificate::from_bytes(blob).map(|cert| Credential::Certificate(Box::new(cert)))
    } else {
        KeyData::decode(&mut &blob[..]).map(Credential::Key)
    };
    decoded.map_err(|e| SshareError::Agent {
        reason: format!("failed to decode {algorithm} identity from agent: {e}"),
    })
}

fn malformed(e: ssh_encoding::Error) -> SshareError {
    SshareError::Agent {
        reason: format!("malformed agent message: {e}"),
    }
}
