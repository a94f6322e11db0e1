use std::path::Path;
use std::str::FromStr;

use ssh_key::authorized_keys::Entry;
use ssh_key::{Algorithm, Certificate, HashAlg, PublicKey};

use crate::core::errors::{Result, SshareError};

/// An SSH public key in the `authorized_keys` format.
///
/// A `Key` can only be built from text that parses as a single valid
/// authorized key line (or OpenSSH certificate line), so `raw()` is always
/// safe to write into an `authorized_keys` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    raw: String,
    name: String,
    key_type: String,
    public_key: PublicKey,
}

impl Key {
    /// Parse `raw` as an authorized key line.
    ///
    /// When `name` is empty the key's own comment is used instead.
    pub fn parse(raw: &str, name: &str) -> Result<Self> {
        let line = raw.trim();
        if line.is_empty() {
            return Err(SshareError::KeyParse {
                detail: "key is empty".into(),
            });
        }
        if line.lines().count() > 1 {
            return Err(SshareError::KeyParse {
                detail: "expected a single line, found several".into(),
            });
        }

        let (public_key, key_type) = match Entry::from_str(line) {
            Ok(entry) => {
                let public_key = entry.public_key().clone();
                let key_type = public_key.algorithm().as_str().to_string();
                (public_key, key_type)
            }
            Err(e) => {
                let cert = Certificate::from_openssh(line).map_err(|_| SshareError::KeyParse {
                    detail: format!("could not parse key as a valid authorized key: {e}"),
                })?;
                // Certificates are identified by the key they certify.
                let public_key = PublicKey::new(cert.public_key().clone(), cert.comment());
                (public_key, cert.algorithm().to_certificate_type())
            }
        };

        if let Algorithm::Other(name) = public_key.algorithm() {
            return Err(SshareError::KeyParse {
                detail: format!("unsupported key type '{}'", name.as_str()),
            });
        }

        let name = if name.is_empty() {
            public_key.comment().to_string()
        } else {
            name.to_string()
        };

        Ok(Self {
            raw: line.to_string(),
            name,
            key_type,
            public_key,
        })
    }

    /// Read a public key file (e.g. `~/.ssh/id_ed25519.pub`).
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SshareError::KeyFileNotFound {
                path: path.to_path_buf(),
            },
            _ => SshareError::Io(e),
        })?;
        Self::parse(contents.trim(), "")
    }

    /// The key line exactly as it belongs in an `authorized_keys` file.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Algorithm name, e.g. `ssh-ed25519` or `ssh-ed25519-cert-v01@openssh.com`.
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// SHA-256 fingerprint in the `SHA256:<base64>` form printed by `ssh-keygen -l`.
    pub fn fingerprint(&self) -> String {
        self.public_key.fingerprint(HashAlg::Sha256).to_string()
    }

    /// Short label used when listing keys to a human.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("{} ({})", self.key_type(), self.fingerprint())
        } else {
            format!("{} ({})", self.name, self.fingerprint())
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Join keys into an `authorized_keys` body, one key per line.
pub fn render_authorized_keys(keys: &[Key]) -> String {
    keys.iter().fold(String::new(), |mut out, key| {
        out.push_str(key.raw());
        out.push('\n');
        out
    })
}
