use std::fmt;
use std::str::FromStr;

use crate::core::errors::{Result, SshareError};

/// How long a paste stays online.
///
/// `Invalid` is what [`ExpiryTime::parse`] returns for unrecognised input;
/// it must be rejected before talking to the paste API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryTime {
    Never,
    TenMinutes,
    OneHour,
    OneDay,
    OneWeek,
    TwoWeeks,
    OneMonth,
    SixMonths,
    OneYear,
    Invalid,
}

impl ExpiryTime {
    #[cfg(test)]
    pub const ALL: [ExpiryTime; 9] = [
        ExpiryTime::Never,
        ExpiryTime::TenMinutes,
        ExpiryTime::OneHour,
        ExpiryTime::OneDay,
        ExpiryTime::OneWeek,
        ExpiryTime::TwoWeeks,
        ExpiryTime::OneMonth,
        ExpiryTime::SixMonths,
        ExpiryTime::OneYear,
    ];

    /// Code sent as `api_paste_expire_date`. Empty for `Invalid`.
    pub fn code(self) -> &'static str {
        match self {
            ExpiryTime::Never => "N",
            ExpiryTime::TenMinutes => "10M",
            ExpiryTime::OneHour => "1H",
            ExpiryTime::OneDay => "1D",
            ExpiryTime::OneWeek => "1W",
            ExpiryTime::TwoWeeks => "2W",
            ExpiryTime::OneMonth => "1M",
            ExpiryTime::SixMonths => "6M",
            ExpiryTime::OneYear => "1Y",
            ExpiryTime::Invalid => "",
        }
    }

    /// Parse a code or alias, ignoring ASCII case (`"1d"`, `"day"`, `"never"`...).
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "n" | "never" => ExpiryTime::Never,
            "10m" | "10min" | "10mins" => ExpiryTime::TenMinutes,
            "1h" | "1hour" | "hour" => ExpiryTime::OneHour,
            "1d" | "1day" | "day" => ExpiryTime::OneDay,
            "1w" | "1week" | "week" => ExpiryTime::OneWeek,
            "2w" | "2weeks" => ExpiryTime::TwoWeeks,
            "1m" | "1month" | "month" => ExpiryTime::OneMonth,
            "6m" | "6months" => ExpiryTime::SixMonths,
            "1y" | "1year" | "year" => ExpiryTime::OneYear,
            _ => ExpiryTime::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != ExpiryTime::Invalid
    }
}

impl fmt::Display for ExpiryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ExpiryTime {
    type Err = SshareError;

    fn from_str(s: &str) -> Result<Self> {
        match ExpiryTime::parse(s) {
            ExpiryTime::Invalid => Err(SshareError::InvalidConfig {
                detail: format!(
                    "unknown paste expiry '{s}' (use one of N, 10M, 1H, 1D, 1W, 2W, 1M, 6M, 1Y)"
                ),
            }),
            expiry => Ok(expiry),
        }
    }
}

/// Who can see a paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Invalid,
}

impl Visibility {
    #[cfg(test)]
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Unlisted, Visibility::Private];

    /// Code sent as `api_paste_private`. Empty for `Invalid`.
    pub fn code(self) -> &'static str {
        match self {
            Visibility::Public => "0",
            Visibility::Unlisted => "1",
            Visibility::Private => "2",
            Visibility::Invalid => "",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "public" | "pub" => Visibility::Public,
            "1" | "unlisted" => Visibility::Unlisted,
            "2" | "private" | "priv" => Visibility::Private,
            _ => Visibility::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Visibility::Invalid
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Visibility {
    type Err = SshareError;

    fn from_str(s: &str) -> Result<Self> {
        match Visibility::parse(s) {
            Visibility::Invalid => Err(SshareError::InvalidConfig {
                detail: format!("unknown paste visibility '{s}' (use public, unlisted or private)"),
            }),
            visibility => Ok(visibility),
        }
    }
}

/// Credentials and location of a paste API account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteConfig {
    pub endpoint_base: String,
    pub dev_token: String,
    pub user_key: Option<String>,
    pub folder_key: Option<String>,
}

/// Base URL of the public Pastebin instance.
pub const DEFAULT_PASTEBIN_URL: &str = "https://pastebin.com";

impl PasteConfig {
    /// Fails when `dev_token` is empty; every API call needs it.
    pub fn new(endpoint_base: impl Into<String>, dev_token: impl Into<String>) -> Result<Self> {
        let dev_token = dev_token.into();
        if dev_token.trim().is_empty() {
            return Err(SshareError::InvalidConfig {
                detail: "a pastebin developer token is required \
                         (--pastebin-token or [pastebin] dev_token)"
                    .into(),
            });
        }
        Ok(Self {
            endpoint_base: endpoint_base.into(),
            dev_token,
            user_key: None,
            folder_key: None,
        })
    }

    /// Post as a logged-in user. An empty key is ignored.
    pub fn with_user_key(self, user_key: impl Into<String>) -> Self {
        let user_key = user_key.into();
        Self {
            user_key: (!user_key.is_empty()).then_some(user_key),
            ..self
        }
    }

    pub fn with_folder_key(self, folder_key: impl Into<String>) -> Self {
        let folder_key = folder_key.into();
        Self {
            folder_key: (!folder_key.is_empty()).then_some(folder_key),
            ..self
        }
    }
}
