/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::LogTag;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogTagParseError {
    #[error("empty name")]
    Empty,
    #[error("unknown log tag {0}")]
    UnknownTag(String),
    #[error("unknown log component {0}")]
    UnknownComponent(String),
    #[error("unknown log category {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid log tag id {0}")]
pub struct InvalidLogTagId(pub u16);

impl LogTag {
    #[inline]
    pub const fn id(&self) -> u16 {
        *self as u16
    }

    /// The id as an index into arrays sized by [`LogTag::MAX`].
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub fn iter() -> impl Iterator<Item = LogTag> + Clone {
        LogTag::ALL.into_iter()
    }
}

fn strip_const_prefix(upper: &str) -> &str {
    match upper
        .strip_prefix(LogTag::CONST_PREFIX)
        .and_then(|s| s.strip_prefix('_'))
    {
        Some(bare) => bare,
        None => upper,
    }
}

impl FromStr for LogTag {
    type Err = LogTagParseError;

    /// Accepts `core.debug`, `LOGTAG_CORE_DEBUG` and `CORE_DEBUG`, in any ascii case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LogTagParseError::Empty);
        }

        let found = if s.contains('.') {
            LogTag::lookup_name(&s.to_ascii_lowercase())
        } else {
            let upper = s.to_ascii_uppercase();
            LogTag::lookup_bare_const_name(strip_const_prefix(&upper))
        };
        found.ok_or_else(|| LogTagParseError::UnknownTag(s.to_string()))
    }
}

impl TryFrom<u16> for LogTag {
    type Error = InvalidLogTagId;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        LogTag::from_id(id).ok_or(InvalidLogTagId(id))
    }
}

impl From<LogTag> for u16 {
    fn from(tag: LogTag) -> Self {
        tag.id()
    }
}

impl From<LogTag> for usize {
    fn from(tag: LogTag) -> Self {
        tag.index()
    }
}

impl fmt::Display for LogTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogCategory, LogComponent};

    #[test]
    fn parse_spellings() {
        for s in [
            "http.request",
            "HTTP.Request",
            "LOGTAG_HTTP_REQUEST",
            "logtag_http_request",
            "HTTP_REQUEST",
            " http_request\n",
        ] {
            assert_eq!(LogTag::from_str(s).unwrap(), LogTag::HttpRequest, "{s}");
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(LogTag::from_str(""), Err(LogTagParseError::Empty));
        assert_eq!(
            LogTag::from_str("http.reqest"),
            Err(LogTagParseError::UnknownTag("http.reqest".to_string()))
        );
        assert!(LogTag::from_str("LOGTAG_MAX").is_err());
        assert!(LogTag::from_str("LOGTAG_").is_err());
        assert!(LogTag::from_str("core").is_err());
    }

    #[test]
    fn id_conversion() {
        assert_eq!(LogTag::try_from(1u16), Ok(LogTag::CoreAccounting));
        assert_eq!(LogTag::try_from(0u16), Err(InvalidLogTagId(0)));
        assert_eq!(
            LogTag::try_from(LogTag::MAX),
            Err(InvalidLogTagId(LogTag::MAX))
        );
        assert_eq!(u16::from(LogTag::X11Violation), 143);
        assert_eq!(usize::from(LogTag::CoreDebug), 3);
        assert_eq!(InvalidLogTagId(200).to_string(), "invalid log tag id 200");
    }

    #[test]
    fn display() {
        assert_eq!(LogTag::Pop3Reply.to_string(), "pop3.reply");
        assert_eq!(LogTag::Pop3Reply.const_name(), "LOGTAG_POP3_REPLY");
        assert_eq!(LogTag::Pop3Reply.component(), LogComponent::Pop3);
        assert_eq!(LogTag::Pop3Reply.category(), LogCategory::Reply);
    }
}
