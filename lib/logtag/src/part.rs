/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use crate::{LogCategory, LogComponent, LogTag, LogTagParseError};

impl LogComponent {
    /// Tags of this component, in id order.
    pub fn tags(self) -> impl Iterator<Item = LogTag> + Clone {
        LogTag::iter().filter(move |tag| tag.component() == self)
    }
}

impl LogCategory {
    /// Tags of this category across all components, in id order.
    pub fn tags(self) -> impl Iterator<Item = LogTag> + Clone {
        LogTag::iter().filter(move |tag| tag.category() == self)
    }
}

impl FromStr for LogComponent {
    type Err = LogTagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LogTagParseError::Empty);
        }
        LogComponent::lookup(&s.to_ascii_lowercase())
            .ok_or_else(|| LogTagParseError::UnknownComponent(s.to_string()))
    }
}

impl FromStr for LogCategory {
    type Err = LogTagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LogTagParseError::Empty);
        }
        LogCategory::lookup(&s.to_ascii_lowercase())
            .ok_or_else(|| LogTagParseError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for LogComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_tags() {
        let tags: Vec<LogTag> = LogComponent::Finger.tags().collect();
        assert_eq!(
            tags,
            [
                LogTag::FingerDebug,
                LogTag::FingerError,
                LogTag::FingerPolicy,
                LogTag::FingerRequest,
                LogTag::FingerViolation,
            ]
        );

        let total: usize = LogComponent::ALL.iter().map(|c| c.tags().count()).sum();
        assert_eq!(total, LogTag::COUNT);
    }

    #[test]
    fn category_tags() {
        let tags: Vec<LogTag> = LogCategory::Violations.tags().collect();
        assert_eq!(tags, [LogTag::TelnetViolations]);

        let tags: Vec<LogTag> = LogCategory::Stderr.tags().collect();
        assert_eq!(tags, [LogTag::CoreStderr]);
    }

    #[test]
    fn parse() {
        assert_eq!(LogComponent::from_str("X11").unwrap(), LogComponent::X11);
        assert_eq!(
            LogComponent::from_str("sqlnet").unwrap(),
            LogComponent::Sqlnet
        );
        assert_eq!(
            LogComponent::from_str("gopher"),
            Err(LogTagParseError::UnknownComponent("gopher".to_string()))
        );
        assert_eq!(
            LogCategory::from_str("Policy").unwrap(),
            LogCategory::Policy
        );
        assert!(LogCategory::from_str("").is_err());
    }

    #[test]
    fn order() {
        assert_eq!(LogComponent::ALL.len(), 27);
        assert_eq!(LogComponent::ALL[0], LogComponent::Core);
        assert_eq!(LogComponent::ALL[26], LogComponent::X11);
        assert_eq!(LogCategory::ALL.len(), 17);
        assert_eq!(LogCategory::ALL[0], LogCategory::Accounting);
        assert_eq!(LogComponent::Msrpc.to_string(), "msrpc");
        assert_eq!(LogCategory::Stderr.to_string(), "stderr");
    }
}
