/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PART_COMPONENT: &str = "component";
const PART_CATEGORY: &str = "category";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagNameError {
    #[error("no '.' between component and category")]
    NoSeparator,
    #[error("more than one '.' found")]
    TooManySeparators,
    #[error("empty {0} part")]
    EmptyPart(&'static str),
    #[error("{0} part should start with a lowercase ascii letter")]
    InvalidLeadingChar(&'static str),
    #[error("invalid char {1:?} in {0} part")]
    InvalidChar(&'static str, char),
}

/// A tag name in its canonical `<component>.<category>` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName {
    component: String,
    category: String,
}

fn check_part(part: &str, kind: &'static str) -> Result<(), TagNameError> {
    let mut chars = part.chars();
    let Some(c) = chars.next() else {
        return Err(TagNameError::EmptyPart(kind));
    };
    if !c.is_ascii_lowercase() {
        return Err(TagNameError::InvalidLeadingChar(kind));
    }
    for c in chars {
        if !matches!(c, 'a'..='z' | '0'..='9' | '_') {
            return Err(TagNameError::InvalidChar(kind, c));
        }
    }
    Ok(())
}

pub(crate) fn camel_ident(part: &str) -> String {
    let mut s = String::with_capacity(part.len());
    push_camel(&mut s, part);
    s
}

fn push_camel(buf: &mut String, part: &str) {
    for chunk in part.split('_') {
        let mut chars = chunk.chars();
        if let Some(c) = chars.next() {
            buf.push(c.to_ascii_uppercase());
            buf.extend(chars);
        }
    }
}

impl TagName {
    pub fn new(component: &str, category: &str) -> Result<Self, TagNameError> {
        check_part(component, PART_COMPONENT)?;
        check_part(category, PART_CATEGORY)?;
        Ok(TagName {
            component: component.to_string(),
            category: category.to_string(),
        })
    }

    #[inline]
    pub fn component(&self) -> &str {
        &self.component
    }

    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn dotted(&self) -> String {
        format!("{}.{}", self.component, self.category)
    }

    /// The C style constant name, e.g. `LOGTAG_CORE_DEBUG` for prefix `LOGTAG`.
    ///
    /// An empty prefix leaves the name unprefixed.
    pub fn const_name(&self, prefix: &str) -> String {
        let bare = self.bare_const_name();
        if prefix.is_empty() {
            bare
        } else {
            format!("{prefix}_{bare}")
        }
    }

    pub fn bare_const_name(&self) -> String {
        format!(
            "{}_{}",
            self.component.to_ascii_uppercase(),
            self.category.to_ascii_uppercase()
        )
    }

    pub fn component_ident(&self) -> String {
        camel_ident(&self.component)
    }

    pub fn category_ident(&self) -> String {
        camel_ident(&self.category)
    }

    /// The enum variant identifier, e.g. `CoreDebug` or `Pop3Reply`.
    pub fn variant_ident(&self) -> String {
        let mut s = String::with_capacity(self.component.len() + self.category.len());
        push_camel(&mut s, &self.component);
        push_camel(&mut s, &self.category);
        s
    }
}

impl FromStr for TagName {
    type Err = TagNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((component, category)) = s.split_once('.') else {
            return Err(TagNameError::NoSeparator);
        };
        if category.contains('.') {
            return Err(TagNameError::TooManySeparators);
        }
        TagName::new(component, category)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.category)
    }
}
