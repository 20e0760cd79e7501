/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use crate::{LogComponent, LogTag, LogTagSet};

pub fn as_log_tag(v: &Yaml) -> anyhow::Result<LogTag> {
    match v {
        Yaml::String(s) => LogTag::from_str(s).map_err(|e| anyhow!("invalid log tag: {e}")),
        Yaml::Integer(i) => {
            let id = u16::try_from(*i).map_err(|_| anyhow!("out of range log tag id {i}"))?;
            LogTag::try_from(id).map_err(|e| anyhow!("{e}"))
        }
        _ => Err(anyhow!(
            "yaml value type for 'log tag' should be 'string' or 'integer'"
        )),
    }
}

pub fn as_log_component(v: &Yaml) -> anyhow::Result<LogComponent> {
    if let Yaml::String(s) = v {
        LogComponent::from_str(s).map_err(|e| anyhow!("invalid log component: {e}"))
    } else {
        Err(anyhow!(
            "yaml value type for 'log component' should be 'string'"
        ))
    }
}

fn add_to_set(set: &mut LogTagSet, v: &Yaml) -> anyhow::Result<()> {
    if let Yaml::String(s) = v {
        let s = s.trim();
        if s == "*" {
            set.union_with(&LogTagSet::all());
            return Ok(());
        }
        if let Some(component) = s.strip_suffix(".*") {
            let component = LogComponent::from_str(component)
                .map_err(|e| anyhow!("invalid log component: {e}"))?;
            set.insert_component(component);
            return Ok(());
        }
        if let Ok(component) = LogComponent::from_str(s) {
            set.insert_component(component);
            return Ok(());
        }
    }

    let tag = as_log_tag(v)?;
    set.insert(tag);
    Ok(())
}

/// Parse a single tag selector or a list of them.
///
/// A selector is a tag name or id, a component name (`ftp` or `ftp.*`) or `*`
/// for all tags.
pub fn as_log_tag_set(v: &Yaml) -> anyhow::Result<LogTagSet> {
    let mut set = LogTagSet::empty();
    match v {
        Yaml::Array(seq) => {
            for (i, v) in seq.iter().enumerate() {
                add_to_set(&mut set, v).context(format!("invalid value for list element #{i}"))?;
            }
        }
        _ => add_to_set(&mut set, v).context("invalid single value for the list")?,
    }
    Ok(set)
}
