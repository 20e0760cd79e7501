/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use anyhow::anyhow;
use clap::{Arg, ArgMatches, Command};
use log::debug;

use logtag::{LogComponent, LogTag};

use super::cmd_list::print_tag;

pub(super) const COMMAND: &str = "lookup";

const COMMAND_ARG_KEY: &str = "key";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Show a log tag by id or name, or all tags of a component")
        .arg(
            Arg::new(COMMAND_ARG_KEY)
                .help("tag id, dotted name, constant name or component name")
                .value_name("KEY")
                .num_args(1)
                .required(true),
        )
}

#[derive(Debug, PartialEq, Eq)]
enum Found {
    Tag(LogTag),
    Component(LogComponent),
}

fn resolve(key: &str) -> anyhow::Result<Found> {
    if let Ok(id) = u16::from_str(key) {
        let tag = LogTag::try_from(id)?;
        return Ok(Found::Tag(tag));
    }

    match LogTag::from_str(key) {
        Ok(tag) => Ok(Found::Tag(tag)),
        Err(e) => {
            debug!("{key} is not a tag name: {e}");
            let component =
                LogComponent::from_str(key).map_err(|_| anyhow!("no log tag found for {key}"))?;
            Ok(Found::Component(component))
        }
    }
}

pub(super) fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let key = args
        .get_one::<String>(COMMAND_ARG_KEY)
        .ok_or_else(|| anyhow!("no lookup key set"))?;

    match resolve(key)? {
        Found::Tag(tag) => {
            print_tag(tag);
            println!("component: {}", tag.component());
            println!("category: {}", tag.category());
        }
        Found::Component(component) => component.tags().for_each(print_tag),
    }
    Ok(())
}
