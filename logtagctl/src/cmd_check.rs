/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint, value_parser};
use log::{info, warn};

use logtag::LogTag;
use logtag_gen::TagList;

pub(super) const COMMAND: &str = "check";

const COMMAND_ARG_LIST: &str = "list";
const COMMAND_ARG_BUILTIN: &str = "builtin";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Validate a tag list")
        .arg(
            Arg::new(COMMAND_ARG_LIST)
                .help("tag list file")
                .value_name("LIST FILE")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .required(true),
        )
        .arg(
            Arg::new(COMMAND_ARG_BUILTIN)
                .help("compare with the table built into this program")
                .num_args(0)
                .action(ArgAction::SetTrue)
                .long(COMMAND_ARG_BUILTIN),
        )
}

#[derive(Debug, PartialEq, Eq)]
enum Drift {
    Added { name: String, id: u16 },
    Removed { tag: LogTag },
    Shifted { tag: LogTag, id: u16 },
    Bound { builtin: u16, max: u16 },
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::Added { name, id } => write!(f, "added {name} with id {id}"),
            Drift::Removed { tag } => write!(f, "removed {tag} with id {}", tag.id()),
            Drift::Shifted { tag, id } => write!(f, "shifted {tag} from id {} to {id}", tag.id()),
            Drift::Bound { builtin, max } => write!(f, "bound changed from {builtin} to {max}"),
        }
    }
}

/// Differences between `list` and the compiled table, in list order.
fn compare_builtin(list: &TagList) -> Vec<Drift> {
    let mut drifts = Vec::new();
    for entry in list.iter() {
        let name = entry.name().dotted();
        match name.parse::<LogTag>() {
            Ok(tag) if tag.id() == entry.id() => {}
            Ok(tag) => drifts.push(Drift::Shifted { tag, id: entry.id() }),
            Err(_) => drifts.push(Drift::Added {
                name,
                id: entry.id(),
            }),
        }
    }
    for tag in LogTag::iter() {
        if list.find(tag.as_str()).is_none() {
            drifts.push(Drift::Removed { tag });
        }
    }
    if list.max() != LogTag::MAX {
        drifts.push(Drift::Bound {
            builtin: LogTag::MAX,
            max: list.max(),
        });
    }
    drifts
}

pub(super) fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let file = args
        .get_one::<PathBuf>(COMMAND_ARG_LIST)
        .ok_or_else(|| anyhow!("no tag list file set"))?;
    let content = fs::read_to_string(file)
        .map_err(|e| anyhow!("failed to read tag list {}: {e}", file.display()))?;
    let list = TagList::parse(&content).context(format!("invalid tag list {}", file.display()))?;

    println!(
        "{} tags, {} components, {} categories, max id {}",
        list.len(),
        list.component_count(),
        list.category_count(),
        list.max()
    );

    if !args.get_flag(COMMAND_ARG_BUILTIN) {
        return Ok(());
    }

    let drifts = compare_builtin(&list);
    if drifts.is_empty() {
        info!("tag list matches the builtin table");
        return Ok(());
    }
    for drift in &drifts {
        println!("{drift}");
    }
    warn!("all consumers of the tag table need to be rebuilt");
    Err(anyhow!(
        "tag list differs from the builtin table in {} places",
        drifts.len()
    ))
}
