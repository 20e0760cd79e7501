/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches, Command};

use logtag::{LogCategory, LogComponent, LogTag};

pub(super) const COMMAND: &str = "list";

const COMMAND_ARG_COMPONENT: &str = "component";
const COMMAND_ARG_CATEGORY: &str = "category";
const COMMAND_ARG_COMPONENTS: &str = "components";
const COMMAND_ARG_CATEGORIES: &str = "categories";

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("List the builtin log tags")
        .arg(
            Arg::new(COMMAND_ARG_COMPONENT)
                .help("only show tags of this component")
                .value_name("COMPONENT")
                .num_args(1)
                .value_parser(|s: &str| LogComponent::from_str(s))
                .long(COMMAND_ARG_COMPONENT),
        )
        .arg(
            Arg::new(COMMAND_ARG_CATEGORY)
                .help("only show tags of this category")
                .value_name("CATEGORY")
                .num_args(1)
                .value_parser(|s: &str| LogCategory::from_str(s))
                .long(COMMAND_ARG_CATEGORY),
        )
        .arg(
            Arg::new(COMMAND_ARG_COMPONENTS)
                .help("list component names")
                .num_args(0)
                .action(ArgAction::SetTrue)
                .long(COMMAND_ARG_COMPONENTS)
                .exclusive(true),
        )
        .arg(
            Arg::new(COMMAND_ARG_CATEGORIES)
                .help("list category names")
                .num_args(0)
                .action(ArgAction::SetTrue)
                .long(COMMAND_ARG_CATEGORIES)
                .exclusive(true),
        )
}

pub(super) fn print_tag(tag: LogTag) {
    println!("{:>5}  {:<24} {}", tag.id(), tag.as_str(), tag.const_name());
}

pub(super) fn run(args: &ArgMatches) -> anyhow::Result<()> {
    if args.get_flag(COMMAND_ARG_COMPONENTS) {
        for component in LogComponent::ALL {
            println!("{component}");
        }
        return Ok(());
    }
    if args.get_flag(COMMAND_ARG_CATEGORIES) {
        for category in LogCategory::ALL {
            println!("{category}");
        }
        return Ok(());
    }

    let component = args.get_one::<LogComponent>(COMMAND_ARG_COMPONENT).copied();
    let category = args.get_one::<LogCategory>(COMMAND_ARG_CATEGORY).copied();
    select_tags(component, category).for_each(print_tag);
    Ok(())
}

fn select_tags(
    component: Option<LogComponent>,
    category: Option<LogCategory>,
) -> impl Iterator<Item = LogTag> {
    LogTag::iter()
        .filter(move |tag| component.is_none_or(|c| tag.component() == c))
        .filter(move |tag| category.is_none_or(|c| tag.category() == c))
}
