/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use anyhow::anyhow;
use clap::{Arg, ArgAction, Command, value_parser};
use clap_complete::Shell;

mod logger;

mod cmd_check;
mod cmd_generate;
mod cmd_list;
mod cmd_lookup;

const GLOBAL_ARG_COMPLETION: &str = "completion";
const GLOBAL_ARG_VERBOSE: &str = "verbose";

fn build_cli_args() -> Command {
    Command::new("logtagctl")
        .about("Generate and inspect the log tag table")
        .arg(
            Arg::new(GLOBAL_ARG_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("show verbose message")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v')
                .global(true),
        )
        .subcommand(cmd_generate::command())
        .subcommand(cmd_check::command())
        .subcommand(cmd_list::command())
        .subcommand(cmd_lookup::command())
}

fn main() -> anyhow::Result<()> {
    let args = build_cli_args().get_matches();

    if let Some(target) = args.get_one::<Shell>(GLOBAL_ARG_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let verbose_level = args
        .get_one::<u8>(GLOBAL_ARG_VERBOSE)
        .copied()
        .unwrap_or_default();
    logger::SyncLogger::new(verbose_level)
        .into_global_logger()
        .map_err(|e| anyhow!("failed to setup logger: {e}"))?;

    if let Some((subcommand, args)) = args.subcommand() {
        match subcommand {
            cmd_generate::COMMAND => cmd_generate::run(args),
            cmd_check::COMMAND => cmd_check::run(args),
            cmd_list::COMMAND => cmd_list::run(args),
            cmd_lookup::COMMAND => cmd_lookup::run(args),
            cmd => Err(anyhow!("invalid subcommand {cmd}")),
        }
    } else {
        Err(anyhow!("no subcommand found"))
    }
}
