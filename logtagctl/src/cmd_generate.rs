/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::anyhow;
use clap::{Arg, ArgMatches, Command, ValueHint, value_parser};
use log::{debug, info};

use logtag_gen::{GenerateConfig, OutputFormat, OutputTarget};

pub(super) const COMMAND: &str = "generate";

const COMMAND_ARG_CONFIG: &str = "config";
const COMMAND_ARG_INPUT: &str = "input";
const COMMAND_ARG_FORMAT: &str = "format";
const COMMAND_ARG_OUTPUT: &str = "output";
const COMMAND_ARG_PREFIX: &str = "prefix";
const COMMAND_ARG_GUARD: &str = "guard";
const COMMAND_ARG_HEADER_NAME: &str = "header-name";
const COMMAND_ARG_GENERATOR: &str = "generator";

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).map_err(|_| format!("unsupported output format {s}"))
}

pub(super) fn command() -> Command {
    Command::new(COMMAND)
        .about("Render the tag table from a tag list")
        .arg(
            Arg::new(COMMAND_ARG_CONFIG)
                .help("generator config file")
                .value_name("CONFIG FILE")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .short('c')
                .long(COMMAND_ARG_CONFIG)
                .conflicts_with(COMMAND_ARG_INPUT),
        )
        .arg(
            Arg::new(COMMAND_ARG_INPUT)
                .help("tag list file")
                .value_name("LIST FILE")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .short('i')
                .long(COMMAND_ARG_INPUT)
                .required_unless_present(COMMAND_ARG_CONFIG),
        )
        .arg(
            Arg::new(COMMAND_ARG_FORMAT)
                .help("output format: rust, c-header or gperf [default: c-header]")
                .value_name("FORMAT")
                .num_args(1)
                .value_parser(parse_format)
                .short('f')
                .long(COMMAND_ARG_FORMAT),
        )
        .arg(
            Arg::new(COMMAND_ARG_OUTPUT)
                .help("output file, stdout if not set")
                .value_name("OUTPUT FILE")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .short('o')
                .long(COMMAND_ARG_OUTPUT),
        )
        .arg(
            Arg::new(COMMAND_ARG_PREFIX)
                .help("prefix of the constant names")
                .value_name("PREFIX")
                .num_args(1)
                .long(COMMAND_ARG_PREFIX),
        )
        .arg(
            Arg::new(COMMAND_ARG_GUARD)
                .help("include guard of the C header")
                .value_name("MACRO")
                .num_args(1)
                .long(COMMAND_ARG_GUARD),
        )
        .arg(
            Arg::new(COMMAND_ARG_HEADER_NAME)
                .help("header included by the gperf file")
                .value_name("FILE NAME")
                .num_args(1)
                .long(COMMAND_ARG_HEADER_NAME),
        )
        .arg(
            Arg::new(COMMAND_ARG_GENERATOR)
                .help("generator name in the banner comment")
                .value_name("NAME")
                .num_args(1)
                .long(COMMAND_ARG_GENERATOR),
        )
}

fn load_config(args: &ArgMatches) -> anyhow::Result<GenerateConfig> {
    let mut config = if let Some(file) = args.get_one::<PathBuf>(COMMAND_ARG_CONFIG) {
        debug!("loading generator config from {}", file.display());
        GenerateConfig::load(file)?
    } else {
        let input = args
            .get_one::<PathBuf>(COMMAND_ARG_INPUT)
            .ok_or_else(|| anyhow!("no input list set"))?;
        GenerateConfig::new(input.clone())
    };

    let options = config.options_mut();
    if let Some(prefix) = args.get_one::<String>(COMMAND_ARG_PREFIX) {
        options.set_const_prefix(prefix)?;
    }
    if let Some(guard) = args.get_one::<String>(COMMAND_ARG_GUARD) {
        options.set_header_guard(guard)?;
    }
    if let Some(name) = args.get_one::<String>(COMMAND_ARG_HEADER_NAME) {
        options.set_header_name(name);
    }
    if let Some(generator) = args.get_one::<String>(COMMAND_ARG_GENERATOR) {
        options.set_generator(generator);
    }
    Ok(config)
}

#[derive(Debug, PartialEq, Eq)]
enum Destination {
    Stdout(OutputFormat),
    Files,
}

/// Apply `--format` and `--output` on top of the outputs from the config.
///
/// `--output` replaces every configured output. `--format` alone only selects
/// the stdout format, so it is rejected if the config already writes files.
fn override_outputs(
    config: &mut GenerateConfig,
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> anyhow::Result<Destination> {
    if let Some(path) = output {
        config.set_output(OutputTarget {
            format: format.unwrap_or(OutputFormat::CHeader),
            path: path.to_path_buf(),
        });
        return Ok(Destination::Files);
    }

    if config.outputs().is_empty() {
        return Ok(Destination::Stdout(format.unwrap_or(OutputFormat::CHeader)));
    }
    match format {
        Some(format) => Err(anyhow!(
            "no output file set for format {format}, the config already has outputs"
        )),
        None => Ok(Destination::Files),
    }
}

fn generate<W: Write>(args: &ArgMatches, stdout: &mut W) -> anyhow::Result<()> {
    let mut config = load_config(args)?;
    let format = args.get_one::<OutputFormat>(COMMAND_ARG_FORMAT).copied();
    let output = args
        .get_one::<PathBuf>(COMMAND_ARG_OUTPUT)
        .map(|p| p.as_path());

    match override_outputs(&mut config, format, output)? {
        Destination::Stdout(format) => {
            let list = config.load_list()?;
            debug!("loaded {} tags from {}", list.len(), config.input().display());
            let content = logtag_gen::render(&list, format, config.options());
            stdout
                .write_all(content.as_bytes())
                .map_err(|e| anyhow!("failed to write to stdout: {e}"))?;
        }
        Destination::Files => {
            let list = config.run()?;
            for target in config.outputs() {
                info!("{} output written to {}", target.format, target.path.display());
            }
            info!(
                "generated {} tags from {}, max id {}",
                list.len(),
                config.input().display(),
                list.max()
            );
        }
    }
    Ok(())
}

pub(super) fn run(args: &ArgMatches) -> anyhow::Result<()> {
    generate(args, &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TAG_LIST: &str = "core.debug\nftp.error\n";
    const CONFIG: &str = "input: tags.list\noutput:\n  format: c-header\n  path: cfg.h\n";

    static TEST_DIR_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let id = TEST_DIR_ID_COUNTER.fetch_add(1, Ordering::SeqCst);
            let path =
                std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), id));
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("tags.list"), TAG_LIST).unwrap();
            fs::write(path.join("gen.yaml"), CONFIG).unwrap();
            TempDir { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }

        fn arg(&self, name: &str) -> String {
            self.path.join(name).display().to_string()
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn run_with(args: &[&str]) -> anyhow::Result<String> {
        let args = command().try_get_matches_from(args.iter().copied())?;
        let mut buf = Vec::new();
        generate(&args, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn stdout() {
        let dir = TempDir::new("logtagctl_stdout");
        let list = dir.arg("tags.list");

        let out = run_with(&["generate", "--input", &list]).unwrap();
        assert!(out.contains("  LOGTAG_FTP_ERROR=2,\n  LOGTAG_MAX=3\n"));

        let args: [&str; 7] = ["generate", "-i", &list, "-f", "gperf", "--prefix", "ZT_"];
        let out = run_with(&args).unwrap();
        assert!(out.contains("%%\ncore.debug, ZT_CORE_DEBUG\nftp.error, ZT_FTP_ERROR\n%%\n"));

        let args: [&str; 5] = ["generate", "-i", &list, "--prefix", "my-tag"];
        assert!(run_with(&args).is_err());
        let args: [&str; 5] = ["generate", "-i", &list, "-f", "json"];
        assert!(run_with(&args).is_err());
    }

    #[test]
    fn config_outputs() {
        let dir = TempDir::new("logtagctl_config");
        let config = dir.arg("gen.yaml");

        let args: [&str; 5] = ["generate", "--config", &config, "--guard", "CFG_H"];
        let out = run_with(&args).unwrap();
        assert!(out.is_empty());
        let header = fs::read_to_string(dir.path().join("cfg.h")).unwrap();
        assert!(header.contains("#ifndef CFG_H\n"));
        assert!(header.contains("  LOGTAG_CORE_DEBUG=1,\n"));
    }

    #[test]
    fn output_replaces_config_outputs() {
        let dir = TempDir::new("logtagctl_override");
        let config = dir.arg("gen.yaml");
        let output = dir.arg("cli.gperf");

        let args: [&str; 7] = ["generate", "-c", &config, "-f", "gperf", "-o", &output];
        run_with(&args).unwrap();
        let gperf = fs::read_to_string(&output).unwrap();
        assert!(gperf.contains("core.debug, LOGTAG_CORE_DEBUG\n"));
        assert!(!dir.path().join("cfg.h").exists());
    }

    #[test]
    fn format_without_output() {
        let dir = TempDir::new("logtagctl_format");
        let config = dir.arg("gen.yaml");

        let args: [&str; 5] = ["generate", "-c", &config, "-f", "gperf"];
        assert!(run_with(&args).is_err());
        assert!(!dir.path().join("cfg.h").exists());
    }

    #[test]
    fn override_rules() {
        let mut config = GenerateConfig::new(PathBuf::from("tags.list"));
        assert_eq!(
            override_outputs(&mut config, None, None).unwrap(),
            Destination::Stdout(OutputFormat::CHeader)
        );
        assert_eq!(
            override_outputs(&mut config, Some(OutputFormat::Rust), None).unwrap(),
            Destination::Stdout(OutputFormat::Rust)
        );

        let path = Path::new("a.gperf");
        assert_eq!(
            override_outputs(&mut config, Some(OutputFormat::Gperf), Some(path)).unwrap(),
            Destination::Files
        );
        assert_eq!(
            config.outputs(),
            &[OutputTarget {
                format: OutputFormat::Gperf,
                path: path.to_path_buf(),
            }]
        );

        let path = Path::new("b.h");
        override_outputs(&mut config, None, Some(path)).unwrap();
        assert_eq!(config.outputs().len(), 1);
        assert_eq!(config.outputs()[0].format, OutputFormat::CHeader);

        assert_eq!(
            override_outputs(&mut config, None, None).unwrap(),
            Destination::Files
        );
        assert!(override_outputs(&mut config, Some(OutputFormat::Rust), None).is_err());
    }
}
