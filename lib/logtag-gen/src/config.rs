/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader};

use crate::{OutputFormat, RenderOptions, TagList, render};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub path: PathBuf,
}

/// Generator settings loaded from a yaml file.
///
/// ```yaml
/// input: logtags.list
/// const_prefix: LOGTAG
/// header_guard: LOGTAG_NAMES_DEFINED
/// output:
///   - format: c-header
///     path: logtag.h
///   - format: gperf
///     path: logtag.gperf
/// ```
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    input: PathBuf,
    options: RenderOptions,
    outputs: Vec<OutputTarget>,
}

fn normalize_key(k: &str) -> String {
    k.to_lowercase().replace('-', "_")
}

fn foreach_kv<F>(v: &Yaml, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    let Yaml::Hash(map) = v else {
        return Err(anyhow!("yaml value type should be 'map'"));
    };
    for (k, v) in map.iter() {
        let Yaml::String(key) = k else {
            return Err(anyhow!("key in map should be string"));
        };
        f(key, v).context(format!("failed to parse value of key {key}"))?;
    }
    Ok(())
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        _ => Err(anyhow!(
            "yaml value type for string should be 'string' or 'integer'"
        )),
    }
}

fn as_path(v: &Yaml, conf_dir: &Path) -> anyhow::Result<PathBuf> {
    let s = as_string(v)?;
    if s.is_empty() {
        return Err(anyhow!("empty path"));
    }
    let path = PathBuf::from(s);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(conf_dir.join(path))
    }
}

fn as_output_format(v: &Yaml) -> anyhow::Result<OutputFormat> {
    let s = as_string(v)?;
    OutputFormat::from_str(&s).map_err(|_| anyhow!("unsupported output format {s}"))
}

fn as_output_target(v: &Yaml, conf_dir: &Path) -> anyhow::Result<OutputTarget> {
    let mut format = None;
    let mut path = None;
    foreach_kv(v, |k, v| match normalize_key(k).as_str() {
        "format" => {
            format = Some(as_output_format(v)?);
            Ok(())
        }
        "path" | "file" => {
            path = Some(as_path(v, conf_dir)?);
            Ok(())
        }
        _ => Err(anyhow!("invalid key {k}")),
    })?;
    let format = format.ok_or_else(|| anyhow!("no format set"))?;
    let path = path.ok_or_else(|| anyhow!("no path set"))?;
    Ok(OutputTarget { format, path })
}

impl GenerateConfig {
    pub fn new(input: PathBuf) -> Self {
        GenerateConfig {
            input,
            options: RenderOptions::default(),
            outputs: Vec::new(),
        }
    }

    pub fn load(file: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(file)
            .map_err(|e| anyhow!("failed to read config file {}: {e}", file.display()))?;
        let docs = YamlLoader::load_from_str(&content)
            .map_err(|e| anyhow!("failed to load yaml file {}: {e}", file.display()))?;
        let doc = docs
            .first()
            .ok_or_else(|| anyhow!("no yaml doc found in {}", file.display()))?;
        let conf_dir = file.parent().unwrap_or_else(|| Path::new("."));
        GenerateConfig::parse(doc, conf_dir)
            .context(format!("invalid config file {}", file.display()))
    }

    pub fn parse(v: &Yaml, conf_dir: &Path) -> anyhow::Result<Self> {
        let mut input = None;
        let mut options = RenderOptions::default();
        let mut outputs = Vec::new();
        foreach_kv(v, |k, v| match normalize_key(k).as_str() {
            "input" | "list" => {
                input = Some(as_path(v, conf_dir)?);
                Ok(())
            }
            "const_prefix" | "prefix" => {
                options.set_const_prefix(&as_string(v)?)?;
                Ok(())
            }
            "header_guard" | "guard" => {
                options.set_header_guard(&as_string(v)?)?;
                Ok(())
            }
            "header_name" => {
                options.set_header_name(&as_string(v)?);
                Ok(())
            }
            "generator" => {
                options.set_generator(&as_string(v)?);
                Ok(())
            }
            "output" | "outputs" => {
                match v {
                    Yaml::Array(seq) => {
                        for (i, v) in seq.iter().enumerate() {
                            let target = as_output_target(v, conf_dir)
                                .context(format!("invalid value for list element #{i}"))?;
                            outputs.push(target);
                        }
                    }
                    _ => outputs.push(as_output_target(v, conf_dir)?),
                }
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        })?;

        let input = input.ok_or_else(|| anyhow!("no input list set"))?;
        Ok(GenerateConfig {
            input,
            options,
            outputs,
        })
    }

    #[inline]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[inline]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[inline]
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    #[inline]
    pub fn outputs(&self) -> &[OutputTarget] {
        &self.outputs
    }

    /// Replace all configured outputs with `target`.
    pub fn set_output(&mut self, target: OutputTarget) {
        self.outputs.clear();
        self.outputs.push(target);
    }

    pub fn load_list(&self) -> anyhow::Result<TagList> {
        let content = fs::read_to_string(&self.input)
            .map_err(|e| anyhow!("failed to read tag list {}: {e}", self.input.display()))?;
        TagList::parse(&content)
            .context(format!("invalid tag list {}", self.input.display()))
    }

    /// Load the input list and write every configured output.
    pub fn run(&self) -> anyhow::Result<TagList> {
        let list = self.load_list()?;
        for target in &self.outputs {
            let content = render(&list, target.format, &self.options);
            fs::write(&target.path, content).map_err(|e| {
                anyhow!(
                    "failed to write {} output to {}: {e}",
                    target.format,
                    target.path.display()
                )
            })?;
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_doc(s: &str) -> Yaml {
        YamlLoader::load_from_str(s).unwrap().remove(0)
    }

    #[test]
    fn parse_full() {
        let doc = load_doc(
            "input: logtags.list\n\
             const-prefix: ZT_\n\
             header_guard: ZT_DEFINED\n\
             generator: genlutable.sh\n\
             output:\n\
             \x20 - format: c-header\n\
             \x20   path: out/logtag.h\n\
             \x20 - format: gperf\n\
             \x20   path: /tmp/logtag.gperf\n",
        );
        let config = GenerateConfig::parse(&doc, Path::new("/etc/logtag")).unwrap();
        assert_eq!(config.input(), Path::new("/etc/logtag/logtags.list"));
        assert_eq!(config.options().const_prefix(), "ZT");
        assert_eq!(config.options().header_guard(), "ZT_DEFINED");
        assert_eq!(config.options().generator(), "genlutable.sh");
        assert_eq!(
            config.outputs(),
            &[
                OutputTarget {
                    format: OutputFormat::CHeader,
                    path: PathBuf::from("/etc/logtag/out/logtag.h"),
                },
                OutputTarget {
                    format: OutputFormat::Gperf,
                    path: PathBuf::from("/tmp/logtag.gperf"),
                },
            ]
        );
    }

    #[test]
    fn parse_single_output() {
        let doc = load_doc("list: tags.list\noutput:\n  format: rust\n  path: table.rs\n");
        let config = GenerateConfig::parse(&doc, Path::new("conf")).unwrap();
        assert_eq!(config.input(), Path::new("conf/tags.list"));
        assert_eq!(config.options(), &RenderOptions::default());
        assert_eq!(config.outputs().len(), 1);
        assert_eq!(config.outputs()[0].format, OutputFormat::Rust);
    }

    #[test]
    fn parse_invalid() {
        let doc = load_doc("output: []\n");
        assert!(GenerateConfig::parse(&doc, Path::new(".")).is_err());

        let doc = load_doc("input: a.list\nunknown: 1\n");
        assert!(GenerateConfig::parse(&doc, Path::new(".")).is_err());

        let doc = load_doc("input: a.list\noutput:\n  format: json\n  path: a.json\n");
        assert!(GenerateConfig::parse(&doc, Path::new(".")).is_err());

        let doc = load_doc("input: a.list\noutput:\n  format: rust\n");
        assert!(GenerateConfig::parse(&doc, Path::new(".")).is_err());

        let doc = load_doc("input: a.list\nconst_prefix: my-tag\n");
        assert!(GenerateConfig::parse(&doc, Path::new(".")).is_err());

        let doc = load_doc("input: a.list\nheader_guard: logtag.h\n");
        assert!(GenerateConfig::parse(&doc, Path::new(".")).is_err());
    }
}
