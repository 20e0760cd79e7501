/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::name::camel_ident;
use crate::{InvalidIdentError, TagEntry, TagList, TagName};

const DEFAULT_CONST_PREFIX: &str = "LOGTAG";
const DEFAULT_HEADER_GUARD: &str = "LOGTAG_NAMES_DEFINED";
const DEFAULT_HEADER_NAME: &str = "logtag.h";
const DEFAULT_GENERATOR: &str = "logtag-gen";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Rust,
    CHeader,
    Gperf,
}

impl OutputFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Rust => "rust",
            OutputFormat::CHeader => "c-header",
            OutputFormat::Gperf => "gperf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rust" | "rs" => Ok(OutputFormat::Rust),
            "c-header" | "c_header" | "header" | "c" | "h" => Ok(OutputFormat::CHeader),
            "gperf" => Ok(OutputFormat::Gperf),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_ident(kind: &'static str, value: &str) -> Result<(), InvalidIdentError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(InvalidIdentError {
            kind,
            value: value.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    const_prefix: String,
    header_guard: String,
    header_name: String,
    generator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            const_prefix: DEFAULT_CONST_PREFIX.to_string(),
            header_guard: DEFAULT_HEADER_GUARD.to_string(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
        }
    }
}

impl RenderOptions {
    /// Set the constant prefix, a trailing `_` is dropped. An empty prefix
    /// renders bare `COMPONENT_CATEGORY` constants.
    pub fn set_const_prefix(&mut self, prefix: &str) -> Result<(), InvalidIdentError> {
        let prefix = prefix.trim_end_matches('_');
        if !prefix.is_empty() {
            check_ident("constant prefix", prefix)?;
        }
        self.const_prefix = prefix.to_string();
        Ok(())
    }

    #[inline]
    pub fn const_prefix(&self) -> &str {
        &self.const_prefix
    }

    pub fn set_header_guard(&mut self, guard: &str) -> Result<(), InvalidIdentError> {
        check_ident("header guard", guard)?;
        self.header_guard = guard.to_string();
        Ok(())
    }

    #[inline]
    pub fn header_guard(&self) -> &str {
        &self.header_guard
    }

    /// The header file the gperf keyword file includes for the constants.
    pub fn set_header_name(&mut self, name: &str) {
        self.header_name = name.to_string();
    }

    #[inline]
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn set_generator(&mut self, generator: &str) {
        self.generator = generator.to_string();
    }

    #[inline]
    pub fn generator(&self) -> &str {
        &self.generator
    }

    fn max_const_name(&self) -> String {
        if self.const_prefix.is_empty() {
            "MAX".to_string()
        } else {
            format!("{}_MAX", self.const_prefix)
        }
    }
}

pub fn render(list: &TagList, format: OutputFormat, options: &RenderOptions) -> String {
    let mut buf = String::with_capacity(list.len() * 128);
    // fmt::Write for String never fails
    let _ = render_to(list, format, options, &mut buf);
    buf
}

pub fn render_to<W: Write>(
    list: &TagList,
    format: OutputFormat,
    options: &RenderOptions,
    w: &mut W,
) -> fmt::Result {
    match format {
        OutputFormat::Rust => RustRender { list, options }.write(w),
        OutputFormat::CHeader => write_c_header(list, options, w),
        OutputFormat::Gperf => write_gperf(list, options, w),
    }
}

fn write_banner<W: Write>(
    w: &mut W,
    options: &RenderOptions,
    open: &str,
    close: &str,
) -> fmt::Result {
    writeln!(
        w,
        "{open}automatically generated by {}, do not edit directly{close}",
        options.generator
    )
}

fn write_c_header<W: Write>(list: &TagList, options: &RenderOptions, w: &mut W) -> fmt::Result {
    let guard = &options.header_guard;
    write_banner(w, options, "/* ", " */")?;
    writeln!(w, "#ifndef {guard}")?;
    writeln!(w, "#define {guard}")?;
    writeln!(w, "\n")?;
    writeln!(w, "enum\n{{\n")?;
    for entry in list.iter() {
        writeln!(
            w,
            "  {}={},",
            entry.name().const_name(&options.const_prefix),
            entry.id()
        )?;
    }
    writeln!(w, "  {}={}", options.max_const_name(), list.max())?;
    writeln!(w, "\n}};\n")?;
    writeln!(w, "#endif\n\n")
}

fn write_gperf<W: Write>(list: &TagList, options: &RenderOptions, w: &mut W) -> fmt::Result {
    write_banner(w, options, "/* ", " */")?;
    writeln!(w, "%{{")?;
    writeln!(w, "#include <string.h>")?;
    writeln!(w, "#include \"{}\"", options.header_name)?;
    writeln!(w, "%}}")?;
    writeln!(w, "%struct-type")?;
    writeln!(w, "%readonly-tables")?;
    writeln!(w, "%define lookup-function-name log_tag_lookup")?;
    writeln!(w, "struct log_tag_entry {{ const char *name; int id; }};")?;
    writeln!(w, "%%")?;
    for entry in list.iter() {
        writeln!(
            w,
            "{}, {}",
            entry.name(),
            entry.name().const_name(&options.const_prefix)
        )?;
    }
    writeln!(w, "%%")
}

struct RustRender<'a> {
    list: &'a TagList,
    options: &'a RenderOptions,
}

impl RustRender<'_> {
    fn write<W: Write>(&self, w: &mut W) -> fmt::Result {
        write_banner(w, self.options, "// ", "")?;
        writeln!(w)?;
        self.write_part_enum(
            w,
            "LogComponent",
            self.list.components().map(|s| (s, camel_ident(s))),
        )?;
        writeln!(w)?;
        self.write_part_enum(
            w,
            "LogCategory",
            self.list.categories().map(|s| (s, camel_ident(s))),
        )?;
        writeln!(w)?;
        self.write_tag_enum(w)?;
        writeln!(w)?;
        self.write_tag_consts(w)?;
        writeln!(w)?;
        self.write_tag_impl(w)
    }

    fn write_part_enum<'s, W, I>(&self, w: &mut W, ty: &str, parts: I) -> fmt::Result
    where
        W: Write,
        I: Iterator<Item = (&'s str, String)> + Clone,
    {
        let count = parts.clone().count();

        writeln!(
            w,
            "#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]"
        )?;
        writeln!(w, "pub enum {ty} {{")?;
        for (_, ident) in parts.clone() {
            writeln!(w, "    {ident},")?;
        }
        writeln!(w, "}}\n")?;

        writeln!(w, "impl {ty} {{")?;
        writeln!(w, "    pub const ALL: [{ty}; {count}] = [")?;
        for (_, ident) in parts.clone() {
            writeln!(w, "        {ty}::{ident},")?;
        }
        writeln!(w, "    ];\n")?;

        writeln!(w, "    pub const fn as_str(&self) -> &'static str {{")?;
        writeln!(w, "        match self {{")?;
        for (s, ident) in parts.clone() {
            writeln!(w, "            {ty}::{ident} => \"{s}\",")?;
        }
        writeln!(w, "        }}")?;
        writeln!(w, "    }}\n")?;

        writeln!(w, "    pub(crate) fn lookup(name: &str) -> Option<{ty}> {{")?;
        writeln!(w, "        match name {{")?;
        for (s, ident) in parts {
            writeln!(w, "            \"{s}\" => Some({ty}::{ident}),")?;
        }
        writeln!(w, "            _ => None,")?;
        writeln!(w, "        }}")?;
        writeln!(w, "    }}")?;
        writeln!(w, "}}")
    }

    fn write_tag_enum<W: Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(
            w,
            "#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]"
        )?;
        writeln!(w, "#[repr(u16)]")?;
        writeln!(w, "pub enum LogTag {{")?;
        for entry in self.list.iter() {
            writeln!(w, "    {} = {},", entry.name().variant_ident(), entry.id())?;
        }
        writeln!(w, "}}")
    }

    fn write_tag_consts<W: Write>(&self, w: &mut W) -> fmt::Result {
        for entry in self.list.iter() {
            writeln!(
                w,
                "pub const {}: u16 = {};",
                entry.name().const_name(&self.options.const_prefix),
                entry.id()
            )?;
        }
        writeln!(
            w,
            "pub const {}: u16 = {};",
            self.options.max_const_name(),
            self.list.max()
        )
    }

    fn write_tag_match<W, F>(&self, w: &mut W, sig: &str, arm: F) -> fmt::Result
    where
        W: Write,
        F: Fn(&TagEntry) -> String,
    {
        writeln!(w, "    {sig} {{")?;
        writeln!(w, "        match self {{")?;
        for entry in self.list.iter() {
            writeln!(
                w,
                "            LogTag::{} => {},",
                entry.name().variant_ident(),
                arm(entry)
            )?;
        }
        writeln!(w, "        }}")?;
        writeln!(w, "    }}")
    }

    fn write_tag_lookup<W, F>(&self, w: &mut W, fn_name: &str, key: F) -> fmt::Result
    where
        W: Write,
        F: Fn(&TagName) -> String,
    {
        writeln!(
            w,
            "    pub(crate) fn {fn_name}(name: &str) -> Option<LogTag> {{"
        )?;
        writeln!(w, "        match name {{")?;
        for entry in self.list.iter() {
            writeln!(
                w,
                "            \"{}\" => Some(LogTag::{}),",
                key(entry.name()),
                entry.name().variant_ident()
            )?;
        }
        writeln!(w, "            _ => None,")?;
        writeln!(w, "        }}")?;
        writeln!(w, "    }}")
    }

    fn write_tag_impl<W: Write>(&self, w: &mut W) -> fmt::Result {
        let list = self.list;
        let prefix = &self.options.const_prefix;

        writeln!(w, "impl LogTag {{")?;
        writeln!(w, "    pub const CONST_PREFIX: &str = \"{prefix}\";")?;
        writeln!(w, "    pub const COUNT: usize = {};", list.len())?;
        writeln!(w, "    pub const MAX: u16 = {};\n", list.max())?;

        writeln!(w, "    pub const ALL: [LogTag; {}] = [", list.len())?;
        for entry in list.iter() {
            writeln!(w, "        LogTag::{},", entry.name().variant_ident())?;
        }
        writeln!(w, "    ];\n")?;

        writeln!(w, "    pub const fn from_id(id: u16) -> Option<LogTag> {{")?;
        writeln!(w, "        match id {{")?;
        for entry in list.iter() {
            writeln!(
                w,
                "            {} => Some(LogTag::{}),",
                entry.id(),
                entry.name().variant_ident()
            )?;
        }
        writeln!(w, "            _ => None,")?;
        writeln!(w, "        }}")?;
        writeln!(w, "    }}\n")?;

        self.write_tag_match(w, "pub const fn as_str(&self) -> &'static str", |e| {
            format!("\"{}\"", e.name())
        })?;
        writeln!(w)?;
        self.write_tag_match(w, "pub const fn const_name(&self) -> &'static str", |e| {
            format!("\"{}\"", e.name().const_name(prefix))
        })?;
        writeln!(w)?;
        self.write_tag_match(w, "pub const fn component(&self) -> LogComponent", |e| {
            format!("LogComponent::{}", e.name().component_ident())
        })?;
        writeln!(w)?;
        self.write_tag_match(w, "pub const fn category(&self) -> LogCategory", |e| {
            format!("LogCategory::{}", e.name().category_ident())
        })?;
        writeln!(w)?;
        self.write_tag_lookup(w, "lookup_name", |n| n.dotted())?;
        writeln!(w)?;
        self.write_tag_lookup(w, "lookup_bare_const_name", |n| n.bare_const_name())?;
        writeln!(w, "}}")
    }
}
