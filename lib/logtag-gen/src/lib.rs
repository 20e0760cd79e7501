/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

//! Generator for the log tag table.
//!
//! Reads the canonical ordered list of tag names, assigns 1-based sequential
//! ids and renders the table as a rust module, a C header or a gperf keyword
//! file. The bound is always `count + 1`.

mod error;
pub use error::{InvalidIdentError, TagListError};

mod name;
pub use name::{TagName, TagNameError};

mod list;
pub use list::{MAX_TAG_COUNT, TagEntry, TagList};

mod render;
pub use render::{OutputFormat, RenderOptions, render, render_to};

#[cfg(feature = "yaml")]
mod config;
#[cfg(feature = "yaml")]
pub use config::{GenerateConfig, OutputTarget};
