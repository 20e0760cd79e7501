/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

//! Log tags of the proxy, one per kind of log message of each component.
//!
//! The table is generated at build time from `logtags.list`. Every tag has a
//! `LOGTAG_<COMPONENT>_<CATEGORY>` constant and a [`LogTag`] variant sharing
//! the same id. Ids are dense from 1 and [`LOGTAG_MAX`] is one past the last
//! id. Ids are only stable within one build of the list.

mod table;
pub use table::*;

mod tag;
pub use tag::{InvalidLogTagId, LogTagParseError};

mod part;

mod map;
pub use map::LogTagMap;

mod set;
pub use set::LogTagSet;

#[cfg(feature = "slog")]
mod slog_value;
#[cfg(feature = "slog")]
pub use slog_value::LtLogTagId;

#[cfg(feature = "yaml")]
pub mod yaml;
