/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::env;
use std::fs;
use std::path::PathBuf;

use logtag_gen::{OutputFormat, RenderOptions, TagList};

const TAG_LIST_FILE: &str = "logtags.list";
const TABLE_FILE: &str = "logtag_table.rs";

fn main() {
    println!("cargo:rerun-if-changed={TAG_LIST_FILE}");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let content = fs::read_to_string(manifest_dir.join(TAG_LIST_FILE)).unwrap();
    let list = match TagList::parse(&content) {
        Ok(list) => list,
        Err(e) => panic!("invalid {TAG_LIST_FILE}: {e}"),
    };

    let table = logtag_gen::render(&list, OutputFormat::Rust, &RenderOptions::default());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join(TABLE_FILE), table).unwrap();
}
