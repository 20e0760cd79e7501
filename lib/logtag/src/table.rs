/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

include!(concat!(env!("OUT_DIR"), "/logtag_table.rs"));
