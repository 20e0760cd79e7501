/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use fixedbitset::FixedBitSet;

use crate::{LogCategory, LogComponent, LogTag};

/// A set of log tags, one bit per tag id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogTagSet {
    bits: FixedBitSet,
}

impl Default for LogTagSet {
    fn default() -> Self {
        LogTagSet::empty()
    }
}

impl LogTagSet {
    pub fn empty() -> Self {
        LogTagSet {
            bits: FixedBitSet::with_capacity(LogTag::MAX as usize),
        }
    }

    pub fn all() -> Self {
        let mut set = LogTagSet::empty();
        set.bits.insert_range(1..LogTag::MAX as usize);
        set
    }

    /// Returns true if the tag was not in the set.
    pub fn insert(&mut self, tag: LogTag) -> bool {
        !self.bits.put(tag.index())
    }

    /// Returns true if the tag was in the set.
    pub fn remove(&mut self, tag: LogTag) -> bool {
        let present = self.contains(tag);
        self.bits.set(tag.index(), false);
        present
    }

    #[inline]
    pub fn contains(&self, tag: LogTag) -> bool {
        self.bits.contains(tag.index())
    }

    pub fn insert_component(&mut self, component: LogComponent) {
        for tag in component.tags() {
            self.bits.insert(tag.index());
        }
    }

    pub fn insert_category(&mut self, category: LogCategory) {
        for tag in category.tags() {
            self.bits.insert(tag.index());
        }
    }

    pub fn union_with(&mut self, other: &LogTagSet) {
        self.bits.union_with(&other.bits);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.ones().next().is_none()
    }

    /// Tags in the set, in id order.
    pub fn iter(&self) -> impl Iterator<Item = LogTag> + '_ {
        self.bits
            .ones()
            .filter_map(|i| u16::try_from(i).ok().and_then(LogTag::from_id))
    }
}

impl FromIterator<LogTag> for LogTagSet {
    fn from_iter<I: IntoIterator<Item = LogTag>>(iter: I) -> Self {
        let mut set = LogTagSet::empty();
        set.extend(iter);
        set
    }
}

impl Extend<LogTag> for LogTagSet {
    fn extend<I: IntoIterator<Item = LogTag>>(&mut self, iter: I) {
        for tag in iter {
            self.bits.insert(tag.index());
        }
    }
}
