/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::ops::{Index, IndexMut};

use crate::LogTag;

/// A value for every log tag, stored in a fixed array.
///
/// Tag `id` lives in slot `id - 1`, so the array has [`LogTag::COUNT`] slots
/// instead of the `MAX` sized C array with an unused slot 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogTagMap<T> {
    slots: [T; LogTag::COUNT],
}

#[inline]
const fn slot(tag: LogTag) -> usize {
    tag.index() - 1
}

impl<T: Clone> LogTagMap<T> {
    pub fn new(value: T) -> Self {
        LogTagMap {
            slots: std::array::from_fn(|_| value.clone()),
        }
    }
}

impl<T: Default> Default for LogTagMap<T> {
    fn default() -> Self {
        LogTagMap::from_fn(|_| T::default())
    }
}

impl<T> LogTagMap<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(LogTag) -> T,
    {
        LogTagMap {
            slots: std::array::from_fn(|i| f(LogTag::ALL[i])),
        }
    }

    #[inline]
    pub fn get(&self, tag: LogTag) -> &T {
        &self.slots[slot(tag)]
    }

    #[inline]
    pub fn get_mut(&mut self, tag: LogTag) -> &mut T {
        &mut self.slots[slot(tag)]
    }

    /// Set the value for `tag` and return the previous one.
    pub fn set(&mut self, tag: LogTag, value: T) -> T {
        std::mem::replace(self.get_mut(tag), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogTag, &T)> {
        LogTag::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LogTag, &mut T)> {
        LogTag::ALL.into_iter().zip(self.slots.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }
}

impl<T> Index<LogTag> for LogTagMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, tag: LogTag) -> &Self::Output {
        self.get(tag)
    }
}

impl<T> IndexMut<LogTag> for LogTagMap<T> {
    #[inline]
    fn index_mut(&mut self, tag: LogTag) -> &mut Self::Output {
        self.get_mut(tag)
    }
}
