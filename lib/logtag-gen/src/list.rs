/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};

use crate::{TagListError, TagName};

/// Max number of tags, so that both the last id and the bound fit in u16.
pub const MAX_TAG_COUNT: usize = u16::MAX as usize - 1;

// generated associated items, and the only keyword a camel case ident can hit
const RESERVED_IDENTS: &[&str] = &["ALL", "COUNT", "MAX", "Self"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagEntry {
    id: u16,
    name: TagName,
    line: usize,
}

impl TagEntry {
    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &TagName {
        &self.name
    }

    /// 1-based line number in the source list.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }
}

#[derive(Default)]
struct IdentRegistry {
    seen: HashMap<String, (String, usize, String)>,
}

impl IdentRegistry {
    /// `key` identifies the owner of the identifier, so repeated owners are fine.
    fn register(
        &mut self,
        ident: String,
        key: &str,
        name: &TagName,
        line: usize,
    ) -> Result<(), TagListError> {
        if RESERVED_IDENTS.contains(&ident.as_str()) {
            return Err(TagListError::ReservedIdent {
                line,
                name: name.dotted(),
                ident,
            });
        }
        match self.seen.entry(ident) {
            Entry::Occupied(o) => {
                let (other_key, other_line, other) = o.get();
                if other_key == key {
                    Ok(())
                } else {
                    Err(TagListError::IdentCollision {
                        line,
                        name: name.dotted(),
                        ident: o.key().clone(),
                        other: other.clone(),
                        other_line: *other_line,
                    })
                }
            }
            Entry::Vacant(v) => {
                v.insert((key.to_string(), line, name.dotted()));
                Ok(())
            }
        }
    }
}

#[derive(Default)]
struct TagListBuilder {
    entries: Vec<TagEntry>,
    names: IndexMap<String, usize>,
    components: IndexSet<String>,
    categories: IndexSet<String>,
    variant_idents: IdentRegistry,
    const_names: IdentRegistry,
    component_idents: IdentRegistry,
    category_idents: IdentRegistry,
}

impl TagListBuilder {
    fn push(&mut self, line: usize, s: &str) -> Result<(), TagListError> {
        let name = TagName::from_str(s).map_err(|source| TagListError::InvalidName {
            line,
            name: s.to_string(),
            source,
        })?;

        let dotted = name.dotted();
        if let Some(index) = self.names.get(&dotted) {
            return Err(TagListError::DuplicateName {
                line,
                name: dotted,
                first_line: self.entries[*index].line,
            });
        }
        if self.entries.len() >= MAX_TAG_COUNT {
            return Err(TagListError::TooMany {
                line,
                max: MAX_TAG_COUNT,
            });
        }

        self.variant_idents
            .register(name.variant_ident(), &dotted, &name, line)?;
        self.const_names
            .register(name.bare_const_name(), &dotted, &name, line)?;
        self.component_idents
            .register(name.component_ident(), name.component(), &name, line)?;
        self.category_idents
            .register(name.category_ident(), name.category(), &name, line)?;

        // the count is bounded by MAX_TAG_COUNT above
        let id = (self.entries.len() + 1) as u16;
        self.components.insert(name.component().to_string());
        self.categories.insert(name.category().to_string());
        self.names.insert(dotted, self.entries.len());
        self.entries.push(TagEntry { id, name, line });
        Ok(())
    }

    fn build(self) -> Result<TagList, TagListError> {
        if self.entries.is_empty() {
            return Err(TagListError::Empty);
        }
        Ok(TagList {
            entries: self.entries,
            names: self.names,
            components: self.components,
            categories: self.categories,
        })
    }
}

/// An ordered list of tags with 1-based sequential ids assigned.
#[derive(Clone, Debug)]
pub struct TagList {
    entries: Vec<TagEntry>,
    names: IndexMap<String, usize>,
    components: IndexSet<String>,
    categories: IndexSet<String>,
}

impl TagList {
    /// Parse the content of a canonical list file.
    ///
    /// One `<component>.<category>` name per line. Blank lines are skipped and
    /// everything after a `#` is a comment.
    pub fn parse(content: &str) -> Result<Self, TagListError> {
        let mut builder = TagListBuilder::default();
        for (i, raw) in content.lines().enumerate() {
            let line = match raw.find('#') {
                Some(p) => &raw[..p],
                None => raw,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            builder.push(i + 1, line)?;
        }
        builder.build()
    }

    /// Build from names in order, with the position used as line number.
    pub fn from_names<I, S>(names: I) -> Result<Self, TagListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = TagListBuilder::default();
        for (i, name) in names.into_iter().enumerate() {
            builder.push(i + 1, name.as_ref().trim())?;
        }
        builder.build()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One past the highest id.
    #[inline]
    pub fn max(&self) -> u16 {
        // never exceeds u16::MAX as the count is bounded by MAX_TAG_COUNT
        (self.entries.len() + 1) as u16
    }

    #[inline]
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: u16) -> Option<&TagEntry> {
        let index = usize::from(id).checked_sub(1)?;
        self.entries.get(index)
    }

    pub fn find(&self, dotted: &str) -> Option<&TagEntry> {
        self.names.get(dotted).map(|i| &self.entries[*i])
    }

    /// Distinct components, in order of first appearance.
    pub fn components(&self) -> impl Iterator<Item = &str> + Clone {
        self.components.iter().map(|s| s.as_str())
    }

    /// Distinct categories, in order of first appearance.
    pub fn categories(&self) -> impl Iterator<Item = &str> + Clone {
        self.categories.iter().map(|s| s.as_str())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids() {
        let list = TagList::parse(
            "# leading comment\n\
             core.accounting\n\
             \n\
             core.debug   # trailing comment\n\
             \tftp.debug\n",
        )
        .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.max(), 4);

        let ids: Vec<u16> = list.iter().map(|e| e.id()).collect();
        assert_eq!(ids, [1, 2, 3]);

        let debug = list.find("core.debug").unwrap();
        assert_eq!(debug.id(), 2);
        assert_eq!(debug.line(), 4);

        assert_eq!(list.get(3).unwrap().name().dotted(), "ftp.debug");
        assert!(list.get(0).is_none());
        assert!(list.get(4).is_none());

        let components: Vec<&str> = list.components().collect();
        assert_eq!(components, ["core", "ftp"]);
        let categories: Vec<&str> = list.categories().collect();
        assert_eq!(categories, ["accounting", "debug"]);
    }

    #[test]
    fn empty() {
        let e = TagList::parse("# nothing\n\n").unwrap_err();
        assert!(matches!(e, TagListError::Empty));
        assert_eq!(e.line(), None);
    }

    #[test]
    fn duplicate() {
        let e = TagList::parse("core.debug\nftp.debug\ncore.debug\n").unwrap_err();
        match e {
            TagListError::DuplicateName {
                line,
                name,
                first_line,
            } => {
                assert_eq!(line, 3);
                assert_eq!(name, "core.debug");
                assert_eq!(first_line, 1);
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn invalid_name() {
        let e = TagList::parse("core.debug\nCORE_ERROR\n").unwrap_err();
        assert!(matches!(e, TagListError::InvalidName { line: 2, .. }));
    }

    #[test]
    fn ident_collision() {
        let e = TagList::from_names(["core_x.debug", "core.x_debug"]).unwrap_err();
        match e {
            TagListError::IdentCollision {
                line,
                ident,
                other,
                other_line,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(ident, "CoreXDebug");
                assert_eq!(other, "core_x.debug");
                assert_eq!(other_line, 1);
            }
            e => panic!("unexpected error {e}"),
        }

        let e = TagList::from_names(["x_1.debug", "x1.error"]).unwrap_err();
        assert!(matches!(e, TagListError::IdentCollision { line: 2, .. }));
    }

    #[test]
    fn reserved_ident() {
        let e = TagList::from_names(["m.a_x"]).unwrap_err();
        assert!(matches!(e, TagListError::ReservedIdent { line: 1, .. }));

        let e = TagList::from_names(["core.debug", "self.debug"]).unwrap_err();
        match e {
            TagListError::ReservedIdent { line, name, ident } => {
                assert_eq!(line, 2);
                assert_eq!(name, "self.debug");
                assert_eq!(ident, "Self");
            }
            e => panic!("unexpected error {e}"),
        }

        let e = TagList::from_names(["core.debug", "core.self"]).unwrap_err();
        assert!(matches!(e, TagListError::ReservedIdent { line: 2, .. }));

        let list = TagList::from_names(["selfish.debug", "core.self_check"]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn too_many() {
        let names = (0..=MAX_TAG_COUNT).map(|i| format!("c{i}.debug"));
        let e = TagList::from_names(names).unwrap_err();
        match e {
            TagListError::TooMany { line, max } => {
                assert_eq!(line, MAX_TAG_COUNT + 1);
                assert_eq!(max, MAX_TAG_COUNT);
            }
            e => panic!("unexpected error {e}"),
        }

        let names = (0..MAX_TAG_COUNT).map(|i| format!("c{i}.debug"));
        let list = TagList::from_names(names).unwrap();
        assert_eq!(list.max(), u16::MAX);
    }

    #[test]
    fn plural_kept_distinct() {
        let list = TagList::from_names(["telnet.violation", "telnet.violations"]).unwrap();
        assert_eq!(list.find("telnet.violation").unwrap().id(), 1);
        assert_eq!(list.find("telnet.violations").unwrap().id(), 2);
    }
}
