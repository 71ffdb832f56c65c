use ahash::RandomState;
use smol_str::SmolStr;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::rc::{Rc, Weak};

use crate::lua_value::LuaString;

/// String interner - equal content always yields the same `Rc<LuaString>`
/// - the hash is computed once here (ahash) and cached in the string
/// - identity equality of interned strings is content equality
/// - entries are weak; dead strings are pruned by `remove_dead`
pub struct StringInterner {
    // Content hash -> strings with that hash
    map: HashMap<u64, Vec<Weak<LuaString>>, RandomState>,

    hashbuilder: RandomState,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(64, RandomState::new()),
            hashbuilder: RandomState::new(),
        }
    }

    pub fn intern(&mut self, s: &str) -> Rc<LuaString> {
        let hash = self.hashbuilder.hash_one(s);
        let bucket = self.map.entry(hash).or_default();

        for weak in bucket.iter() {
            if let Some(existing) = weak.upgrade() {
                if existing.as_str() == s {
                    return existing;
                }
            }
        }

        let created = Rc::new(LuaString::with_hash(SmolStr::new(s), hash));
        bucket.push(Rc::downgrade(&created));
        created
    }

    /// Hash an arbitrary word with the interner's hasher (userdata seeds)
    #[inline]
    pub fn hash_word(&self, word: u64) -> u64 {
        self.hashbuilder.hash_one(word)
    }

    /// Drop entries whose strings are gone; returns how many were removed
    pub fn remove_dead(&mut self) -> usize {
        let mut removed = 0;
        self.map.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|weak| weak.strong_count() > 0);
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        removed
    }

    /// Number of live interned strings
    pub fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|bucket| bucket.iter())
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
