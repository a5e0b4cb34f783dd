//! Language and text resources that ship alongside bitmap fonts
//!
//! Bitmap targets store their UI strings next to the glyphs, one table per
//! language. The backend answers text lookups against whichever language is
//! current.

use std::collections::HashMap;

use uifont_core::types::{CodePoint, LangTextParam, TextParam, WildcardStaticType};

/// One text resource in one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEntry {
    pub utf8: String,
    pub param: TextParam,
    pub wildcard_first: Option<String>,
    pub wildcard_second: Option<String>,
}

impl TextEntry {
    pub fn new(utf8: impl Into<String>, param: TextParam) -> Self {
        Self {
            utf8: utf8.into(),
            param,
            ..Default::default()
        }
    }

    pub fn with_wildcard(mut self, kind: WildcardStaticType, value: impl Into<String>) -> Self {
        match kind {
            WildcardStaticType::First => self.wildcard_first = Some(value.into()),
            WildcardStaticType::Second => self.wildcard_second = Some(value.into()),
        }
        self
    }

    pub fn wildcard(&self, kind: WildcardStaticType) -> Option<&str> {
        match kind {
            WildcardStaticType::First => self.wildcard_first.as_deref(),
            WildcardStaticType::Second => self.wildcard_second.as_deref(),
        }
    }

    pub fn code_points(&self) -> Vec<CodePoint> {
        self.utf8.chars().map(|ch| ch as CodePoint).collect()
    }
}

/// Text resources for every installed language
#[derive(Debug, Default)]
pub struct TextTable {
    langs: HashMap<u8, LangTextParam>,
    texts: HashMap<(u8, u16), TextEntry>,
}

impl TextTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the defaults of a language
    pub fn set_lang_param(&mut self, lang_id: u8, param: LangTextParam) {
        self.langs.insert(lang_id, param);
    }

    pub fn has_lang(&self, lang_id: u8) -> bool {
        self.langs.contains_key(&lang_id)
    }

    pub fn lang_param(&self, lang_id: u8) -> Option<LangTextParam> {
        self.langs.get(&lang_id).copied()
    }

    pub fn insert_text(&mut self, lang_id: u8, text_id: u16, entry: TextEntry) {
        self.texts.insert((lang_id, text_id), entry);
    }

    pub fn text(&self, lang_id: u8, text_id: u16) -> Option<&TextEntry> {
        self.texts.get(&(lang_id, text_id))
    }
}
