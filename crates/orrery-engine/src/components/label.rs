//! Billboard text labels.
//!
//! Label strings are interned once into a `LabelTable`; entities carry only
//! the numeric id, so the per-frame wire format stays plain floats. The
//! browser fetches the table once and draws `text_id` at the projected
//! position every frame.

use crate::components::mesh::SDFColor;

/// Index into the `LabelTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelComponent {
    pub text: LabelId,
    /// Glyph height in world units (before group scale).
    pub font_size: f32,
    pub color: SDFColor,
    pub opacity: f32,
}

impl LabelComponent {
    pub fn new(text: LabelId, font_size: f32, color: SDFColor) -> Self {
        Self {
            text,
            font_size,
            color,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Interned label strings.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    texts: Vec<String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, reusing an existing id for repeated strings.
    /// Blank text yields `None`: callers omit the label entirely.
    pub fn intern(&mut self, text: &str) -> Option<LabelId> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(idx) = self.texts.iter().position(|t| t == text) {
            return Some(LabelId(idx as u32));
        }
        self.texts.push(text.to_owned());
        Some(LabelId(self.texts.len() as u32 - 1))
    }

    pub fn get(&self, id: LabelId) -> Option<&str> {
        self.texts.get(id.0 as usize).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_dedupes() {
        let mut table = LabelTable::new();
        let a = table.intern("Earth").unwrap();
        let b = table.intern("Mars").unwrap();
        let c = table.intern("Earth").unwrap();
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b), Some("Mars"));
    }

    #[test]
    fn blank_text_is_omitted() {
        let mut table = LabelTable::new();
        assert!(table.intern("").is_none());
        assert!(table.intern("   ").is_none());
        assert!(table.is_empty());
    }
}
