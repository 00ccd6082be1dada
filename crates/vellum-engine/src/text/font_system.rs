use std::collections::HashMap;

use thiserror::Error;

use crate::coords::{Rect, Vec2};

use super::shaper::{self, GlyphRun, TextStyle};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone, Error)]
#[error("font `{name}` could not be parsed: {reason}")]
pub struct FontLoadError {
    pub name: String,
    pub reason: String,
}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of named, parsed fonts.
///
/// Fonts are immutable after loading, so a built system can be shared
/// read-only between concurrent renders.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    by_name: HashMap<String, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font under `name`.
    ///
    /// Loading a name twice replaces the earlier font; the returned id stays
    /// the same.
    pub fn load_font(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let name = name.into();
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError { name: name.clone(), reason: e.to_string() })?;

        if let Some(&id) = self.by_name.get(&name) {
            self.fonts[id.0] = font;
            log::debug!("font `{name}` replaced");
            return Ok(id);
        }

        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("font `{name}` loaded as {id:?}");
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Looks a font up by the name it was loaded under.
    #[inline]
    pub fn id(&self, name: &str) -> Option<FontId> {
        self.by_name.get(name).copied()
    }

    /// The only loaded font, if exactly one is loaded.
    #[inline]
    pub fn sole(&self) -> Option<FontId> {
        (self.fonts.len() == 1).then_some(FontId(0))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Names of all loaded fonts, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    #[inline]
    pub fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Positions `text` inside `block`, lazily. `None` if `id` is unknown.
    pub fn shape<'a>(
        &'a self,
        id: FontId,
        text: &'a str,
        style: TextStyle,
        block: Rect,
    ) -> Option<GlyphRun<'a>> {
        self.get(id).map(|font| GlyphRun::new(font, text, style, block))
    }

    /// Size of the unwrapped text block: widest line by line count × line height.
    ///
    /// Returns `None` if `id` is unknown.
    #[must_use]
    pub fn measure(&self, id: FontId, text: &str, style: TextStyle) -> Option<Vec2> {
        let font = self.get(id)?;
        Some(shaper::measure(font, text, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected_with_the_font_name() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font("Broken", &[0, 1, 2, 3]).unwrap_err();
        assert_eq!(err.name, "Broken");
        assert!(fonts.is_empty());
        assert!(fonts.id("Broken").is_none());
    }

    #[test]
    fn empty_system_has_no_sole_font() {
        let fonts = FontSystem::new();
        assert!(fonts.sole().is_none());
        assert!(fonts.names().is_empty());
    }

    #[test]
    fn system_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FontSystem>();
    }
}
