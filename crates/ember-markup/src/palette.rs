//! Registry and style table kept in step
//!
//! Every color change goes through [`Palette`] so the derived styles never
//! go stale.

use crate::color::{is_reserved, Color, ColorRegistry};
use crate::style::{ConcreteStyle, Font, Style, StyleKey, StyleTable};
use crate::MarkupError;

#[derive(Debug, Clone)]
pub struct Palette {
    registry: ColorRegistry,
    styles: StyleTable,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorRegistry::with_default_palette(), Font::default())
    }
}

impl Palette {
    pub fn new(registry: ColorRegistry, font: Font) -> Self {
        let styles = StyleTable::from_registry(&registry, font);
        Self { registry, styles }
    }

    pub fn registry(&self) -> &ColorRegistry {
        &self.registry
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Register a color and derive its styles
    pub fn add_color(&mut self, code: char, color: Color) -> Result<Option<Color>, MarkupError> {
        let old = self.registry.add(code, color)?;
        self.styles.regenerate_for(code, &self.registry);
        Ok(old)
    }

    /// Unregister a code and drop its styles
    pub fn remove_color(&mut self, code: char) -> Option<Color> {
        let removed = self.registry.remove(code)?;
        self.styles.remove_code(code);
        Some(removed)
    }

    /// Unregister whichever code holds `color`
    pub fn remove_color_value(&mut self, color: Color) -> Option<char> {
        let code = self.registry.remove_color(color)?;
        self.styles.remove_code(code);
        Some(code)
    }

    /// Change the color of an existing code. Returns `false` if the code is
    /// not registered.
    pub fn update_color(&mut self, code: char, color: Color) -> Result<bool, MarkupError> {
        if !self.registry.contains(code) {
            return Ok(false);
        }
        self.add_color(code, color)?;
        Ok(true)
    }

    /// Register `color` under `new_code` instead of its current code.
    ///
    /// Returns the code it moved from, or `None` if no code holds `color`.
    /// A color already under `new_code` is replaced.
    pub fn move_color(&mut self, color: Color, new_code: char) -> Result<Option<char>, MarkupError> {
        let Some(old) = self.registry.code_for(color) else {
            return Ok(None);
        };
        if is_reserved(new_code) {
            return Err(MarkupError::ReservedCode(new_code));
        }

        self.remove_color(old);
        self.add_color(new_code, color)?;
        Ok(Some(old))
    }

    pub fn clear(&mut self) {
        self.registry.clear();
        self.styles.clear();
    }

    pub fn set_font(&mut self, font: Font) {
        self.styles.set_font(font);
    }

    /// Turn a buffer style into something paintable.
    ///
    /// SGR channels left at their default paint with `default`; code styles
    /// that are not fully registered fall back to `previous`. SGR intensity
    /// is already part of the chosen color.
    pub fn resolve(
        &self,
        style: &Style,
        default: StyleKey,
        previous: Option<&ConcreteStyle>,
    ) -> ConcreteStyle {
        match style {
            Style::Dc(key) => self.styles.resolve(*key, previous, &self.registry),
            Style::Ansi(attrs) => {
                let base = self.styles.resolve(default, previous, &self.registry);
                ConcreteStyle {
                    font: base.font,
                    fg: attrs.fg.unwrap_or(base.fg),
                    bg: attrs.bg.unwrap_or(base.bg),
                }
            }
        }
    }
}
