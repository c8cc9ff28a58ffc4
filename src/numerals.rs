//! Arabic-Indic digit rendering.

#[cfg(test)]
#[path = "numerals_test.rs"]
mod numerals_test;

use std::fmt::Display;

/// ٠ through ٩, indexed by ASCII digit value.
pub const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Render `value` with every ASCII digit swapped for its Arabic-Indic glyph.
/// Signs, separators and letters are kept in place.
#[must_use]
pub fn to_arabic_numbers(value: impl Display) -> String {
    value
        .to_string()
        .chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            let offset = u32::from(c) - u32::from('0');
            usize::try_from(offset).map_or(c, |i| ARABIC_INDIC_DIGITS[i])
        })
        .collect()
}
