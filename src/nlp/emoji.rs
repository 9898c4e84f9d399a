//! Emoji to text conversion

use unicode_segmentation::UnicodeSegmentation;

/// Replace each emoji with its name in `:snake_case:` form
///
/// "Gold 🏅!" becomes "Gold :sports_medal:!". Text without emoji is returned
/// unchanged.
pub fn demojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        match emojis::get(grapheme) {
            Some(emoji) => {
                out.push(':');
                out.push_str(&shortcode(emoji.name()));
                out.push(':');
            }
            None => out.push_str(grapheme),
        }
    }
    out
}

/// "flag: France" -> "flag_france"
fn shortcode(name: &str) -> String {
    let mut code = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            code.extend(c.to_lowercase());
        } else if !code.ends_with('_') && !code.is_empty() {
            code.push('_');
        }
    }
    code.trim_end_matches('_').to_string()
}
