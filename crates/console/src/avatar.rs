//! Name-derived avatar badges for the list view.
//!
//! The web UI colored each avatar from a hash of the person's name so
//! the same person always gets the same color. The console renders the
//! same thing as a truecolor ANSI cell with the person's initials.

/// Hash a name to a stable RGB color.
///
/// Same scheme as the web UI: `hash = ch + hash * 31` over the
/// characters, then one color byte per 8-bit slice of the hash.
pub fn name_color(name: &str) -> (u8, u8, u8) {
    let mut hash: i32 = 0;
    for ch in name.chars() {
        hash = (ch as i32).wrapping_add((hash << 5).wrapping_sub(hash));
    }
    let r = (hash & 0xff) as u8;
    let g = ((hash >> 8) & 0xff) as u8;
    let b = ((hash >> 16) & 0xff) as u8;
    (r, g, b)
}

/// Up-to-two-letter initials: first letter of the first two words,
/// case preserved.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect()
}

/// ANSI badge: initials on the name's background color.
pub fn badge(name: &str) -> String {
    let (r, g, b) = name_color(name);
    // Pick black or white text by background luma.
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    let fg = if luma > 128.0 { "30" } else { "97" };
    format!("\x1b[{fg};48;2;{r};{g};{b}m {} \x1b[0m", initials(name))
}
