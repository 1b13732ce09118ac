/// Palette the UI cycles through; order matters for [`tag_color`].
pub const TAG_PALETTE: [&str; 14] = [
    "red", "orange", "amber", "green", "emerald", "teal", "cyan", "blue", "indigo", "violet",
    "purple", "fuchsia", "pink", "rose",
];

/// Split the form's free-text tag field on both comma variants, trimming
/// and discarding empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split([',', '，'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Deterministic tag to palette mapping, stable across processes.
pub fn tag_color(tag: &str) -> &'static str {
    TAG_PALETTE[tag_palette_index(tag)]
}

/// 31-based rolling hash over UTF-16 code units, reduced into the palette.
pub fn tag_palette_index(tag: &str) -> usize {
    if tag.is_empty() {
        return 0;
    }
    let mut hash: i32 = 0;
    for unit in tag.encode_utf16() {
        hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    hash.unsigned_abs() as usize % TAG_PALETTE.len()
}
