//! Block-letter font for the hero banner.

/// Height of every glyph in lines.
pub const GLYPH_HEIGHT: usize = 5;

/// Blank columns between two glyphs.
const LETTER_SPACING: usize = 1;

/// Filled pixel.
const BLOCK: char = '█';

/// Glyph rows, `#` marking filled pixels.
///
/// Letters are case-insensitive; characters without a glyph render as a
/// space.
pub fn glyph(ch: char) -> [&'static str; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ####", "#    ", "#    ", "#    ", " ####"],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#### ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#### ", "#    ", "#    "],
        'G' => [" ####", "#    ", "#  ##", "#   #", " ####"],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["###", " # ", " # ", " # ", "###"],
        'J' => ["  ###", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],
        '0' => [" ### ", "#  ##", "# # #", "##  #", " ### "],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => [" ### ", "#   #", "  ## ", " #   ", "#####"],
        '3' => ["#### ", "    #", " ### ", "    #", "#### "],
        '4' => ["#   #", "#   #", "#####", "    #", "    #"],
        '5' => ["#####", "#    ", "#### ", "    #", "#### "],
        '6' => [" ### ", "#    ", "#### ", "#   #", " ### "],
        '7' => ["#####", "   # ", "  #  ", " #   ", " #   "],
        '8' => [" ### ", "#   #", " ### ", "#   #", " ### "],
        '9' => [" ### ", "#   #", " ####", "    #", " ### "],
        '-' => ["    ", "    ", "####", "    ", "    "],
        '.' => ["  ", "  ", "  ", "  ", "# "],
        '!' => ["#", "#", "#", " ", "#"],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}

/// Width of a glyph in columns.
fn glyph_width(ch: char) -> usize {
    glyph(ch)[0].chars().count()
}

/// Width of `text` once rendered, including letter spacing.
pub fn banner_width(text: &str) -> usize {
    let glyphs: usize = text.chars().map(glyph_width).sum();
    let gaps = text.chars().count().saturating_sub(1) * LETTER_SPACING;
    glyphs + gaps
}

/// Build the banner art for `text`.
///
/// # Returns
/// A vector of [`GLYPH_HEIGHT`] strings, each one line of the art. All
/// lines have the same width, [`banner_width`] characters.
pub fn build_banner_art(text: &str) -> Vec<String> {
    let mut lines = vec![String::new(); GLYPH_HEIGHT];

    for (i, ch) in text.chars().enumerate() {
        let rows = glyph(ch);
        for (line, row) in lines.iter_mut().zip(rows) {
            if i > 0 {
                line.extend(std::iter::repeat_n(' ', LETTER_SPACING));
            }
            line.extend(row.chars().map(|c| if c == '#' { BLOCK } else { ' ' }));
        }
    }

    lines
}
