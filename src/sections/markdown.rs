//! Markdown fragments shared by the section renderers.

/// Uppercase the first character, leave the rest untouched.
///
/// This is not sentence case: nothing after the first character is
/// lowercased, so `NASA` stays `NASA` and `iOS users` becomes `IOS users`.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// ` * Item` lines, capitalized.
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!(" * {}\n", capitalize_first(item.as_ref())))
        .collect()
}

/// A GitHub-flavoured table with left-aligned, padded columns.
///
/// With no rows only the header and separator lines are produced.
pub fn github_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.replace('|', "\\|")).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |row: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format!(" {cell:<width$} ")
            })
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();

    let mut table = line(&header_cells);
    table.push_str(&format!("|{}|\n", separator.join("|")));
    for row in &cells {
        table.push_str(&line(row));
    }
    table
}

/// Centred, half-size `<img>` embed.
pub fn centered_image(src: &str, alt: &str) -> String {
    format!(
        "<p align=\"center\"><img src=\"{src}\" width=\"50%\" height=\"50%\" alt=\"{alt}\"></p>"
    )
}
