//! Error reports with source context

use crate::transforms::TransformError;

/// Format the source line holding `offset`, with a caret under the offending column
///
/// The line is numbered and marked with `>>`. An offset at or past the end of the source
/// points just after its last character.
pub fn format_source_context(source: &str, offset: usize) -> String {
    let offset = clamp_to_char_boundary(source, offset);
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    let line_num = source[..line_start].matches('\n').count() + 1;
    let column = source[line_start..offset].chars().count();

    format!(
        ">> {:3} | {}\n       | {}^\n",
        line_num,
        &source[line_start..line_end],
        " ".repeat(column)
    )
}

/// The error message followed by source context when the error carries an offset
pub fn report(source: &str, err: &TransformError) -> String {
    match err.offset() {
        Some(offset) => format!("Error: {}\n\n{}", err, format_source_context(source, offset)),
        None => format!("Error: {}\n", err),
    }
}

fn clamp_to_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
