//! The native line-oriented drawing format.
//!
//! ```text
//! line 10 10 50 50 k
//! start
//! line 10 10 50 50 k
//! rectangle 60 60 100 100 r rounded
//! end
//! ```
//!
//! A bare shape line is a group of one; `start`/`end` wrap a group of
//! several. Colors are single-letter codes.

use super::{StorageError, StorageResult};
use crate::canvas::Document;
use crate::shapes::{CornerStyle, Group, Line, Rectangle, Shape, ShapeKind};
use std::fmt::Write as _;

const GROUP_START: &str = "start";
const GROUP_END: &str = "end";

/// Color names and hex spellings for each code.
const COLOR_CODES: &[(char, &str, &[&str])] = &[
    ('r', "red", &["#ff0000", "#f00"]),
    ('g', "green", &["#00ff00", "#0f0", "#008000"]),
    ('b', "blue", &["#0000ff", "#00f"]),
    ('k', "black", &["#000000", "#000"]),
];

/// Code for a color, matched case-insensitively by name or hex value.
pub fn color_code(color: &str) -> Option<char> {
    let color = color.trim().to_ascii_lowercase();
    COLOR_CODES
        .iter()
        .find(|(_, name, hex)| *name == color || hex.contains(&color.as_str()))
        .map(|(code, _, _)| *code)
}

/// Color name for a code.
pub fn color_name(code: char) -> Option<&'static str> {
    COLOR_CODES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

/// Render a document in the native format.
///
/// Fails without producing output if any shape has a color with no code.
pub fn to_text(document: &Document) -> StorageResult<String> {
    let mut out = String::new();
    for group in document.groups() {
        if group.is_singleton() {
            write_shape(&mut out, &group.shapes()[0])?;
        } else {
            out.push_str(GROUP_START);
            out.push('\n');
            for shape in group.shapes() {
                write_shape(&mut out, shape)?;
            }
            out.push_str(GROUP_END);
            out.push('\n');
        }
    }
    Ok(out)
}

fn write_shape(out: &mut String, shape: &Shape) -> StorageResult<()> {
    let code = color_code(shape.color())
        .ok_or_else(|| StorageError::UnsupportedColor(shape.color().to_string()))?;
    let (x0, y0, x1, y1) = shape.coords();
    // Writing to a String cannot fail.
    let _ = write!(out, "{} {x0} {y0} {x1} {y1} {code}", shape.kind());
    if let Some(style) = shape.corner_style() {
        let _ = write!(out, " {style}");
    }
    out.push('\n');
    Ok(())
}

/// Parse a document from the native format.
///
/// Every bare shape line becomes its own singleton group. Blank lines are
/// skipped. Any malformed line aborts the whole parse.
pub fn from_text(text: &str) -> StorageResult<Document> {
    let mut document = Document::new();
    // Open block: line number of its `start` and the shapes read so far.
    let mut open: Option<(usize, Vec<Shape>)> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            GROUP_START => {
                if open.is_some() {
                    return Err(parse_error(line_no, raw, "nested \"start\""));
                }
                open = Some((line_no, Vec::new()));
            }
            GROUP_END => {
                let (_, shapes) = open
                    .take()
                    .ok_or_else(|| parse_error(line_no, raw, "\"end\" without \"start\""))?;
                let group = Group::new(shapes)
                    .ok_or_else(|| parse_error(line_no, raw, "group has no shapes"))?;
                document.push_group(group);
            }
            _ => {
                let shape = parse_shape(line_no, raw)?;
                match open.as_mut() {
                    Some((_, shapes)) => shapes.push(shape),
                    None => {
                        document.push_shape(shape);
                    }
                }
            }
        }
    }

    if let Some((start_line, _)) = open {
        return Err(parse_error(start_line, GROUP_START, "group is never closed"));
    }
    Ok(document)
}

/// Parse a document from raw file bytes. Invalid UTF-8 is a parse error on
/// the line holding the first bad byte.
pub fn from_bytes(bytes: &[u8]) -> StorageResult<Document> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        let start = valid.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        let end = bytes[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| start + i);
        parse_error(line, &String::from_utf8_lossy(&bytes[start..end]), "invalid UTF-8")
    })?;
    from_text(text)
}

fn parse_shape(line_no: usize, raw: &str) -> StorageResult<Shape> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    if !(6..=7).contains(&fields.len()) {
        return Err(parse_error(
            line_no,
            raw,
            &format!("expected 6 or 7 fields, found {}", fields.len()),
        ));
    }

    let kind: ShapeKind = fields[0]
        .parse()
        .map_err(|e: String| parse_error(line_no, raw, &e))?;

    let mut coords = [0i32; 4];
    for (slot, field) in coords.iter_mut().zip(&fields[1..5]) {
        *slot = field
            .parse()
            .map_err(|_| parse_error(line_no, raw, &format!("invalid coordinate {field:?}")))?;
    }
    let [x0, y0, x1, y1] = coords;

    let color = single_char(fields[5])
        .and_then(color_name)
        .ok_or_else(|| parse_error(line_no, raw, &format!("unknown color code {:?}", fields[5])))?;

    let style = fields
        .get(6)
        .map(|s| s.parse::<CornerStyle>())
        .transpose()
        .map_err(|e| parse_error(line_no, raw, &e))?;

    let shape = match kind {
        ShapeKind::Line => {
            if style.is_some() {
                return Err(parse_error(line_no, raw, "lines do not take a corner style"));
            }
            Shape::Line(Line::new(x0, y0, x1, y1).with_color(color))
        }
        ShapeKind::Rectangle => Shape::Rectangle(
            Rectangle::new(x0, y0, x1, y1)
                .with_color(color)
                .with_corner_style(style.unwrap_or_default()),
        ),
    };
    Ok(shape)
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_error(line: usize, content: &str, reason: &str) -> StorageError {
    StorageError::Parse {
        line,
        content: content.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(doc: &Document) -> Vec<Vec<(ShapeKind, (i32, i32, i32, i32), String, Option<CornerStyle>)>> {
        doc.groups()
            .iter()
            .map(|g| {
                g.shapes()
                    .iter()
                    .map(|s| (s.kind(), s.coords(), s.color().to_string(), s.corner_style()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_singleton_and_group_layout() {
        let mut doc = Document::new();
        let a = doc.add_shape(ShapeKind::Line, 10, 10, 50, 50, "black");
        let b = doc.add_shape(ShapeKind::Rectangle, 60, 60, 100, 100, "red");
        doc.add_shape(ShapeKind::Line, 0, 5, -3, 7, "blue");
        let ga = doc.group_of(a).unwrap();
        let gb = doc.group_of(b).unwrap();
        doc.group_together(&[ga, gb]).unwrap();

        let text = to_text(&doc).unwrap();
        assert_eq!(
            text,
            "line 0 5 -3 7 b\nstart\nline 10 10 50 50 k\nrectangle 60 60 100 100 r square\nend\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let mut doc = Document::new();
        let a = doc.add_shape(ShapeKind::Line, 10, 10, 50, 50, "black");
        let b = doc.add_shape(ShapeKind::Rectangle, 60, 60, 100, 100, "green");
        let c = doc.add_shape(ShapeKind::Rectangle, 5, 90, -5, 2, "BLUE");
        doc.add_shape(ShapeKind::Line, 1, 1, 1, 1, "#ff0000");
        let gc = doc.group_of(c).unwrap();
        doc.set_corner_style(&[gc], CornerStyle::Rounded);
        let ga = doc.group_of(a).unwrap();
        let gb = doc.group_of(b).unwrap();
        doc.group_together(&[gb, ga]).unwrap();

        let loaded = from_text(&to_text(&doc).unwrap()).unwrap();
        assert_eq!(loaded.len(), doc.len());
        assert_eq!(loaded.shape_count(), doc.shape_count());
        for (left, right) in doc.shapes().zip(loaded.shapes()) {
            assert_eq!(left.kind(), right.kind());
            assert_eq!(left.coords(), right.coords());
            assert_eq!(left.corner_style(), right.corner_style());
            assert_eq!(color_code(left.color()), color_code(right.color()));
            assert_ne!(left.id(), right.id());
        }
        let sizes: Vec<usize> = loaded.groups().iter().map(Group::len).collect();
        assert_eq!(sizes, vec![1, 1, 2]);
    }

    #[test]
    fn test_extreme_coordinates_round_trip() {
        let mut doc = Document::new();
        let line = doc.add_shape(ShapeKind::Line, i32::MIN, i32::MAX, i32::MAX, i32::MIN, "black");
        doc.add_shape(ShapeKind::Rectangle, i32::MIN, i32::MIN, i32::MAX, i32::MAX, "red");
        let text = to_text(&doc).unwrap();
        assert!(text.starts_with("line -2147483648 2147483647 2147483647 -2147483648 k\n"));

        let loaded = from_text(&text).unwrap();
        let coords: Vec<_> = loaded.shapes().map(Shape::coords).collect();
        let expected: Vec<_> = doc.shapes().map(Shape::coords).collect();
        assert_eq!(coords, expected);
        assert_eq!(doc.shape(line).unwrap().coords().0, i32::MIN);

        let hits = crate::selection::select_in_rect(&loaded, i32::MAX, i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(hits.len(), 2);
        assert_eq!(parse_line_of("line 2147483648 0 1 1 k\n"), 1);
    }

    #[test]
    fn test_non_utf8_reports_line() {
        let err = from_bytes(b"line 0 0 1 1 k\nline 0 0 \xff 1 k\n").unwrap_err();
        assert!(matches!(err, StorageError::Parse { line: 2, .. }));
        assert!(from_bytes(b"line 0 0 1 1 k\n").is_ok());
    }

    #[test]
    fn test_bare_lines_are_separate_groups() {
        let doc = from_text("line 0 0 1 1 k\nline 2 2 3 3 r\n\nrectangle 0 0 4 4 g\n").unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.groups().iter().all(Group::is_singleton));
        assert_eq!(
            summary(&doc)[2],
            vec![(ShapeKind::Rectangle, (0, 0, 4, 4), "green".to_string(), Some(CornerStyle::Square))]
        );
    }

    #[test]
    fn test_whitespace_tolerated() {
        let doc = from_text("  start  \n\tline 0 0 1 1 k\r\nrectangle  0 0 2 2  b rounded\nend\n").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.groups()[0].len(), 2);
        assert_eq!(doc.groups()[0].shapes()[1].corner_style(), Some(CornerStyle::Rounded));
    }

    #[test]
    fn test_empty_input() {
        assert!(from_text("").unwrap().is_empty());
        assert_eq!(to_text(&Document::new()).unwrap(), "");
    }

    fn parse_line_of(text: &str) -> usize {
        match from_text(text) {
            Err(StorageError::Parse { line, .. }) => line,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_lines_report_line_number() {
        assert_eq!(parse_line_of("line 0 0 1 1 k\nline 0 0 1 k\n"), 2);
        assert_eq!(parse_line_of("circle 0 0 1 1 k\n"), 1);
        assert_eq!(parse_line_of("line 0 0 1 1 x\n"), 1);
        assert_eq!(parse_line_of("line 0 0 1 1 red\n"), 1);
        assert_eq!(parse_line_of("line 0 zero 1 1 k\n"), 1);
        assert_eq!(parse_line_of("rectangle 0 0 1 1 k oval\n"), 1);
        assert_eq!(parse_line_of("line 0 0 1 1 k rounded\n"), 1);
        assert_eq!(parse_line_of("rectangle 0 0 1 1 k square extra\n"), 1);
    }

    #[test]
    fn test_malformed_blocks() {
        assert_eq!(parse_line_of("start\nstart\n"), 2);
        assert_eq!(parse_line_of("line 0 0 1 1 k\nend\n"), 2);
        assert_eq!(parse_line_of("start\nend\n"), 2);
        assert_eq!(parse_line_of("line 0 0 1 1 k\nstart\nline 0 0 1 1 k\n"), 2);
    }

    #[test]
    fn test_parse_error_keeps_content() {
        let err = from_text("line 1 2 3 k\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 1"));
        assert!(message.contains("line 1 2 3 k"));
    }

    #[test]
    fn test_unsupported_color_on_save() {
        let mut doc = Document::new();
        doc.add_shape(ShapeKind::Line, 0, 0, 1, 1, "purple");
        assert!(matches!(
            to_text(&doc),
            Err(StorageError::UnsupportedColor(c)) if c == "purple"
        ));
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(color_code("Red"), Some('r'));
        assert_eq!(color_code("#008000"), Some('g'));
        assert_eq!(color_code("#0000FF"), Some('b'));
        assert_eq!(color_code("black"), Some('k'));
        assert_eq!(color_code("orange"), None);
        assert_eq!(color_name('k'), Some("black"));
        assert_eq!(color_name('z'), None);
    }
}
