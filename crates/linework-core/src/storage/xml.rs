//! One-way XML export.
//!
//! Singleton groups become `<line>`/`<rectangle>` children of `<Shapes>`;
//! larger groups are wrapped in `<Group>`. Output is indented with tabs.

use super::{StorageError, StorageResult};
use crate::canvas::Document;
use crate::shapes::{DEFAULT_COLOR, Shape};
use std::io::{self, Write};

const ROOT: &str = "Shapes";
const GROUP: &str = "Group";

/// Minimal pretty-printing element writer.
struct XmlWriter<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> XmlWriter<W> {
    fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    fn declaration(&mut self) -> io::Result<()> {
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)
    }

    fn indent(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(b"\t")?;
        }
        Ok(())
    }

    fn open(&mut self, name: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.out, "<{name}>")?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, name: &str) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.indent()?;
        writeln!(self.out, "</{name}>")
    }

    fn empty(&mut self, name: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.out, "<{name} />")
    }

    fn text_element(&mut self, name: &str, text: &str) -> io::Result<()> {
        self.indent()?;
        writeln!(self.out, "<{name}>{}</{name}>", escape_xml(text))
    }

    fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

fn write_shape<W: Write>(xml: &mut XmlWriter<W>, shape: &Shape) -> io::Result<()> {
    let (x0, y0, x1, y1) = shape.coords();
    let color = if shape.color().is_empty() {
        DEFAULT_COLOR
    } else {
        shape.color()
    };

    let name = shape.kind().as_str();
    xml.open(name)?;
    xml.text_element("StartX", &x0.to_string())?;
    xml.text_element("StartY", &y0.to_string())?;
    xml.text_element("EndX", &x1.to_string())?;
    xml.text_element("EndY", &y1.to_string())?;
    xml.text_element("Color", color)?;
    if let Some(style) = shape.corner_style() {
        xml.text_element("CornerStyle", style.as_str())?;
    }
    xml.close(name)
}

fn write_document<W: Write>(document: &Document, out: W) -> io::Result<W> {
    let mut xml = XmlWriter::new(out);
    xml.declaration()?;
    if document.is_empty() {
        xml.empty(ROOT)?;
        return xml.finish();
    }

    xml.open(ROOT)?;
    for group in document.groups() {
        if group.is_singleton() {
            write_shape(&mut xml, &group.shapes()[0])?;
        } else {
            xml.open(GROUP)?;
            for shape in group.shapes() {
                write_shape(&mut xml, shape)?;
            }
            xml.close(GROUP)?;
        }
    }
    xml.close(ROOT)?;
    xml.finish()
}

/// Stream the XML export of a document into a writer.
///
/// A failure part-way leaves whatever was already written in place.
pub fn write_xml<W: Write>(document: &Document, out: W) -> StorageResult<()> {
    write_document(document, out)
        .map(|_| ())
        .map_err(|e| StorageError::Export(e.to_string()))
}

/// Render the XML export as a string.
pub fn to_xml(document: &Document) -> String {
    // Writes into a Vec<u8> cannot fail, and every piece written is UTF-8.
    match write_document(document, Vec::new()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CornerStyle, ShapeKind};

    #[test]
    fn test_export_layout() {
        let mut doc = Document::new();
        let a = doc.add_shape(ShapeKind::Line, 10, 10, 50, 50, "black");
        let b = doc.add_shape(ShapeKind::Rectangle, 60, 60, 100, 100, "red");
        let c = doc.add_shape(ShapeKind::Rectangle, 1, 2, 3, 4, "#00ff00");
        let gc = doc.group_of(c).unwrap();
        doc.set_corner_style(&[gc], CornerStyle::Rounded);
        let ga = doc.group_of(a).unwrap();
        let gb = doc.group_of(b).unwrap();
        doc.group_together(&[ga, gb]).unwrap();

        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<Shapes>
\t<rectangle>
\t\t<StartX>1</StartX>
\t\t<StartY>2</StartY>
\t\t<EndX>3</EndX>
\t\t<EndY>4</EndY>
\t\t<Color>#00ff00</Color>
\t\t<CornerStyle>rounded</CornerStyle>
\t</rectangle>
\t<Group>
\t\t<line>
\t\t\t<StartX>10</StartX>
\t\t\t<StartY>10</StartY>
\t\t\t<EndX>50</EndX>
\t\t\t<EndY>50</EndY>
\t\t\t<Color>black</Color>
\t\t</line>
\t\t<rectangle>
\t\t\t<StartX>60</StartX>
\t\t\t<StartY>60</StartY>
\t\t\t<EndX>100</EndX>
\t\t\t<EndY>100</EndY>
\t\t\t<Color>red</Color>
\t\t\t<CornerStyle>square</CornerStyle>
\t\t</rectangle>
\t</Group>
</Shapes>
";
        assert_eq!(to_xml(&doc), expected);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            to_xml(&Document::new()),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Shapes />\n"
        );
    }

    #[test]
    fn test_color_text_is_escaped() {
        let mut doc = Document::new();
        doc.add_shape(ShapeKind::Line, 0, 0, 1, 1, "a<b&c");
        assert!(to_xml(&doc).contains("<Color>a&lt;b&amp;c</Color>"));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut doc = Document::new();
        doc.add_shape(ShapeKind::Line, -5, 0, 1, -1, "black");
        let xml = to_xml(&doc);
        assert!(xml.contains("<StartX>-5</StartX>"));
        assert!(xml.contains("<EndY>-1</EndY>"));
    }

    #[test]
    fn test_unbalanced_close_stays_at_root() {
        let mut xml = XmlWriter::new(Vec::new());
        xml.close(GROUP).unwrap();
        xml.open(ROOT).unwrap();
        xml.close(ROOT).unwrap();
        let out = String::from_utf8(xml.finish().unwrap()).unwrap();
        assert_eq!(out, "</Group>\n<Shapes>\n</Shapes>\n");
    }

    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget < buf.len() {
                return Err(io::Error::other("disk full"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_export_error() {
        let mut doc = Document::new();
        doc.add_shape(ShapeKind::Line, 0, 0, 1, 1, "black");
        let result = write_xml(&doc, FailingWriter { budget: 64 });
        assert!(matches!(result, Err(StorageError::Export(msg)) if msg.contains("disk full")));
    }
}
