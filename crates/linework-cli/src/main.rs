//! Linework CLI - drive the drawing core without a window.
//!
//! Inspect drawings, convert them to XML, re-save them in canonical form,
//! and select or move regions the way the editor would.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linework_core::{BoundingBox, Canvas, Document, EditorConfig};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Linework - line and rectangle drawings from the command line
#[derive(Parser)]
#[command(name = "linework")]
#[command(about = "Command-line tools for Linework drawings")]
struct Cli {
    /// Editor configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print group and shape counts and the drawing bounds
    Info {
        /// Drawing file
        drawing: PathBuf,
    },

    /// Export a drawing as XML
    Export {
        /// Drawing file
        drawing: PathBuf,
        /// XML file to write
        output: PathBuf,
    },

    /// Load a drawing and save it back in canonical form
    Normalize {
        /// Drawing file
        drawing: PathBuf,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Select the groups overlapping a rectangle
    Select {
        /// Drawing file
        drawing: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x0: i32,
        #[arg(allow_negative_numbers = true)]
        y0: i32,
        #[arg(allow_negative_numbers = true)]
        x1: i32,
        #[arg(allow_negative_numbers = true)]
        y1: i32,
    },

    /// Move the groups overlapping a rectangle and save the result
    Move {
        /// Drawing file
        drawing: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x0: i32,
        #[arg(allow_negative_numbers = true)]
        y0: i32,
        #[arg(allow_negative_numbers = true)]
        x1: i32,
        #[arg(allow_negative_numbers = true)]
        y1: i32,
        /// Horizontal offset
        #[arg(allow_negative_numbers = true)]
        dx: i32,
        /// Vertical offset
        #[arg(allow_negative_numbers = true)]
        dy: i32,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let mut canvas = Canvas::with_config(config);

    match cli.command {
        Commands::Info { drawing } => {
            open(&mut canvas, &drawing)?;
            print!("{}", describe(canvas.document()));
        }
        Commands::Export { drawing, output } => {
            open(&mut canvas, &drawing)?;
            canvas
                .export(&output)
                .with_context(|| format!("Failed to export {}", output.display()))?;
            println!("Exported {} to {}", drawing.display(), output.display());
        }
        Commands::Normalize { drawing, output } => {
            open(&mut canvas, &drawing)?;
            let target = output.as_deref().unwrap_or(&drawing);
            canvas
                .save(target)
                .with_context(|| format!("Failed to save {}", target.display()))?;
            println!("Saved {}", target.display());
        }
        Commands::Select { drawing, x0, y0, x1, y1 } => {
            open(&mut canvas, &drawing)?;
            canvas.select_in_rect(x0, y0, x1, y1);
            print!("{}", describe_selection(&canvas));
        }
        Commands::Move {
            drawing,
            x0,
            y0,
            x1,
            y1,
            dx,
            dy,
            output,
        } => {
            open(&mut canvas, &drawing)?;
            let moved = move_region(&mut canvas, (x0, y0, x1, y1), (dx, dy));
            let target = output.as_deref().unwrap_or(&drawing);
            canvas
                .save(target)
                .with_context(|| format!("Failed to save {}", target.display()))?;
            println!("Moved {moved} shape(s), saved {}", target.display());
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open(canvas: &mut Canvas, path: &Path) -> Result<()> {
    canvas
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(())
}

/// Select a region and move it; returns the number of shapes moved.
fn move_region(canvas: &mut Canvas, region: (i32, i32, i32, i32), delta: (i32, i32)) -> usize {
    let (x0, y0, x1, y1) = region;
    canvas.select_in_rect(x0, y0, x1, y1);
    if canvas.selection().is_empty() {
        return 0;
    }
    canvas.move_selected(delta.0, delta.1).updated.len()
}

fn format_bounds(bounds: Option<BoundingBox>) -> String {
    match bounds {
        Some(b) => format!("({}, {}) - ({}, {})", b.min_x, b.min_y, b.max_x, b.max_y),
        None => "empty".to_string(),
    }
}

fn describe(document: &Document) -> String {
    let singletons = document.groups().iter().filter(|g| g.is_singleton()).count();
    let mut out = String::new();
    let _ = writeln!(out, "Name:    {}", document.name);
    let _ = writeln!(
        out,
        "Groups:  {} ({} single, {} multi)",
        document.len(),
        singletons,
        document.len() - singletons
    );
    let _ = writeln!(out, "Shapes:  {}", document.shape_count());
    let _ = writeln!(out, "Bounds:  {}", format_bounds(document.bounds()));
    out
}

fn describe_selection(canvas: &Canvas) -> String {
    let selected = canvas.selection().groups();
    let mut out = String::new();
    if selected.is_empty() {
        out.push_str("Nothing selected\n");
        return out;
    }

    let _ = writeln!(out, "Selected {} group(s):", selected.len());
    for &group_id in selected {
        let Some(group) = canvas.document().group(group_id) else {
            continue;
        };
        let _ = writeln!(out, "  group {} ({} shape(s))", group_id, group.len());
        for shape in group.shapes() {
            let (x0, y0, x1, y1) = shape.coords();
            let _ = write!(out, "    {} {x0} {y0} {x1} {y1}", shape.kind());
            if let Some(stroke) = canvas.stroke_for(shape.id()) {
                let _ = write!(out, " stroke {} {}", stroke.color, stroke.width);
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linework_core::ShapeKind;

    #[test]
    fn test_cli_parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["linework", "select", "a.txt", "-5", "0", "10", "-2"]).unwrap();
        match cli.command {
            Commands::Select { x0, y1, .. } => {
                assert_eq!(x0, -5);
                assert_eq!(y1, -2);
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["linework", "info", "a.txt", "-vv", "--config", "c.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn test_describe_document() {
        let mut doc = Document::new();
        doc.add_shape(ShapeKind::Line, 10, 10, 50, 50, "black");
        doc.add_shape(ShapeKind::Rectangle, 60, 60, 100, 100, "red");
        let text = describe(&doc);
        assert!(text.contains("Groups:  2 (2 single, 0 multi)"));
        assert!(text.contains("Shapes:  2"));
        assert!(text.contains("Bounds:  (10, 10) - (100, 100)"));
        assert!(describe(&Document::new()).contains("Bounds:  empty"));
    }

    #[test]
    fn test_describe_selection_uses_highlight() {
        let mut canvas = Canvas::new();
        canvas.add_shape(ShapeKind::Line, 10, 10, 50, 50, "black");
        canvas.add_shape(ShapeKind::Line, 100, 100, 150, 150, "blue");

        canvas.select_in_rect(0, 0, 5, 5);
        assert_eq!(describe_selection(&canvas), "Nothing selected\n");

        canvas.select_in_rect(0, 0, 20, 20);
        let text = describe_selection(&canvas);
        assert!(text.starts_with("Selected 1 group(s):"));
        assert!(text.contains("line 10 10 50 50 stroke red 2"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_move_region() {
        let mut canvas = Canvas::new();
        let near = canvas.add_shape(ShapeKind::Line, 10, 10, 50, 50, "black");
        let far = canvas.add_shape(ShapeKind::Line, 100, 100, 150, 150, "blue");

        assert_eq!(move_region(&mut canvas, (0, 0, 20, 20), (-10, 5)), 1);
        assert_eq!(canvas.document().shape(near).unwrap().coords(), (0, 15, 40, 55));
        assert_eq!(canvas.document().shape(far).unwrap().coords(), (100, 100, 150, 150));
        assert!(canvas.selection().is_empty());

        assert_eq!(move_region(&mut canvas, (-50, -50, -40, -40), (1, 1)), 0);
    }

    #[test]
    fn test_cli_parses_move() {
        let cli = Cli::try_parse_from([
            "linework", "move", "a.txt", "0", "0", "20", "20", "-3", "4", "-o", "b.txt",
        ])
        .unwrap();
        match cli.command {
            Commands::Move { dx, dy, output, .. } => {
                assert_eq!((dx, dy), (-3, 4));
                assert_eq!(output, Some(PathBuf::from("b.txt")));
            }
            _ => panic!("expected move"),
        }
    }

    #[test]
    fn test_open_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let err = open(&mut Canvas::new(), &path).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
