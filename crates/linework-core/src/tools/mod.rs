//! Tool modes and pointer-gesture state machines.

use crate::geometry::BoundingBox;
use crate::shapes::{CornerStyle, DEFAULT_COLOR, Line, Rectangle, Shape};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Line,
    Rectangle,
    Select,
    Move,
}

impl ToolKind {
    /// Tools that create shapes.
    pub fn is_drawing(&self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Rectangle)
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A line or rectangle is being dragged out.
    Drawing {
        start: (i32, i32),
        current: (i32, i32),
    },
    /// A rubber-band selection rectangle is being dragged out.
    Selecting {
        start: (i32, i32),
        current: (i32, i32),
    },
    /// The selection is being dragged; `anchor` is the previous pointer sample.
    Moving { anchor: (i32, i32) },
}

/// What a finished gesture produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Nothing happened (no gesture was active).
    None,
    /// A draw gesture completed with this shape.
    Shape(Shape),
    /// A selection gesture completed over this region.
    Region(BoundingBox),
    /// A move gesture completed; `(dx, dy)` is the last step, from the
    /// previous sample to the release point.
    MoveFinished { dx: i32, dy: i32 },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Color applied to new shapes.
    pub current_color: String,
    /// Corner style applied to new rectangles.
    pub corner_style: CornerStyle,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            current_color: DEFAULT_COLOR.to_string(),
            corner_style: CornerStyle::default(),
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool. Any gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a tool interaction at a pointer-down position.
    pub fn begin(&mut self, point: (i32, i32)) {
        self.state = match self.current_tool {
            ToolKind::Line | ToolKind::Rectangle => ToolState::Drawing {
                start: point,
                current: point,
            },
            ToolKind::Select => ToolState::Selecting {
                start: point,
                current: point,
            },
            ToolKind::Move => ToolState::Moving { anchor: point },
        };
    }

    /// Feed a drag sample.
    ///
    /// While moving, returns the delta since the previous sample and advances
    /// the anchor, so many small steps add up to the total drag. Other
    /// gestures only update their preview and return `None`.
    pub fn update(&mut self, point: (i32, i32)) -> Option<(i32, i32)> {
        match &mut self.state {
            ToolState::Idle => None,
            ToolState::Drawing { current, .. } | ToolState::Selecting { current, .. } => {
                *current = point;
                None
            }
            ToolState::Moving { anchor } => {
                let delta = (point.0 - anchor.0, point.1 - anchor.1);
                *anchor = point;
                Some(delta)
            }
        }
    }

    /// End the interaction at the pointer-up position.
    pub fn end(&mut self, point: (i32, i32)) -> ToolOutcome {
        let outcome = match self.state {
            ToolState::Idle => ToolOutcome::None,
            ToolState::Drawing { start, .. } => ToolOutcome::Shape(self.create_shape(start, point)),
            ToolState::Selecting { start, .. } => {
                ToolOutcome::Region(BoundingBox::from_corners(start.0, start.1, point.0, point.1))
            }
            ToolState::Moving { anchor } => ToolOutcome::MoveFinished {
                dx: point.0 - anchor.0,
                dy: point.1 - anchor.1,
            },
        };
        self.state = ToolState::Idle;
        outcome
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.state != ToolState::Idle
    }

    /// Shape being dragged out, for the host to draw as a temporary preview.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.state {
            ToolState::Drawing { start, current } => Some(self.create_shape(start, current)),
            _ => None,
        }
    }

    /// Rubber-band rectangle of an active selection gesture.
    pub fn selection_rect(&self) -> Option<BoundingBox> {
        match self.state {
            ToolState::Selecting { start, current } => Some(BoundingBox::from_corners(
                start.0, start.1, current.0, current.1,
            )),
            _ => None,
        }
    }

    fn create_shape(&self, start: (i32, i32), end: (i32, i32)) -> Shape {
        let color = self.current_color.clone();
        match self.current_tool {
            ToolKind::Rectangle => Shape::Rectangle(
                Rectangle::new(start.0, start.1, end.0, end.1)
                    .with_color(color)
                    .with_corner_style(self.corner_style),
            ),
            _ => Shape::Line(Line::new(start.0, start.1, end.0, end.1).with_color(color)),
        }
    }
}
