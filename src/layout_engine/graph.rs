use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn perpendicular(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The "forward" direction along an axis.
    pub fn forward(orientation: Orientation) -> Direction {
        match orientation {
            Orientation::Horizontal => Direction::Right,
            Orientation::Vertical => Direction::Down,
        }
    }

    pub fn backward(orientation: Orientation) -> Direction {
        Self::forward(orientation).opposite()
    }
}

/// Walking order through a list of siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Next,
    Prev,
}

impl Step {
    pub fn apply(self, index: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        let delta = match self {
            Step::Next => 1,
            Step::Prev => -1,
        };
        (index as isize + delta).rem_euclid(len as isize) as usize
    }

    /// The movement that walks a window this way inside a container laid
    /// out as `layout`.
    pub fn movement(self, layout: Layout) -> Direction {
        match self {
            Step::Next => Direction::forward(layout.axis()),
            Step::Prev => Direction::backward(layout.axis()),
        }
    }
}

/// Container layout as reported by the manager.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    #[serde(rename = "splith")]
    SplitH,
    #[serde(rename = "splitv")]
    SplitV,
    #[serde(rename = "tabbed")]
    Tabbed,
    #[serde(rename = "stacked")]
    Stacked,
    /// `output`, `dockarea` and anything else that never holds windows we
    /// manage.
    #[serde(other)]
    Other,
}

impl Layout {
    /// Tabs run horizontally and stacks vertically, so each layout belongs
    /// to the axis its children are walked along.
    pub fn axis(self) -> Orientation {
        match self {
            Layout::SplitH | Layout::Tabbed => Orientation::Horizontal,
            Layout::SplitV | Layout::Stacked | Layout::Other => Orientation::Vertical,
        }
    }

    pub fn is_split(self) -> bool { matches!(self, Layout::SplitH | Layout::SplitV) }

    pub fn is_horizontal_family(self) -> bool {
        matches!(self, Layout::SplitH | Layout::Tabbed)
    }

    pub fn is_vertical_family(self) -> bool {
        matches!(self, Layout::SplitV | Layout::Stacked)
    }

    /// Keyword for `layout <keyword>`. The manager reports stacked
    /// containers as `stacked` but only accepts `stacking` in commands.
    pub fn command_keyword(self) -> &'static str {
        match self {
            Layout::SplitH => "splith",
            Layout::SplitV => "splitv",
            Layout::Tabbed => "tabbed",
            Layout::Stacked => "stacking",
            Layout::Other => "default",
        }
    }
}
