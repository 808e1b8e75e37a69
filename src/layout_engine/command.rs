//! The subset of the i3/sway command language the controller speaks.
//!
//! Commands are built as typed values and rendered to text only when a
//! batch is sent. Marks stay plain strings here because this is where they
//! meet the wire.

use std::fmt;

use super::{Direction, Layout, Orientation};
use crate::ipc::ConId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FullscreenMode {
    Enable,
    Disable,
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Focus,
    FocusChild,
    Move(Direction),
    MoveToMark(String),
    Split(Orientation),
    SetLayout(Layout),
    LayoutToggleSplit,
    Mark(String),
    /// Without a name every mark of the target is removed.
    Unmark(Option<String>),
    SwapWith(ConId),
    ResizeSet { axis: Orientation, ppt: u32 },
    Fullscreen(FullscreenMode),
    Opacity(f64),
}

/// One command, optionally restricted to a container.
///
/// Untargeted commands apply to whatever the manager has focused when the
/// command runs, which may be a window focused earlier in the same batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub target: Option<ConId>,
    pub action: Action,
}

impl Command {
    pub fn new(action: Action) -> Self { Self { target: None, action } }

    pub fn on(target: ConId, action: Action) -> Self { Self { target: Some(target), action } }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Focus => write!(f, "focus"),
            Action::FocusChild => write!(f, "focus child"),
            Action::Move(direction) => write!(f, "move {direction}"),
            Action::MoveToMark(mark) => write!(f, "move to mark {mark}"),
            Action::Split(Orientation::Horizontal) => write!(f, "splith"),
            Action::Split(Orientation::Vertical) => write!(f, "splitv"),
            Action::SetLayout(layout) => write!(f, "layout {}", layout.command_keyword()),
            Action::LayoutToggleSplit => write!(f, "layout toggle split"),
            Action::Mark(mark) => write!(f, "mark {mark}"),
            Action::Unmark(None) => write!(f, "unmark"),
            Action::Unmark(Some(mark)) => write!(f, "unmark {mark}"),
            Action::SwapWith(id) => write!(f, "swap container with con_id {id}"),
            Action::ResizeSet { axis, ppt } => {
                let dimension = match axis {
                    Orientation::Horizontal => "width",
                    Orientation::Vertical => "height",
                };
                write!(f, "resize set {dimension} {ppt} ppt")
            }
            Action::Fullscreen(mode) => write!(f, "fullscreen {mode}"),
            Action::Opacity(value) => write!(f, "opacity {value}"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.target {
            write!(f, "[con_id={id}] ")?;
        }
        write!(f, "{}", self.action)
    }
}

/// Renders a batch as one request. The manager runs the commands in order.
pub fn batch(commands: &[Command]) -> String {
    commands.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_targeted_commands() {
        assert_eq!(Command::on(7, Action::Focus).to_string(), "[con_id=7] focus");
        assert_eq!(
            Command::on(7, Action::SwapWith(9)).to_string(),
            "[con_id=7] swap container with con_id 9"
        );
        assert_eq!(Command::new(Action::Move(Direction::Up)).to_string(), "move up");
    }

    #[test]
    fn renders_grammar_keywords() {
        let cases = [
            (Action::FocusChild, "focus child"),
            (Action::MoveToMark("I3DT_SCND_1".into()), "move to mark I3DT_SCND_1"),
            (Action::Split(Orientation::Vertical), "splitv"),
            (Action::Split(Orientation::Horizontal), "splith"),
            (Action::SetLayout(Layout::Stacked), "layout stacking"),
            (Action::SetLayout(Layout::Tabbed), "layout tabbed"),
            (Action::LayoutToggleSplit, "layout toggle split"),
            (Action::Mark("I3DT_MAIN_2".into()), "mark I3DT_MAIN_2"),
            (Action::Unmark(None), "unmark"),
            (Action::Unmark(Some("I3DT_SCND_2".into())), "unmark I3DT_SCND_2"),
            (
                Action::ResizeSet { axis: Orientation::Horizontal, ppt: 50 },
                "resize set width 50 ppt",
            ),
            (Action::ResizeSet { axis: Orientation::Vertical, ppt: 50 }, "resize set height 50 ppt"),
            (Action::Fullscreen(FullscreenMode::Toggle), "fullscreen toggle"),
            (Action::Fullscreen(FullscreenMode::Disable), "fullscreen disable"),
            (Action::Opacity(0.8), "opacity 0.8"),
            (Action::Opacity(1.0), "opacity 1"),
        ];
        for (action, expected) in cases {
            assert_eq!(action.to_string(), expected);
        }
    }

    #[test]
    fn batch_joins_with_semicolons() {
        let commands = [Command::on(3, Action::Unmark(None)), Command::new(Action::Move(Direction::Left))];
        assert_eq!(batch(&commands), "[con_id=3] unmark; move left");
        assert_eq!(batch(&[]), "");
    }
}
