use std::str::FromStr;

use tracing::{debug, info, instrument};

use crate::actor::reactor::{Reactor, ReactorError};
use crate::ipc::WmConnection;
use crate::layout_engine::{
    FocusAction, MonocleTarget, MoveAction, MovePlan, TabbedToggle, monocle, navigation, opacity,
    tabbed, workspace,
};
use crate::model::Role;

const NOP_PREFIX: &str = "nop i3ipc_";

/// A key binding the controller acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingCommand {
    Focus(FocusAction),
    Move(MoveAction),
    Reflect,
    Mirror,
    MonocleToggle,
    TabbedToggle,
    /// The manager's own `kill`, observed so a lone main window is swapped
    /// out first.
    Kill,
    /// The manager's own `layout toggle tabbed split`.
    LayoutToggle,
}

impl BindingCommand {
    /// Recognizes the binding grammar. Anything else belongs to the user.
    pub fn parse(command: &str) -> Option<Self> {
        let command = command.trim();
        match command {
            "kill" => return Some(BindingCommand::Kill),
            "layout toggle tabbed split" => return Some(BindingCommand::LayoutToggle),
            _ => {}
        }
        let rest = command.strip_prefix(NOP_PREFIX)?;
        let mut words = rest.split_whitespace();
        let verb = words.next()?;
        let argument = words.next();
        if words.next().is_some() {
            return None;
        }
        match (verb, argument) {
            ("focus", Some(arg)) => FocusAction::from_str(arg).ok().map(BindingCommand::Focus),
            ("move", Some(arg)) => MoveAction::from_str(arg).ok().map(BindingCommand::Move),
            ("reflect", None) => Some(BindingCommand::Reflect),
            ("mirror", None) => Some(BindingCommand::Mirror),
            ("monocle_toggle", None) => Some(BindingCommand::MonocleToggle),
            ("tabbed_toggle", None) => Some(BindingCommand::TabbedToggle),
            _ => None,
        }
    }
}

pub struct BindingEventHandler;

impl BindingEventHandler {
    pub fn handle<C: WmConnection>(
        reactor: &mut Reactor<C>,
        command: &str,
    ) -> Result<(), ReactorError> {
        let Some(binding) = BindingCommand::parse(command) else {
            debug!(command, "Ignoring binding");
            return Ok(());
        };
        Self::dispatch(reactor, binding)
    }

    #[instrument(skip(reactor))]
    pub fn dispatch<C: WmConnection>(
        reactor: &mut Reactor<C>,
        binding: BindingCommand,
    ) -> Result<(), ReactorError> {
        info!("Binding");
        match binding {
            BindingCommand::Focus(action) => Self::handle_focus(reactor, action),
            BindingCommand::Move(action) => Self::handle_move(reactor, action),
            BindingCommand::Reflect => Self::handle_reflect(reactor),
            BindingCommand::Mirror => {
                let snapshot = reactor.snapshot()?;
                reactor.execute(&workspace::mirror(&snapshot))
            }
            BindingCommand::MonocleToggle => Self::handle_monocle_toggle(reactor),
            BindingCommand::TabbedToggle => Self::handle_tabbed_toggle(reactor),
            BindingCommand::Kill => {
                let snapshot = reactor.snapshot()?;
                reactor.execute(&workspace::before_kill(&snapshot))
            }
            BindingCommand::LayoutToggle => {
                if !reactor.backend.dims_windows() {
                    return Ok(());
                }
                // The manager has already applied the toggle.
                let snapshot = reactor.snapshot()?;
                reactor.execute(&opacity::refresh_focused_role(&snapshot, &reactor.backend))
            }
        }
    }

    fn handle_focus<C: WmConnection>(
        reactor: &mut Reactor<C>,
        action: FocusAction,
    ) -> Result<(), ReactorError> {
        let snapshot = reactor.snapshot()?;
        let session = &mut reactor.session;
        let commands = navigation::focus(
            &snapshot,
            action,
            &session.focus,
            &mut session.saved_layouts,
            &reactor.backend,
        );
        reactor.execute(&commands)
    }

    fn handle_move<C: WmConnection>(
        reactor: &mut Reactor<C>,
        action: MoveAction,
    ) -> Result<(), ReactorError> {
        let snapshot = reactor.snapshot()?;
        match navigation::move_window(&snapshot, action) {
            MovePlan::Commands(commands) => reactor.execute(&commands),
            MovePlan::CreateSecondary => reactor.create_container(Role::Secondary, None),
        }
    }

    fn handle_reflect<C: WmConnection>(reactor: &mut Reactor<C>) -> Result<(), ReactorError> {
        let snapshot = reactor.snapshot()?;
        let commands = workspace::reflect(&snapshot);
        if commands.is_empty() {
            return Ok(());
        }
        reactor.execute(&commands)?;

        let mut snapshot = reactor.snapshot()?;
        if reactor.backend.needs_global_mark()
            && let Some(mark) = tabbed::mark_global(&snapshot)
        {
            reactor.execute(&[mark])?;
            snapshot = reactor.snapshot()?;
        }
        reactor.execute(&workspace::align_roles(&snapshot, &reactor.backend))
    }

    fn handle_monocle_toggle<C: WmConnection>(reactor: &mut Reactor<C>) -> Result<(), ReactorError> {
        let snapshot = reactor.snapshot()?;
        let target = MonocleTarget::focused(&snapshot);
        let was_enabled = monocle::enabled(&snapshot, target);
        let commands =
            monocle::toggle(&snapshot, target, &mut reactor.session.saved_layouts, &reactor.backend);
        if commands.is_empty() {
            return Ok(());
        }
        reactor.execute(&commands)?;
        if !snapshot.is_manual() && !tabbed::is_enabled(&snapshot) {
            reactor.set_bar_visible(was_enabled);
        }
        Ok(())
    }

    fn handle_tabbed_toggle<C: WmConnection>(reactor: &mut Reactor<C>) -> Result<(), ReactorError> {
        let snapshot = reactor.snapshot()?;
        match tabbed::toggle(&snapshot, &mut reactor.session.saved_layouts, &reactor.backend) {
            TabbedToggle::Skip => Ok(()),
            TabbedToggle::Monocle => Self::handle_monocle_toggle(reactor),
            TabbedToggle::Enable(commands) => {
                reactor.execute(&commands)?;
                if reactor.backend.needs_global_mark() {
                    let snapshot = reactor.snapshot()?;
                    if let Some(mark) = tabbed::mark_global(&snapshot) {
                        reactor.execute(&[mark])?;
                    }
                }
                reactor.set_bar_visible(false);
                Ok(())
            }
            TabbedToggle::Disable(commands) => {
                reactor.execute(&commands)?;
                reactor.set_bar_visible(true);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_nop_bindings() {
        let cases = [
            ("nop i3ipc_focus next", BindingCommand::Focus(FocusAction::Next)),
            ("nop i3ipc_focus prev", BindingCommand::Focus(FocusAction::Prev)),
            ("nop i3ipc_focus other", BindingCommand::Focus(FocusAction::Other)),
            ("nop i3ipc_focus toggle", BindingCommand::Focus(FocusAction::Toggle)),
            ("nop i3ipc_move next", BindingCommand::Move(MoveAction::Next)),
            ("nop i3ipc_move swap", BindingCommand::Move(MoveAction::Swap)),
            ("nop i3ipc_move other", BindingCommand::Move(MoveAction::Other)),
            ("nop i3ipc_reflect", BindingCommand::Reflect),
            ("nop i3ipc_mirror", BindingCommand::Mirror),
            ("nop i3ipc_monocle_toggle", BindingCommand::MonocleToggle),
            ("nop i3ipc_tabbed_toggle", BindingCommand::TabbedToggle),
        ];
        for (command, expected) in cases {
            assert_eq!(BindingCommand::parse(command), Some(expected), "{command}");
        }
    }

    #[test]
    fn parses_observed_manager_commands() {
        assert_eq!(BindingCommand::parse("kill"), Some(BindingCommand::Kill));
        assert_eq!(
            BindingCommand::parse("layout toggle tabbed split"),
            Some(BindingCommand::LayoutToggle)
        );
    }

    #[test]
    fn ignores_everything_else() {
        for command in [
            "",
            "exec alacritty",
            "nop",
            "nop i3ipc_focus",
            "nop i3ipc_focus sideways",
            "nop i3ipc_move next now",
            "nop i3ipc_reflect please",
            "nop i3ipc_unknown",
            "layout toggle split",
            "killall",
        ] {
            assert_eq!(BindingCommand::parse(command), None, "{command:?}");
        }
    }
}
