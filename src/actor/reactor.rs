//! The reactor owns the connection and the session and runs one event at a
//! time to completion.
//!
//! Every handler starts from a fresh tree. Whenever a later step depends on
//! ids or positions produced by an earlier batch, the tree is read again in
//! between; nothing the controller believes is trusted over a live read.

mod error;
mod events;
#[cfg(test)]
mod testing;

pub use error::ReactorError;
pub use events::binding::BindingCommand;
use events::binding::BindingEventHandler;
use events::window::WindowEventHandler;
use events::workspace::WorkspaceEventHandler;
use tracing::{debug, error, info, instrument, trace};

use super::Receiver;
use crate::common::config::Config;
use crate::common::util;
use crate::ipc::{self, ConId, Variant, WmConnection};
use crate::layout_engine::{Backend, Command, Reconciliation, batch, builder, opacity, reconcile};
use crate::model::{Role, Session, Snapshot};

#[derive(Debug)]
pub enum Event {
    Wm(ipc::Event),
    /// SIGINT or SIGTERM.
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Reactor<C: WmConnection> {
    conn: C,
    config: Config,
    backend: Backend,
    session: Session,
}

impl<C: WmConnection> Reactor<C> {
    pub fn new(conn: C, config: Config) -> Self {
        let backend = Backend::new(Variant::default(), config.opacity);
        Self {
            conn,
            config,
            backend,
            session: Session::default(),
        }
    }

    /// Detects the manager variant, remembers the focused window and applies
    /// the initial opacity.
    pub fn initialize(&mut self) -> Result<(), ReactorError> {
        let version = self.conn.get_version()?;
        let variant = Variant::from(&version);
        info!(version = %version.human_readable, ?variant, "Connected to window manager");
        self.session = Session::new(variant);
        self.backend = Backend::new(variant, self.config.opacity);

        let tree = self.conn.get_tree()?;
        if let Some(focused) = tree.leaves().find(|con| con.focused) {
            self.session.focus.record(focused.id);
        }
        self.execute(&opacity::initial(&tree, &self.backend))
    }

    pub fn run(mut self, events_rx: Receiver<Event>) {
        while let Ok((span, event)) = events_rx.recv() {
            let _guard = span.enter();
            if self.handle_event(event) == Flow::Exit {
                break;
            }
        }
        debug!("Reactor stopped");
    }

    #[instrument(name = "reactor::handle_event", skip_all)]
    pub fn handle_event(&mut self, event: Event) -> Flow {
        trace!(?event);
        let result = match event {
            Event::Wm(ipc::Event::Window(event)) => WindowEventHandler::handle(self, &event),
            Event::Wm(ipc::Event::Workspace(event)) => WorkspaceEventHandler::handle(self, &event),
            Event::Wm(ipc::Event::Binding(event)) => {
                BindingEventHandler::handle(self, &event.binding.command)
            }
            Event::Wm(ipc::Event::Shutdown) => {
                info!("Window manager is shutting down");
                return Flow::Exit;
            }
            Event::Terminate => {
                info!("Terminating");
                if let Err(e) = self.reset_opacity() {
                    error!("Failed to reset opacity: {e}");
                }
                return Flow::Exit;
            }
        };
        if let Err(e) = result {
            error!("{e}");
        }
        Flow::Continue
    }

    pub fn session(&self) -> &Session { &self.session }

    /// Snapshot of the focused workspace.
    pub(crate) fn snapshot(&mut self) -> Result<Snapshot, ReactorError> {
        self.snapshot_in(None)
    }

    pub(crate) fn snapshot_in(&mut self, workspace: Option<ConId>) -> Result<Snapshot, ReactorError> {
        let tree = self.conn.get_tree()?;
        let snapshot = Snapshot::extract(&tree, workspace, &self.config.workspaces)
            .ok_or(ReactorError::WorkspaceNotFound(workspace))?;
        trace!(workspace = %snapshot.workspace_name, "Snapshot\n{}", tree.draw_tree());
        Ok(snapshot)
    }

    /// Sends `commands` as one batch and logs every reply. A failing command
    /// does not stop the ones after it.
    pub(crate) fn execute(&mut self, commands: &[Command]) -> Result<(), ReactorError> {
        if commands.is_empty() {
            return Ok(());
        }
        let outcomes = self.conn.run_commands(&batch(commands))?;
        for (command, outcome) in commands.iter().zip(&outcomes) {
            if outcome.success {
                debug!("+ {command}");
            } else {
                error!(
                    "+ {command} failed: {}",
                    outcome.error.as_deref().unwrap_or("no error message")
                );
            }
        }
        if outcomes.len() != commands.len() {
            debug!(sent = commands.len(), replies = outcomes.len(), "Reply count mismatch");
        }
        Ok(())
    }

    /// Builds the container for `role` around `target` or the focused window.
    #[instrument(skip(self))]
    pub(crate) fn create_container(
        &mut self,
        role: Role,
        target: Option<ConId>,
    ) -> Result<(), ReactorError> {
        let snapshot = self.snapshot()?;
        let plan = builder::extract(&snapshot, role, target)?;
        self.execute(&plan.commands)?;

        // The new split only has an id once the manager made it.
        let snapshot = self.snapshot()?;
        let commands = builder::mark(&snapshot, role, plan.target)?;
        self.execute(&commands)
    }

    pub(crate) fn reconcile(&mut self, plan: Reconciliation) -> Result<(), ReactorError> {
        if plan.is_empty() {
            return Ok(());
        }
        for (role, target) in plan.create {
            self.create_container(role, target)?;
        }
        if plan.attach_unmanaged {
            let snapshot = self.snapshot()?;
            self.execute(&reconcile::attach_unmanaged(&snapshot))?;
        }
        self.execute(&plan.commands)
    }

    pub(crate) fn set_bar_visible(&self, visible: bool) {
        let bar = &self.config.bar;
        if !bar.hide_on_tabbed {
            return;
        }
        let command = if visible { &bar.show_command } else { &bar.hide_command };
        util::run_external_command(command);
    }

    fn reset_opacity(&mut self) -> Result<(), ReactorError> {
        let tree = self.conn.get_tree()?;
        self.execute(&opacity::reset(&tree, &self.backend))
    }
}
