use tracing::{info, instrument, trace};

use crate::actor::reactor::{Reactor, ReactorError};
use crate::ipc::WmConnection;
use crate::ipc::events::{WorkspaceChange, WorkspaceEvent};
use crate::layout_engine::monocle::{self, MonocleTarget};
use crate::layout_engine::{reconcile, tabbed};

pub struct WorkspaceEventHandler;

impl WorkspaceEventHandler {
    pub fn handle<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WorkspaceEvent,
    ) -> Result<(), ReactorError> {
        match event.change {
            WorkspaceChange::Focus => Self::handle_workspace_focus(reactor, event),
            change => {
                trace!(?change, "Ignoring workspace event");
                Ok(())
            }
        }
    }

    #[instrument(skip_all, fields(name = event.current.as_ref().and_then(|ws| ws.name.as_deref())))]
    fn handle_workspace_focus<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WorkspaceEvent,
    ) -> Result<(), ReactorError> {
        info!("Workspace::Focus");
        let snapshot = reactor.snapshot_in(event.current.as_ref().map(|ws| ws.id))?;

        let presenting = tabbed::is_enabled(&snapshot)
            || monocle::enabled(&snapshot, MonocleTarget::focused(&snapshot));
        reactor.set_bar_visible(snapshot.is_manual() || !presenting);

        let plan = reconcile::on_workspace_focus(&snapshot, &mut reactor.session.saved_layouts);
        reactor.reconcile(plan)
    }
}
