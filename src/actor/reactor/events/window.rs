use tracing::{info, instrument, trace};

use crate::actor::reactor::{Reactor, ReactorError};
use crate::ipc::WmConnection;
use crate::ipc::events::{WindowChange, WindowEvent};
use crate::layout_engine::{opacity, reconcile};

pub struct WindowEventHandler;

impl WindowEventHandler {
    pub fn handle<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WindowEvent,
    ) -> Result<(), ReactorError> {
        match event.change {
            WindowChange::New => Self::handle_window_new(reactor, event),
            WindowChange::Close => Self::handle_window_close(reactor, event),
            WindowChange::Focus => Self::handle_window_focus(reactor, event),
            WindowChange::Move => Self::handle_window_move(reactor),
            WindowChange::Floating => Self::handle_window_floating(reactor, event),
            change => {
                trace!(?change, id = event.container.id, "Ignoring window event");
                Ok(())
            }
        }
    }

    #[instrument(skip_all, fields(id = event.container.id))]
    fn handle_window_new<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WindowEvent,
    ) -> Result<(), ReactorError> {
        info!("Window::New");
        let snapshot = reactor.snapshot()?;
        let plan =
            reconcile::on_new_window(&snapshot, &event.container, &reactor.config.bar.name_prefix);
        reactor.reconcile(plan)
    }

    #[instrument(skip_all, fields(id = event.container.id))]
    fn handle_window_close<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WindowEvent,
    ) -> Result<(), ReactorError> {
        info!("Window::Close");
        if event.container.is_floating() {
            return Ok(());
        }
        let snapshot = reactor.snapshot()?;
        reactor.reconcile(reconcile::on_close(&snapshot, &event.container))
    }

    #[instrument(skip_all, fields(id = event.container.id))]
    fn handle_window_focus<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WindowEvent,
    ) -> Result<(), ReactorError> {
        reactor.session.focus.record(event.container.id);
        if !reactor.backend.dims_windows() || reactor.session.focus.previous.is_none() {
            return Ok(());
        }
        let snapshot = reactor.snapshot()?;
        let commands = opacity::on_focus(&snapshot, &reactor.session.focus, &reactor.backend);
        reactor.execute(&commands)
    }

    #[instrument(skip_all)]
    fn handle_window_move<C: WmConnection>(reactor: &mut Reactor<C>) -> Result<(), ReactorError> {
        info!("Window::Move");
        let snapshot = reactor.snapshot()?;
        reactor.reconcile(reconcile::on_move(&snapshot))
    }

    #[instrument(skip_all, fields(id = event.container.id))]
    fn handle_window_floating<C: WmConnection>(
        reactor: &mut Reactor<C>,
        event: &WindowEvent,
    ) -> Result<(), ReactorError> {
        info!(floating = event.container.is_floating(), "Window::Floating");
        let snapshot = reactor.snapshot()?;
        reactor.reconcile(reconcile::on_floating(&snapshot, &event.container))
    }
}
