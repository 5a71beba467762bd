//! Delegated event routing for every widget in a document.
//!
//! One router serves one host document. It installs a single set of
//! delegated listeners, correlates each event with the widgets whose
//! identifier matches the bound input the event came from, and owns the
//! debounce/settle/throttle timer slots shared by all of them.
//!
//! Every handler runs behind a boundary that catches errors and panics, logs
//! them with the widget identifier, and carries on with the next widget.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use datadom::{ListenerKind, Origin};
use log::{debug, error, info, trace, warn};

use crate::config::DataListConfig;
use crate::error::{DataListError, Result, extract_panic_message};
use crate::event::{Event, EventKind};
use crate::host::Host;
use crate::registry::Registry;
use crate::timers::{Clock, FilterRequest, Fired, PendingTimers, SystemClock, TimerSlot};
use crate::widget::{DataList, InstanceId};

const LISTENERS: [ListenerKind; 4] = [
    ListenerKind::Activate,
    ListenerKind::Change,
    ListenerKind::BlurSettle,
    ListenerKind::Resize,
];

/// Routes document events to widgets and runs their timers.
#[derive(Debug)]
pub struct Router<C: Clock = SystemClock> {
    registry: Registry,
    timers: PendingTimers,
    clock: C,
    config: DataListConfig,
    listeners_installed: bool,
}

impl Router<SystemClock> {
    pub fn new(config: DataListConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Router<SystemClock> {
    fn default() -> Self {
        Self::new(DataListConfig::default())
    }
}

impl<C: Clock> Router<C> {
    /// Create a router on `clock`.
    ///
    /// A configuration that fails [`DataListConfig::validate`] is replaced by
    /// the defaults.
    pub fn with_clock(config: DataListConfig, clock: C) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!("[router] {err}; using default configuration");
                DataListConfig::default()
            }
        };
        Self {
            registry: Registry::new(),
            timers: PendingTimers::new(),
            clock,
            config,
            listeners_installed: false,
        }
    }

    pub fn config(&self) -> &DataListConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn timers(&self) -> &PendingTimers {
        &self.timers
    }

    pub fn instance(&self, id: InstanceId) -> Option<&DataList> {
        self.registry.get(id)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut DataList> {
        self.registry.get_mut(id)
    }

    /// Widgets registered under `identifier`.
    pub fn instances_for(&self, identifier: &str) -> Vec<&DataList> {
        self.registry
            .ids_for(identifier)
            .into_iter()
            .filter_map(|id| self.registry.get(id))
            .collect()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Install the delegated listeners on `host`.
    ///
    /// Only the first call installs anything; returns true when it did.
    pub fn install_global_listeners<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.listeners_installed {
            return false;
        }
        for kind in LISTENERS {
            host.install_listener(kind);
        }
        self.listeners_installed = true;
        info!("[router] delegated listeners installed");
        true
    }

    pub fn listeners_installed(&self) -> bool {
        self.listeners_installed
    }

    /// Attach a widget and register it.
    ///
    /// Widgets mounted on a document element get their rows rebuilt from the
    /// element's declarative children.
    pub fn attach<H: Host + ?Sized>(&mut self, host: &mut H, mut instance: DataList) -> InstanceId {
        self.install_global_listeners(host);

        if let Some(element) = instance.element() {
            let items = host.source_items(element);
            instance.populate_from_source(items);
        }
        instance.attach();

        info!(
            "[router] attached {} ({}) with {} rows",
            instance.log_name(),
            instance.id(),
            instance.len()
        );
        self.registry.register(instance)
    }

    /// Create and attach the widget hosted by the document element `element`.
    ///
    /// The element's identifier attribute becomes the widget identifier. A
    /// missing identifier is only a warning; the widget stays inert.
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H, element: &str) -> InstanceId {
        let identifier = host.widget_identifier(element);
        let instance = DataList::with_identifier(identifier).with_element(element);
        self.attach(host, instance)
    }

    /// Detach and unregister a widget, cancelling timers aimed at it.
    pub fn detach(&mut self, id: InstanceId) -> Option<DataList> {
        let mut instance = self.registry.unregister(id)?;
        instance.detach();

        if let Some(identifier) = instance.identifier()
            && self.registry.ids_for(identifier).is_empty()
        {
            let cancelled = self.timers.cancel_for_list(identifier);
            if !cancelled.is_empty() {
                debug!("[router] cancelled {cancelled:?} for detached {identifier}");
            }
        }
        if self.registry.is_empty() {
            self.timers.clear();
        }

        info!("[router] detached {} ({})", instance.log_name(), id);
        Some(instance)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Handle one event. Never fails; handler errors are logged.
    pub fn dispatch<H: Host + ?Sized>(&mut self, host: &mut H, event: Event) {
        let kind = event.kind();
        if !self.listeners_installed {
            trace!("[router] {kind} dropped, no listeners installed");
            return;
        }
        trace!("[router] {event:?}");

        self.guarded(kind, "<document>", |router| {
            router.route(host, event);
            Ok(())
        });
    }

    /// Run every timer that is due. Returns how many fired.
    pub fn run_due<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            trace!("[router] timer {:?} fired", timer.slot());
            self.fire(host, timer);
            fired += 1;
        }
        fired
    }

    fn route<H: Host + ?Sized>(&mut self, host: &mut H, event: Event) {
        match event {
            Event::Click { target } => self.on_activate(host, &target),
            Event::Input {
                target,
                value,
                origin,
            } => self.on_input(host, &target, value, origin),
            Event::FocusOut { target } => self.on_focus_out(host, &target),
            Event::Resize { width, height } => self.on_resize(width, height),
            Event::PanelPointerDown { instance, row } => self.on_panel_pointer_down(instance, row),
            Event::PanelTouchStart { instance, row } => self.on_panel_touch_start(instance, row),
            Event::PanelClick { instance, row } => self.on_panel_click(host, instance, row),
        }
    }

    fn on_activate<H: Host + ?Sized>(&mut self, host: &mut H, target: &str) {
        let Some((input, list)) = host.closest_bound_input(target) else {
            return;
        };
        let query = host.input_value(&input).unwrap_or_default();
        for id in self.registry.ids_for(&list) {
            self.guarded(EventKind::Click, &list, |router| {
                router.open(host, id, &input, &query)
            });
        }
    }

    fn on_input<H: Host + ?Sized>(&mut self, host: &mut H, target: &str, value: String, origin: Origin) {
        // Our own writes on selection must not reopen the panel
        if origin == Origin::Synthetic {
            trace!("[router] synthetic change on {target} ignored");
            return;
        }
        let Some((input, list)) = host.closest_bound_input(target) else {
            return;
        };
        if self.registry.ids_for(&list).is_empty() {
            return;
        }

        let deadline = self.clock.now() + self.config.filter_debounce_delay();
        debug!("[router] filter for {list} debounced ({value:?})");
        self.timers.debounce_filter(
            deadline,
            FilterRequest {
                list,
                input,
                query: value,
            },
        );
    }

    fn on_focus_out<H: Host + ?Sized>(&mut self, host: &mut H, target: &str) {
        let Some((_, list)) = host.closest_bound_input(target) else {
            return;
        };
        if self.registry.ids_for(&list).is_empty() {
            return;
        }
        let deadline = self.clock.now() + self.config.blur_settle_delay();
        debug!("[router] blur settle for {list} scheduled");
        self.timers.settle_blur(deadline, list);
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        let deadline = self.clock.now() + self.config.resize_throttle_delay();
        if self.timers.throttle_resize(deadline) {
            debug!("[router] resize pass scheduled ({width}x{height})");
        } else {
            trace!("[router] resize absorbed by pending pass");
        }
    }

    fn on_panel_pointer_down(&mut self, instance: InstanceId, row: Option<usize>) {
        if row.is_none() || !self.registry.contains(instance) {
            return;
        }
        // Let the input's focus loss arrive first, then cancel the hide it scheduled
        let deadline = self.clock.now() + self.config.pointer_down_grace_delay();
        self.timers.suppress_blur(deadline);
    }

    fn on_panel_touch_start(&mut self, instance: InstanceId, row: Option<usize>) {
        if row.is_none() || !self.registry.contains(instance) {
            return;
        }
        if self.timers.cancel(TimerSlot::SettleBlur) {
            debug!("[router] touch on {instance} kept the panel open");
        }
    }

    fn on_panel_click<H: Host + ?Sized>(&mut self, host: &mut H, id: InstanceId, row: Option<usize>) {
        let Some(row) = row else {
            return;
        };
        let name = match self.registry.get(id) {
            Some(instance) => instance.log_name().to_string(),
            None => return,
        };
        self.guarded(EventKind::PanelClick, &name, |router| {
            let instance = router
                .registry
                .get_mut(id)
                .ok_or(DataListError::UnknownInstance(id))?;
            instance.select_row(row, host)
        });
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    fn fire<H: Host + ?Sized>(&mut self, host: &mut H, timer: Fired) {
        match timer {
            Fired::Filter(request) => {
                for id in self.registry.ids_for(&request.list) {
                    self.guarded(EventKind::Timer, &request.list, |router| {
                        router.open(host, id, &request.input, &request.query)
                    });
                }
            }
            Fired::SettleBlur { list } => {
                for id in self.registry.ids_for(&list) {
                    self.guarded(EventKind::Timer, &list, |router| router.settle(host, id));
                }
            }
            Fired::SuppressBlur => {
                if self.timers.cancel(TimerSlot::SettleBlur) {
                    debug!("[router] pointer-down kept the panel open");
                }
            }
            Fired::Resize => {
                for id in self.registry.ids() {
                    let name = self
                        .registry
                        .get(id)
                        .map(|i| i.log_name().to_string())
                        .unwrap_or_default();
                    self.guarded(EventKind::Resize, &name, |router| router.reposition(host, id));
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Per-widget work
    // -------------------------------------------------------------------------

    /// Show, place against `input` and filter with `query`.
    fn open<H: Host + ?Sized>(&mut self, host: &mut H, id: InstanceId, input: &str, query: &str) -> Result<()> {
        let anchor = host
            .anchor_rect(input)
            .ok_or_else(|| DataListError::ElementNotFound(input.to_string()))?;
        let viewport = host.viewport();

        let instance = self
            .registry
            .get_mut(id)
            .ok_or(DataListError::UnknownInstance(id))?;
        if !instance.is_attached() {
            return Ok(());
        }
        instance.show();
        instance.place(input, anchor, viewport, &self.config);
        instance.filter(query);
        Ok(())
    }

    /// Hide after focus loss unless the widget itself took focus.
    fn settle<H: Host + ?Sized>(&mut self, host: &mut H, id: InstanceId) -> Result<()> {
        let instance = self
            .registry
            .get_mut(id)
            .ok_or(DataListError::UnknownInstance(id))?;
        if let Some(element) = instance.element()
            && host.has_focus(element)
        {
            debug!("[router] {} holds focus, staying open", instance.log_name());
            return Ok(());
        }
        instance.hide();
        Ok(())
    }

    /// Re-place an open widget against its last anchor, or the first visible
    /// bound input.
    fn reposition<H: Host + ?Sized>(&mut self, host: &mut H, id: InstanceId) -> Result<()> {
        let instance = self
            .registry
            .get(id)
            .ok_or(DataListError::UnknownInstance(id))?;
        let Some(identifier) = instance.identifier() else {
            return Ok(());
        };
        if !instance.is_attached() || !instance.is_visible() {
            return Ok(());
        }

        let bound = host.bound_inputs(identifier);
        let anchor = instance
            .anchor()
            .filter(|anchor| bound.iter().any(|b| b == anchor) && !host.is_hidden(anchor))
            .map(str::to_string)
            .or_else(|| bound.into_iter().find(|input| !host.is_hidden(input)));
        let Some(anchor) = anchor else {
            return Ok(());
        };

        let rect = host
            .anchor_rect(&anchor)
            .ok_or_else(|| DataListError::ElementNotFound(anchor.clone()))?;
        let viewport = host.viewport();
        if let Some(instance) = self.registry.get_mut(id) {
            instance.place(&anchor, rect, viewport, &self.config);
        }
        Ok(())
    }

    /// Run `f` behind the handler boundary.
    fn guarded<F>(&mut self, kind: EventKind, identifier: &str, f: F)
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        match catch_unwind(AssertUnwindSafe(|| f(self))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                error!("[router] {kind} handler failed for '{identifier}': {err}");
            }
            Err(panic) => {
                let err = DataListError::HandlerPanicked {
                    handler: kind.name(),
                    message: extract_panic_message(&panic),
                };
                error!("[router] {kind} handler failed for '{identifier}': {err}");
            }
        }
    }
}
