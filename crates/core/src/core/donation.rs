//! Donation modal with a simulated payment.
//!
//! `Closed -> Open/Form -> Open/Success -> Closed`. No request leaves the page:
//! confirming a payment waits a fixed delay and then shows the success step.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::DonationConfig;
use crate::element::{set_display, UiElement};
use crate::schedule::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Form,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Step),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Ready,
    Processing,
}

/// One open of the modal. Payments are tagged with the session that started them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(u64);

/// Where a click on the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay element itself, outside the dialog content.
    Backdrop,
    Content,
}

/// Pure modal state; [`DonationModal`] renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DonationState {
    pub modal: ModalState,
    pub selected: Option<usize>,
    pub button: ButtonState,
    pub session: SessionId,
}

impl DonationState {
    /// Show the form step with a fresh session.
    pub fn open(&mut self) -> SessionId {
        self.session = SessionId(self.session.0 + 1);
        self.modal = ModalState::Open(Step::Form);
        self.selected = None;
        self.button = ButtonState::Ready;
        self.session
    }

    pub fn close(&mut self) {
        self.modal = ModalState::Closed;
    }

    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    /// Start processing. `None` if a payment is already in flight.
    pub fn begin_payment(&mut self) -> Option<SessionId> {
        if self.button == ButtonState::Processing {
            return None;
        }
        self.button = ButtonState::Processing;
        Some(self.session)
    }

    /// Finish the payment started in `session`.
    ///
    /// With `reject_stale`, completions from an earlier session are dropped.
    /// Returns whether the modal moved to the success step.
    pub fn complete_payment(&mut self, session: SessionId, reject_stale: bool) -> bool {
        if reject_stale && session != self.session {
            return false;
        }
        match self.modal {
            ModalState::Open(_) => {
                self.modal = ModalState::Open(Step::Success);
                true
            }
            ModalState::Closed => false,
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self.modal {
            ModalState::Open(step) => Some(step),
            ModalState::Closed => None,
        }
    }
}

/// The elements the modal binds to. Only `modal` is required.
#[derive(Debug, Clone)]
pub struct DonationElements<E> {
    pub modal: E,
    pub triggers: Vec<E>,
    pub close: Option<E>,
    pub amounts: Vec<E>,
    pub process: Option<E>,
    pub step_form: Option<E>,
    pub step_success: Option<E>,
    pub success_close: Option<E>,
}

impl<E> DonationElements<E> {
    pub fn new(modal: E) -> Self {
        Self {
            modal,
            triggers: Vec::new(),
            close: None,
            amounts: Vec::new(),
            process: None,
            step_form: None,
            step_success: None,
            success_close: None,
        }
    }
}

/// Donation modal controller.
pub struct DonationModal<E: UiElement> {
    els: DonationElements<E>,
    cfg: DonationConfig,
    scheduler: Rc<dyn Scheduler>,
    default_label: String,
    state: Cell<DonationState>,
    pending: RefCell<Option<(SessionId, TaskHandle)>>,
}

impl<E: UiElement + 'static> DonationModal<E> {
    /// The confirm button's current markup becomes the label restored on every open.
    pub fn new(
        els: DonationElements<E>,
        cfg: DonationConfig,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        let default_label = els
            .process
            .as_ref()
            .map(|b| b.inner_html())
            .unwrap_or_default();
        Rc::new(Self {
            els,
            cfg,
            scheduler,
            default_label,
            state: Cell::new(DonationState::default()),
            pending: RefCell::new(None),
        })
    }

    pub fn state(&self) -> DonationState {
        self.state.get()
    }

    pub fn elements(&self) -> &DonationElements<E> {
        &self.els
    }

    pub fn has_pending_payment(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn open(&self) {
        if self.cfg.cancel_stale_payment {
            if let Some((_, handle)) = self.pending.borrow_mut().take() {
                self.scheduler.cancel(handle);
                tracing::debug!("cancelled stale payment");
            }
        }

        let mut state = self.state.get();
        let session = state.open();
        self.state.set(state);

        set_display(&self.els.modal, true, &self.cfg.modal_display);
        self.render_step(Step::Form);
        self.render_button(ButtonState::Ready);
        self.render_selection(None);
        tracing::debug!("donation modal opened: session={}", session.0);
    }

    pub fn close(&self) {
        let mut state = self.state.get();
        state.close();
        self.state.set(state);
        set_display(&self.els.modal, false, &self.cfg.modal_display);
        tracing::debug!("donation modal closed");
    }

    /// Close only when the click landed on the backdrop. Returns whether it closed.
    pub fn handle_overlay_click(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop => {
                self.close();
                true
            }
            ClickTarget::Content => false,
        }
    }

    pub fn select_amount(&self, index: usize) {
        if index >= self.els.amounts.len() {
            return;
        }
        let mut state = self.state.get();
        state.select(index);
        self.state.set(state);
        self.render_selection(Some(index));
    }

    /// Start the simulated payment. Returns `false` when there is no confirm
    /// button or a payment is already processing.
    pub fn process_payment(self: &Rc<Self>) -> bool {
        if self.els.process.is_none() {
            return false;
        }
        let mut state = self.state.get();
        let Some(session) = state.begin_payment() else {
            return false;
        };
        self.state.set(state);
        self.render_button(ButtonState::Processing);

        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.scheduler.set_timeout(
            self.cfg.payment_delay(),
            Box::new(move || {
                if let Some(this) = weak.upgrade() {
                    this.finish_payment(session);
                }
            }),
        );
        *self.pending.borrow_mut() = Some((session, handle));
        tracing::debug!("payment processing: session={}", session.0);
        true
    }

    fn finish_payment(&self, session: SessionId) {
        {
            let mut pending = self.pending.borrow_mut();
            if matches!(*pending, Some((s, _)) if s == session) {
                *pending = None;
            }
        }

        let mut state = self.state.get();
        let advanced = state.complete_payment(session, self.cfg.cancel_stale_payment);
        self.state.set(state);
        if advanced {
            self.render_step(Step::Success);
            tracing::info!("donation complete: session={}", session.0);
        }
    }

    fn render_step(&self, step: Step) {
        // The success step is only swapped in when both containers exist.
        let (Some(form), Some(success)) = (&self.els.step_form, &self.els.step_success) else {
            return;
        };
        set_display(form, step == Step::Form, &self.cfg.step_display);
        set_display(success, step == Step::Success, &self.cfg.step_display);
    }

    fn render_button(&self, button: ButtonState) {
        let Some(btn) = &self.els.process else {
            return;
        };
        match button {
            ButtonState::Ready => {
                btn.set_disabled(false);
                btn.set_inner_html(&self.default_label);
                btn.set_style("opacity", "1");
            }
            ButtonState::Processing => {
                btn.set_disabled(true);
                btn.set_inner_html(&self.cfg.processing_label);
                btn.set_style("opacity", &self.cfg.dimmed_opacity);
            }
        }
    }

    fn render_selection(&self, selected: Option<usize>) {
        for b in &self.els.amounts {
            b.remove_class(&self.cfg.selected_class);
        }
        if let Some(b) = selected.and_then(|i| self.els.amounts.get(i)) {
            b.add_class(&self.cfg.selected_class);
        }
    }
}
