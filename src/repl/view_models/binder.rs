//! # Binder Registry
//!
//! A binding wires one control (a button or a form) to one API call and one
//! output target. Every binding runs the same lifecycle:
//!
//! ```text
//!   idle ──click/submit──▶ in-flight ──outcome──▶ settled (= idle)
//!          begin():                     settle():
//!          - read form fields           - render value or error
//!          - disable button, busy text  - re-enable button, restore label
//!          - build request
//! ```
//!
//! [`BinderRegistry::begin`] and [`BinderRegistry::settle`] are split so the
//! controller can run the network call on its own task; [`BinderRegistry::invoke`]
//! runs the whole cycle inline.

use super::payload::{PathTemplate, PayloadShape};
use super::renderer;
use crate::repl::events::{BindingId, EventKind, Listener};
use crate::repl::models::{Document, FormData};
use crate::repl::services::{ApiRequest, Method, RequestOutcome, Transport};

/// Fallback text for a failed status refresh
pub const STATUS_UNAVAILABLE: &str = "status unavailable";

/// What kind of control fires the binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Click on a button; the button is locked while in flight
    Button,
    /// Form submission; the form stays live while in flight
    Form,
}

impl TriggerKind {
    fn event_kind(&self) -> EventKind {
        match self {
            TriggerKind::Button => EventKind::Click,
            TriggerKind::Form => EventKind::Submit,
        }
    }
}

/// How a settled outcome is drawn into the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Generic JSON projection
    Structured,
    /// Pretty JSON text, with a fixed fallback for empty errors
    PrettyJson { fallback: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub control: String,
    pub trigger: TriggerKind,
    pub target: String,
    pub method: Method,
    pub path: PathTemplate,
    pub payload: PayloadShape,
    pub busy_text: String,
    pub presentation: Presentation,
}

impl Binding {
    /// Button that POSTs without a body
    pub fn button(control: &str, target: &str, path: &str) -> Self {
        Self {
            control: control.to_string(),
            trigger: TriggerKind::Button,
            target: target.to_string(),
            method: Method::Post,
            path: PathTemplate::new(path),
            payload: PayloadShape::new(),
            busy_text: "working".to_string(),
            presentation: Presentation::Structured,
        }
    }

    /// Form that POSTs a body built from `payload`
    pub fn form(control: &str, target: &str, path: &str, payload: PayloadShape) -> Self {
        Self {
            control: control.to_string(),
            trigger: TriggerKind::Form,
            target: target.to_string(),
            method: Method::Post,
            path: PathTemplate::new(path),
            payload,
            busy_text: "submitting".to_string(),
            presentation: Presentation::Structured,
        }
    }

    /// Form that GETs a path filled from its fields, e.g. `/accounts/{address}`
    pub fn lookup(control: &str, target: &str, template: &str) -> Self {
        Self {
            control: control.to_string(),
            trigger: TriggerKind::Form,
            target: target.to_string(),
            method: Method::Get,
            path: PathTemplate::new(template),
            payload: PayloadShape::new(),
            busy_text: "querying".to_string(),
            presentation: Presentation::Structured,
        }
    }

    /// Button that GETs a status document and shows it as pretty JSON
    pub fn status(control: &str, target: &str, path: &str) -> Self {
        Self {
            control: control.to_string(),
            trigger: TriggerKind::Button,
            target: target.to_string(),
            method: Method::Get,
            path: PathTemplate::new(path),
            payload: PayloadShape::new(),
            busy_text: "refreshing".to_string(),
            presentation: Presentation::PrettyJson {
                fallback: STATUS_UNAVAILABLE.to_string(),
            },
        }
    }

    pub fn busy(mut self, text: &str) -> Self {
        self.busy_text = text.to_string();
        self
    }
}

/// A binding that has entered the in-flight state
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCall {
    pub binding: BindingId,
    pub request: ApiRequest,
    /// Button label to put back on settlement
    restore_label: Option<String>,
}

/// All bindings registered on the page
#[derive(Debug, Clone, Default)]
pub struct BinderRegistry {
    bindings: Vec<Binding>,
}

impl BinderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.0)
    }

    /// Find the binding attached to a control
    pub fn find(&self, control: &str) -> Option<BindingId> {
        self.bindings
            .iter()
            .position(|b| b.control == control)
            .map(BindingId)
    }

    /// Register a binding and attach its listener.
    ///
    /// Does nothing when the control or the target is not on the page.
    pub fn register(&mut self, doc: &mut Document, binding: Binding) -> Option<BindingId> {
        let control_present = match binding.trigger {
            TriggerKind::Button => doc.button(&binding.control).is_some(),
            TriggerKind::Form => doc.form(&binding.control).is_some(),
        };
        if !control_present || doc.target(&binding.target).is_none() {
            tracing::debug!(
                "binding {} -> {} skipped: control or target not on page",
                binding.control,
                binding.target
            );
            return None;
        }

        let id = BindingId(self.bindings.len());
        doc.add_event_listener(
            &binding.control,
            binding.trigger.event_kind(),
            Listener::Bind(id),
        );
        tracing::debug!("registered {} on '{}' ({} {})", id, binding.control, binding.method, binding.path.as_str());
        self.bindings.push(binding);
        Some(id)
    }

    /// Enter the in-flight state and build the request.
    ///
    /// Returns `None` without touching the page when the button is already
    /// locked or a path field is empty.
    pub fn begin(&self, doc: &mut Document, id: BindingId) -> Option<PendingCall> {
        let binding = self.get(id)?;

        let data = match binding.trigger {
            TriggerKind::Button => {
                if doc.button(&binding.control)?.disabled {
                    tracing::debug!("{} ignored: '{}' is disabled", id, binding.control);
                    return None;
                }
                FormData::new()
            }
            TriggerKind::Form => doc.form(&binding.control)?.data(),
        };

        let Some(path) = binding.path.expand(&data) else {
            tracing::debug!(
                "{} aborted: empty field for {}",
                id,
                binding.path.as_str()
            );
            return None;
        };

        let restore_label = match binding.trigger {
            TriggerKind::Button => doc.button_mut(&binding.control).map(|button| {
                button.disabled = true;
                std::mem::replace(&mut button.label, binding.busy_text.clone())
            }),
            TriggerKind::Form => None,
        };
        if let Some(target) = doc.target_mut(&binding.target) {
            target.set_text(binding.busy_text.clone());
        }

        let request = match binding.method {
            Method::Get => ApiRequest::get(path),
            Method::Post => {
                let body = match binding.trigger {
                    TriggerKind::Form => Some(binding.payload.build(&data)),
                    TriggerKind::Button => None,
                };
                ApiRequest::post(path, body)
            }
        };
        tracing::debug!("{} in flight: {}", id, request);

        Some(PendingCall {
            binding: id,
            request,
            restore_label,
        })
    }

    /// Draw the outcome and leave the in-flight state
    pub fn settle(&self, doc: &mut Document, call: PendingCall, outcome: &RequestOutcome) {
        let Some(binding) = self.get(call.binding) else {
            tracing::warn!("settlement for unknown {}", call.binding);
            return;
        };

        if let RequestOutcome::Failure(message) = outcome {
            tracing::error!("{} failed: {}", call.request, message);
        }

        match doc.target_mut(&binding.target) {
            Some(target) => match (&binding.presentation, outcome) {
                (Presentation::Structured, RequestOutcome::Success(value)) => {
                    renderer::render(target, value)
                }
                (Presentation::Structured, RequestOutcome::Failure(message)) => {
                    renderer::render_error(target, message)
                }
                (Presentation::PrettyJson { .. }, RequestOutcome::Success(value)) => {
                    target.set_text(renderer::pretty(value))
                }
                (Presentation::PrettyJson { fallback }, RequestOutcome::Failure(message)) => {
                    target.set_text(if message.is_empty() {
                        fallback.as_str()
                    } else {
                        message.as_str()
                    })
                }
            },
            None => tracing::warn!("target '{}' disappeared before settlement", binding.target),
        }

        if let Some(label) = call.restore_label {
            if let Some(button) = doc.button_mut(&binding.control) {
                button.disabled = false;
                button.label = label;
            }
        }
    }

    /// Run a binding end to end against `transport`
    pub async fn invoke<T: Transport>(
        &self,
        doc: &mut Document,
        id: BindingId,
        transport: &T,
    ) -> Option<RequestOutcome> {
        let call = self.begin(doc, id)?;
        let outcome = transport.send(&call.request).await;
        self.settle(doc, call, &outcome);
        Some(outcome)
    }
}
