//! # Page Layout
//!
//! The fixed page: which views exist, what controls and output targets live
//! in each, and the table binding every control to its endpoint.
//!
//! ```text
//! view-home ── nav-system  ──▶ view-system   (registration)
//!           ── nav-founder ──▶ view-founder  (mint, roles, queries, audit)
//!           ── nav-admin   ──▶ view-admin    (lookup, transfer, freeze)
//!           ── nav-user    ──▶ view-user     (lookup, transfer, queries)
//!           ── nav-cluster ──▶ view-cluster  (raft membership)
//! ```
//!
//! Every non-home view carries a `<name>-back` trigger leading home. The
//! theme toggle sits in the header and stays reachable from every view.

use crate::repl::models::{Document, Element, FormField, ViewNode};
use crate::repl::view_models::{
    BinderRegistry, Binding, PayloadShape, ThemeManager, ViewRouter, HOME_VIEW,
};

pub const PAGE_TITLE: &str = "Ledger Console";

/// Header control flipping the colour scheme
pub const THEME_TOGGLE: &str = "theme-toggle";

/// Button refreshing the consensus status, also fired once at startup
pub const STATUS_BUTTON: &str = "refresh-status";

/// Output holding the consensus status
pub const STATUS_TARGET: &str = "raft-status";

/// Secondary views reachable from home: (view id, short name, title)
const SECTIONS: [(&str, &str, &str); 5] = [
    ("view-system", "system", "System"),
    ("view-founder", "founder", "Founder"),
    ("view-admin", "admin", "Administrator"),
    ("view-user", "user", "User"),
    ("view-cluster", "cluster", "Cluster"),
];

fn transfer_fields() -> Vec<FormField> {
    vec![
        FormField::new("sender", "Sender"),
        FormField::new("receiver", "Receiver"),
        FormField::new("amount", "Amount"),
        FormField::new("nonce", "Nonce"),
        FormField::new("key", "Private key").secret(),
    ]
}

fn role_fields() -> Vec<FormField> {
    vec![
        FormField::new("creator", "Creator address"),
        FormField::new("target", "Target address"),
        FormField::new("key", "Private key").secret(),
    ]
}

fn freeze_fields() -> Vec<FormField> {
    vec![
        FormField::new("admin", "Admin address"),
        FormField::new("target", "Target address"),
        FormField::new("key", "Private key").secret(),
    ]
}

fn query_fields() -> Vec<FormField> {
    vec![
        FormField::new("address", "Address"),
        FormField::new("key", "Private key").secret(),
    ]
}

fn lookup_fields() -> Vec<FormField> {
    vec![FormField::new("address", "Address")]
}

/// Output id paired with a control: `user-transfer-form` -> `user-transfer-result`
pub fn result_id(control: &str) -> String {
    let base = control
        .strip_suffix("-form")
        .or_else(|| control.strip_suffix("-btn"))
        .unwrap_or(control);
    format!("{base}-result")
}

fn form_with_result(view: ViewNode, id: &str, submit: &str, fields: Vec<FormField>) -> ViewNode {
    view.with(Element::form(id, submit, fields))
        .with(Element::output(result_id(id)))
}

/// Build the page with every view hidden
pub fn build_page() -> Document {
    let mut doc = Document::new(PAGE_TITLE);
    doc.add_header_element(Element::button(THEME_TOGGLE, "Toggle theme"));

    let mut home = ViewNode::new(HOME_VIEW, PAGE_TITLE);
    for (view_id, name, title) in SECTIONS {
        home = home.with(Element::link(format!("nav-{name}"), title, view_id));
    }
    home = home
        .with(Element::button(STATUS_BUTTON, "Refresh status"))
        .with(Element::output(STATUS_TARGET));
    doc.add_view(home);

    let [system, founder, admin, user, cluster] =
        SECTIONS.map(|(id, name, title)| ViewNode::new(id, title).with(Element::back(format!("{name}-back"))));

    doc.add_view(
        system
            .with(Element::button("system-register-btn", "Register account"))
            .with(Element::output(result_id("system-register-btn"))),
    );

    let founder = form_with_result(founder, "founder-mint-form", "Mint", transfer_fields());
    let founder = form_with_result(founder, "founder-promote-form", "Promote", role_fields());
    let founder = form_with_result(founder, "founder-demote-form", "Demote", role_fields());
    let founder = form_with_result(founder, "founder-query-form", "Query", query_fields());
    let founder = form_with_result(
        founder,
        "founder-audit-form",
        "Fetch entry",
        vec![FormField::new("index", "Audit index")],
    );
    doc.add_view(founder);

    let admin = form_with_result(admin, "admin-account-form", "Look up", lookup_fields());
    let admin = form_with_result(admin, "admin-transfer-form", "Transfer", transfer_fields());
    let admin = form_with_result(admin, "admin-freeze-form", "Freeze", freeze_fields());
    let admin = form_with_result(admin, "admin-unfreeze-form", "Unfreeze", freeze_fields());
    let admin = form_with_result(admin, "admin-query-form", "Query", query_fields());
    doc.add_view(admin);

    let user = form_with_result(user, "user-account-form", "Look up", lookup_fields());
    let user = form_with_result(user, "user-transfer-form", "Transfer", transfer_fields());
    let user = form_with_result(user, "user-query-form", "Query", query_fields());
    doc.add_view(user);

    let cluster = form_with_result(
        cluster,
        "cluster-join-form",
        "Join",
        vec![
            FormField::new("node_id", "Node id"),
            FormField::new("raft_address", "Raft address"),
        ],
    );
    let cluster = form_with_result(
        cluster,
        "cluster-remove-form",
        "Remove",
        vec![FormField::new("node_id", "Node id")],
    );
    doc.add_view(cluster);

    doc
}

fn transfer_shape() -> PayloadShape {
    PayloadShape::new()
        .text("sender", "sender")
        .text("receiver", "receiver")
        .number("amount", "amount")
        .number("nonce", "nonce")
        .text("private_key", "key")
}

fn role_shape() -> PayloadShape {
    PayloadShape::new()
        .text("creator_address", "creator")
        .text("target_address", "target")
        .text("private_key", "key")
}

fn freeze_shape() -> PayloadShape {
    PayloadShape::new()
        .text("sender", "admin")
        .text("receiver", "target")
        .zero("amount")
        .zero("nonce")
        .text("private_key", "key")
}

fn query_shape() -> PayloadShape {
    PayloadShape::new()
        .text("requester_address", "address")
        .text("private_key", "key")
}

fn form(control: &str, path: &str, payload: PayloadShape, busy: &str) -> Binding {
    Binding::form(control, &result_id(control), path, payload).busy(busy)
}

fn lookup(control: &str, template: &str) -> Binding {
    Binding::lookup(control, &result_id(control), template)
}

/// Every control-to-endpoint binding on the page
pub fn standard_bindings() -> Vec<Binding> {
    vec![
        Binding::status(STATUS_BUTTON, STATUS_TARGET, "/raft/status"),
        Binding::button(
            "system-register-btn",
            &result_id("system-register-btn"),
            "/accounts/register",
        )
        .busy("registering"),
        form("founder-mint-form", "/transactions/mint", transfer_shape(), "submitting"),
        form("founder-promote-form", "/accounts/promote", role_shape(), "executing"),
        form("founder-demote-form", "/accounts/demote", role_shape(), "executing"),
        form("founder-query-form", "/transactions/query", query_shape(), "querying"),
        lookup("founder-audit-form", "/audit/{index}"),
        lookup("admin-account-form", "/accounts/{address}"),
        form("admin-transfer-form", "/transactions/transfer", transfer_shape(), "sending"),
        form("admin-freeze-form", "/transactions/freeze", freeze_shape(), "executing"),
        form("admin-unfreeze-form", "/transactions/unfreeze", freeze_shape(), "executing"),
        form("admin-query-form", "/transactions/query", query_shape(), "querying"),
        lookup("user-account-form", "/accounts/{address}"),
        form("user-transfer-form", "/transactions/transfer", transfer_shape(), "sending"),
        form("user-query-form", "/transactions/query", query_shape(), "querying"),
        form(
            "cluster-join-form",
            "/raft/join",
            PayloadShape::new()
                .text("node_id", "node_id")
                .text("raft_address", "raft_address"),
            "submitting",
        ),
        form(
            "cluster-remove-form",
            "/raft/remove",
            PayloadShape::new().text("node_id", "node_id"),
            "submitting",
        ),
    ]
}

/// Attach navigation, theme and binding listeners to the page
pub fn wire(
    doc: &mut Document,
    router: &ViewRouter,
    registry: &mut BinderRegistry,
    theme: &ThemeManager,
    bindings: Vec<Binding>,
) {
    for (view_id, name, _) in SECTIONS {
        router.register_trigger(doc, &format!("nav-{name}"), view_id);
        router.register_back(doc, &format!("{name}-back"));
    }
    theme.register_toggle(doc, THEME_TOGGLE);

    let total = bindings.len();
    let registered = bindings
        .into_iter()
        .filter_map(|binding| registry.register(doc, binding))
        .count();
    tracing::debug!("wired {}/{} bindings", registered, total);
}
