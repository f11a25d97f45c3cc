// ============================================================================
// DASHBOARD VIEW - "Validations" (administration RH)
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::App;
use crate::dom::{field_value, on_click, ElementBuilder};
use crate::models::{Bill, BillStatus};
use crate::state::BillsPage;
use crate::utils::{field, DASHBOARD_TITLE};
use crate::viewmodels::dashboard_viewmodel::{count_by_status, filter_bills};

const ADMIN_COMMENT: &str = "commentary2";

pub fn render_dashboard(app: &Rc<App>) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("div")?
        .class("content-title")
        .text(DASHBOARD_TITLE)
        .build();

    let page = app.state().dashboard_page.borrow().clone();
    let body = match page {
        BillsPage::Loading => ElementBuilder::new("div")?
            .attr("id", "loading")?
            .text("Loading...")
            .build(),
        BillsPage::Failed(message) => super::bills::render_error(&message)?,
        BillsPage::Loaded(bills) => render_board(app, &bills)?,
    };

    let mut container = ElementBuilder::new("div")?
        .class("dashboard-page")
        .children(vec![title, body])?;
    if let Some(url) = app.state().proof_modal.borrow().clone() {
        container = container.child(super::bills::render_proof_modal(app, &url)?)?;
    }
    Ok(container.build())
}

fn render_board(app: &Rc<App>, bills: &[Bill]) -> Result<Element, JsValue> {
    let selected = *app.state().dashboard_filter.borrow();
    let (pending, accepted, refused) = count_by_status(bills);

    let mut tabs = ElementBuilder::new("div")?.class("status-tabs");
    for (index, (status, count)) in [
        (BillStatus::Pending, pending),
        (BillStatus::Accepted, accepted),
        (BillStatus::Refused, refused),
    ]
    .into_iter()
    .enumerate()
    {
        let class = if status == selected { "status-tab active" } else { "status-tab" };
        let tab = ElementBuilder::new("div")?
            .class(class)
            .attr("id", &format!("arrow-icon{}", index + 1))?
            .text(&format!("{} ({})", status.label(), count))
            .build();
        let app = app.clone();
        on_click(&tab, move |_| app.state().set_dashboard_filter(status))?;
        tabs = tabs.child(tab)?;
    }

    let mut list = ElementBuilder::new("div")?.class("bills-list");
    for bill in filter_bills(bills, selected) {
        list = list.child(render_card(app, &bill)?)?;
    }

    ElementBuilder::new("div")?
        .class("dashboard-board")
        .children(vec![tabs.build(), list.build()])
        .map(|builder| builder.build())
}

fn render_card(app: &Rc<App>, bill: &Bill) -> Result<Element, JsValue> {
    let summary = format!("{} · {} · {} · {} €", bill.email, bill.name, bill.date, bill.amount);
    let mut card = ElementBuilder::new("div")?
        .class("bill-card")
        .attr("id", &format!("open-bill{}", bill.id))?
        .child(ElementBuilder::new("p")?.text(&summary).build())?
        .child(ElementBuilder::new("p")?.class("bill-status").text(bill.status.label()).build())?;

    if !bill.commentary.is_empty() {
        card = card.child(ElementBuilder::new("p")?.class("bill-commentary").text(&bill.commentary).build())?;
    }

    if let Some(url) = bill.file_url.clone() {
        let eye = ElementBuilder::new("div")?
            .class("icon-eye-d")
            .attr(field::BILL_URL_ATTR, &url)?
            .text("👁")
            .build();
        let app = app.clone();
        on_click(&eye, move |_| {
            let command = app.bills().handle_click_icon_eye(&url);
            super::dispatch(&app, vec![command]);
        })?;
        card = card.child(eye)?;
    }

    match (&bill.status, &bill.comment_admin) {
        (BillStatus::Pending, _) => card = card.child(render_decision(app, bill)?)?,
        (_, Some(comment)) if !comment.is_empty() => {
            card = card.child(ElementBuilder::new("p")?.class("bill-comment-admin").text(comment).build())?;
        }
        _ => {}
    }

    Ok(card.build())
}

/// Commentaire + Accepter/Refuser, solo en notas en attente
fn render_decision(app: &Rc<App>, bill: &Bill) -> Result<Element, JsValue> {
    let comment = ElementBuilder::new("textarea")?
        .class("form-control")
        .test_id(ADMIN_COMMENT)?
        .build();
    let accept = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("id", "btn-accept-bill")?
        .text("Accepter")
        .build();
    let refuse = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("id", "btn-refuse-bill")?
        .text("Refuser")
        .build();

    let container = ElementBuilder::new("div")?
        .class("bill-decision")
        .children(vec![comment, accept.clone(), refuse.clone()])?
        .build();

    for (button, status) in [(accept, BillStatus::Accepted), (refuse, BillStatus::Refused)] {
        let app = app.clone();
        let bill = bill.clone();
        let scope = container.clone();
        on_click(&button, move |_| {
            let comment = field_value(&scope, ADMIN_COMMENT);
            let app = app.clone();
            let bill = bill.clone();
            spawn_local(async move {
                let result = match status {
                    BillStatus::Accepted => app.dashboard().handle_accept(&bill, &comment).await,
                    _ => app.dashboard().handle_refuse(&bill, &comment).await,
                };
                match result {
                    Ok(commands) => super::dispatch(&app, commands),
                    Err(e) => log::error!("❌ [DASHBOARD] Decisión sobre {} fallida: {}", bill.id, e),
                }
            });
        })?;
    }

    Ok(container)
}
