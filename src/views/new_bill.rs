// ============================================================================
// NEW BILL VIEW - "Envoyer une note de frais"
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, File, HtmlInputElement};
use crate::app::App;
use crate::dom::{field_value, on_change, on_submit, ElementBuilder};
use crate::models::UploadedFile;
use crate::state::Command;
use crate::utils::{field, NEW_BILL_TITLE};
use crate::viewmodels::NewBillForm;

const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

pub fn render_new_bill(app: &Rc<App>) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("div")?
        .class("content-title")
        .text(NEW_BILL_TITLE)
        .build();

    let mut expense_type = ElementBuilder::new("select")?
        .class("form-control")
        .attr("required", "")?
        .test_id(field::EXPENSE_TYPE)?;
    for option in EXPENSE_TYPES {
        expense_type = expense_type.child(ElementBuilder::new("option")?.text(option).build())?;
    }

    let file_input = input(field::FILE, "file", "")?;
    if let (Some(message), Some(element)) = (
        app.state().file_validity.borrow().clone(),
        file_input.dyn_ref::<HtmlInputElement>(),
    ) {
        element.set_custom_validity(&message);
    }
    {
        let app = app.clone();
        let target = file_input.clone();
        on_change(&file_input, move |_| {
            let Some(input) = target.dyn_ref::<HtmlInputElement>().cloned() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let app = app.clone();
            spawn_local(async move {
                let upload = match read_file(&file).await {
                    Ok(upload) => upload,
                    Err(e) => {
                        log::error!("❌ [NEW BILL] No se pudo leer {}: {:?}", file.name(), e);
                        return;
                    }
                };
                let commands = app.new_bill().handle_change_file(upload).await;
                apply_file_validity(&input, &commands);
                super::dispatch(&app, commands);
            });
        })?;
    }

    let form = ElementBuilder::new("form")?
        .class("form-newbill-container content-inner")
        .test_id(field::NEW_BILL_FORM)?
        .children(vec![
            group("Type de dépense", expense_type.build())?,
            group("Nom de la dépense", input(field::EXPENSE_NAME, "text", "Vol Paris Londres")?)?,
            group("Date", input(field::DATEPICKER, "date", "")?)?,
            group("Montant TTC", input(field::AMOUNT, "number", "348")?)?,
            group("TVA", input(field::VAT, "number", "70")?)?,
            group("%", input(field::PCT, "number", "20")?)?,
            group(
                "Commentaire",
                ElementBuilder::new("textarea")?
                    .class("form-control")
                    .attr("rows", "3")?
                    .test_id(field::COMMENTARY)?
                    .build(),
            )?,
            group("Justificatif", file_input)?,
            ElementBuilder::new("button")?
                .class("btn btn-primary")
                .attr("type", "submit")?
                .attr("id", "btn-send-bill")?
                .text("Envoyer")
                .build(),
        ])?
        .build();

    {
        let app = app.clone();
        let scope = form.clone();
        on_submit(&form, move |_| {
            let values = read_form(&scope);
            let app = app.clone();
            spawn_local(async move {
                let commands = app.new_bill().handle_submit(&values).await;
                super::dispatch(&app, commands);
            });
        })?;
    }

    ElementBuilder::new("div")?
        .class("new-bill-page")
        .children(vec![title, form])
        .map(|builder| builder.build())
}

fn read_form(scope: &Element) -> NewBillForm {
    NewBillForm {
        expense_type: field_value(scope, field::EXPENSE_TYPE),
        expense_name: field_value(scope, field::EXPENSE_NAME),
        date: field_value(scope, field::DATEPICKER),
        amount: field_value(scope, field::AMOUNT),
        vat: field_value(scope, field::VAT),
        pct: field_value(scope, field::PCT),
        commentary: field_value(scope, field::COMMENTARY),
    }
}

async fn read_file(file: &File) -> Result<UploadedFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(UploadedFile::new(&file.name(), bytes))
}

/// Mensaje de validación nativo del input; vacío lo vuelve válido
fn apply_file_validity(input: &HtmlInputElement, commands: &[Command]) {
    for command in commands {
        if let Command::SetFileValidity(message) = command {
            input.set_custom_validity(message.as_deref().unwrap_or(""));
            if message.is_some() {
                input.set_value("");
                input.report_validity();
            }
        }
    }
}

fn input(test_id: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    let mut builder = ElementBuilder::new("input")?
        .class("form-control")
        .attr("type", input_type)?
        .test_id(test_id)?;
    if !placeholder.is_empty() {
        builder = builder.attr("placeholder", placeholder)?;
    }
    if test_id != field::PCT && test_id != field::EXPENSE_NAME {
        builder = builder.attr("required", "")?;
    }
    Ok(builder.build())
}

fn group(label: &str, control: Element) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .class("bold-label")
        .text(label)
        .build();
    ElementBuilder::new("div")?
        .class("form-group")
        .children(vec![label, control])
        .map(|builder| builder.build())
}
