// ============================================================================
// LOGIN VIEW - Formularios employé / administration RH
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::App;
use crate::dom::{field_value, on_submit, ElementBuilder};
use crate::models::{LoginForm, UserType};
use crate::utils::field;

/// Renderizar vista de login
pub fn render_login(app: &Rc<App>) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login() llamado");

    let employee = render_form(app, UserType::Employee)?;
    let admin = render_form(app, UserType::Admin)?;

    let title = ElementBuilder::new("h2")?
        .class("login-title")
        .text("Billed")
        .build();

    let forms = ElementBuilder::new("div")?
        .class("login-forms")
        .children(vec![employee, admin])?
        .build();

    ElementBuilder::new("div")?
        .class("login-screen")
        .children(vec![title, forms])
        .map(|builder| builder.build())
}

fn render_form(app: &Rc<App>, user_type: UserType) -> Result<Element, JsValue> {
    let (heading, form_id, email_id, password_id) = match user_type {
        UserType::Employee => ("Employé", field::EMPLOYEE_FORM, field::EMPLOYEE_EMAIL, field::EMPLOYEE_PASSWORD),
        UserType::Admin => ("Administration", field::ADMIN_FORM, field::ADMIN_EMAIL, field::ADMIN_PASSWORD),
    };
    let prefix = user_type.form_prefix();

    let email = input_group("Votre email", "email", email_id, "johndoe@email.com")?;
    let password = input_group("Mot de passe", "password", password_id, "******")?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .attr("id", &format!("{}-login-button", prefix))?
        .text("Se connecter")
        .build();

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .test_id(form_id)?
        .child(ElementBuilder::new("h3")?.text(heading).build())?
        .children(vec![email, password, submit])?
        .build();

    {
        let app = app.clone();
        let scope = form.clone();
        on_submit(&form, move |_| {
            let login = LoginForm {
                email: field_value(&scope, email_id),
                password: field_value(&scope, password_id),
            };
            let app = app.clone();
            spawn_local(async move {
                log::info!("🔐 [LOGIN] Iniciando login {:?}...", user_type);
                let submission = match user_type {
                    UserType::Employee => app.auth().handle_submit_employee(&login).await,
                    UserType::Admin => app.auth().handle_submit_admin(&login).await,
                };
                log::info!("🔐 [LOGIN] Resultado: {:?}", submission.outcome);
                super::dispatch(&app, submission.commands);
            });
        })?;
    }

    Ok(form)
}

fn input_group(label: &str, input_type: &str, test_id: &str, placeholder: &str) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .class("form-label")
        .text(label)
        .build();

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("required", "")?
        .test_id(test_id)?
        .build();

    ElementBuilder::new("div")?
        .class("form-group")
        .children(vec![label, input])
        .map(|builder| builder.build())
}
