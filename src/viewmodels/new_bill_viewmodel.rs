// ============================================================================
// NEW BILL VIEWMODEL - Justificatif + envío de una nueva nota de frais
// ============================================================================
// El estado (file_url, file_name, bill_id) solo cambia después de que la
// subida termine; dos cambios de archivo seguidos pueden pisarse.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use crate::app::Route;
use crate::config::CONFIG;
use crate::errors::StoreError;
use crate::models::{normalize_file_url, Bill, BillStatus, BillUpdate, BillUpload, UploadedFile};
use crate::services::store::StoreHandle;
use crate::state::Command;
use crate::stores::SessionStore;
use crate::utils::{parse_int, INVALID_FILE_MESSAGE};

/// Valores crudos del formulario `form-new-bill`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub expense_name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

pub struct NewBillViewModel {
    store: StoreHandle,
    session: SessionStore,
    pub file_url: Rc<RefCell<Option<String>>>,
    pub file_name: Rc<RefCell<Option<String>>>,
    pub bill_id: Rc<RefCell<Option<String>>>,
}

impl NewBillViewModel {
    pub fn new(store: StoreHandle, session: SessionStore) -> Self {
        Self {
            store,
            session,
            file_url: Rc::new(RefCell::new(None)),
            file_name: Rc::new(RefCell::new(None)),
            bill_id: Rc::new(RefCell::new(None)),
        }
    }

    pub fn file_url(&self) -> Option<String> {
        self.file_url.borrow().clone()
    }

    pub fn file_name(&self) -> Option<String> {
        self.file_name.borrow().clone()
    }

    pub fn bill_id(&self) -> Option<String> {
        self.bill_id.borrow().clone()
    }

    /// Formulario vacío en cada visita a la página
    pub fn reset(&self) {
        self.file_url.borrow_mut().take();
        self.file_name.borrow_mut().take();
        self.bill_id.borrow_mut().take();
    }

    /// Extensión rechazada: un único mensaje de validación y nada más.
    /// Aceptada: se limpia el mensaje y se sube el archivo con el email de la sesión.
    pub async fn handle_change_file(&self, file: UploadedFile) -> Vec<Command> {
        if !file.has_accepted_extension() {
            log::warn!("⚠️ [NEW BILL] Extensión rechazada: {:?}", file.name);
            return vec![Command::SetFileValidity(Some(INVALID_FILE_MESSAGE.to_string()))];
        }

        let commands = vec![Command::SetFileValidity(None)];
        let Some(store) = self.store.clone() else {
            log::warn!("⚠️ [NEW BILL] Sin store configurado, {} no se sube", file.name);
            return commands;
        };

        let upload = BillUpload {
            file: file.clone(),
            email: self.session.current_email(),
        };
        match store.bills().create(upload).await {
            Ok(created) => {
                log::info!("📎 [NEW BILL] Justificatif {} subido ({})", file.name, created.key);
                *self.bill_id.borrow_mut() = Some(created.key);
                *self.file_url.borrow_mut() = Some(normalize_file_url(&created.file_url));
                *self.file_name.borrow_mut() = Some(file.name);
            }
            Err(e) => {
                log::error!("❌ [NEW BILL] Error subiendo {}: {}", file.name, e);
            }
        }
        commands
    }

    /// Nota de frais a partir del formulario y del justificatif ya subido
    pub fn build_bill(&self, form: &NewBillForm) -> Bill {
        Bill {
            id: self.bill_id().unwrap_or_default(),
            email: self.session.current_email(),
            expense_type: form.expense_type.clone(),
            name: form.expense_name.clone(),
            amount: parse_int(&form.amount).unwrap_or(0) as f64,
            date: form.date.clone(),
            vat: form.vat.clone(),
            pct: parse_int(&form.pct).unwrap_or(CONFIG.default_pct),
            commentary: form.commentary.clone(),
            comment_admin: None,
            file_url: self.file_url(),
            file_name: self.file_name(),
            status: BillStatus::Pending,
        }
    }

    /// Envía la nota y vuelve a la lista; un fallo del update solo se registra
    pub async fn handle_submit(&self, form: &NewBillForm) -> Vec<Command> {
        let bill = self.build_bill(form);
        match self.update_bill(bill) {
            Some(update) => {
                if let Err(e) = update.await {
                    log::error!("❌ [NEW BILL] Error actualizando la nota de frais: {}", e);
                }
            }
            None => log::warn!("⚠️ [NEW BILL] Sin store configurado, la nota no se envía"),
        }
        vec![Command::Navigate(Route::Bills)]
    }

    /// `bills().update` indexado por `bill_id`. `None` si no hay store.
    pub fn update_bill(&self, bill: Bill) -> Option<impl Future<Output = Result<Bill, StoreError>>> {
        let store = self.store.clone()?;
        let selector = self.bill_id();
        Some(async move {
            match selector {
                Some(selector) => store.bills().update(BillUpdate { selector, data: bill }).await,
                None => Err(StoreError::MissingSelector),
            }
        })
    }
}
