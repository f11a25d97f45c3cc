// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::app::Route;
use crate::models::{Bill, BillStatus};

/// Contenido de una página que depende de `bills().list()`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BillsPage {
    #[default]
    Loading,
    Loaded(Vec<Bill>),
    /// Mensaje mostrado tal cual ("Erreur 404", "Erreur 500"...)
    Failed(String),
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub route: Rc<RefCell<Route>>,
    pub background_color: Rc<RefCell<Option<String>>>,
    pub auth_warning: Rc<RefCell<Option<String>>>,

    // Páginas
    pub bills_page: Rc<RefCell<BillsPage>>,
    pub dashboard_page: Rc<RefCell<BillsPage>>,
    pub dashboard_filter: Rc<RefCell<BillStatus>>,

    // UI Visibility
    pub proof_modal: Rc<RefCell<Option<String>>>,
    pub file_validity: Rc<RefCell<Option<String>>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            route: Rc::new(RefCell::new(Route::Login)),
            background_color: Rc::new(RefCell::new(None)),
            auth_warning: Rc::new(RefCell::new(None)),
            bills_page: Rc::new(RefCell::new(BillsPage::Loading)),
            dashboard_page: Rc::new(RefCell::new(BillsPage::Loading)),
            dashboard_filter: Rc::new(RefCell::new(BillStatus::Pending)),
            proof_modal: Rc::new(RefCell::new(None)),
            file_validity: Rc::new(RefCell::new(None)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
        // Cada navegación cierra el modal y limpia la validación del formulario
        *self.proof_modal.borrow_mut() = None;
        *self.file_validity.borrow_mut() = None;
        self.notify_subscribers();
    }

    pub fn set_background_color(&self, color: &str) {
        *self.background_color.borrow_mut() = Some(color.to_string());
        self.notify_subscribers();
    }

    pub fn set_bills_page(&self, page: BillsPage) {
        *self.bills_page.borrow_mut() = page;
        self.notify_subscribers();
    }

    pub fn set_dashboard_page(&self, page: BillsPage) {
        *self.dashboard_page.borrow_mut() = page;
        self.notify_subscribers();
    }

    pub fn set_dashboard_filter(&self, status: BillStatus) {
        *self.dashboard_filter.borrow_mut() = status;
        self.notify_subscribers();
    }

    pub fn set_proof_modal(&self, file_url: Option<String>) {
        *self.proof_modal.borrow_mut() = file_url;
        self.notify_subscribers();
    }

    /// Sin notificar: el input `file` aplica el mensaje directamente y un
    /// re-render vaciaría el formulario
    pub fn set_file_validity(&self, message: Option<String>) {
        *self.file_validity.borrow_mut() = message;
    }

    pub fn set_auth_warning(&self, warning: Option<String>) {
        *self.auth_warning.borrow_mut() = warning;
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        // Copia para que un callback pueda suscribir otro sin doble borrow
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers.iter() {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
