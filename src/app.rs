// ============================================================================
// APP - Navegación + ejecución de comandos
// ============================================================================
// Los handlers devuelven `Command`s; App los aplica sobre el estado y el
// storage. Las vistas (wasm32) solo leen AppState.
// ============================================================================

use std::rc::Rc;
use crate::errors::AppResult;
use crate::models::{Session, UserType};
use crate::services::{AuthService, StoreHandle};
use crate::state::{AppState, BillsPage, Command};
use crate::stores::SessionStore;
use crate::utils::{Storage, BILLS_TITLE, DASHBOARD_TITLE, NEW_BILL_TITLE};
use crate::viewmodels::{BillsViewModel, DashboardViewModel, NewBillViewModel};
use crate::viewmodels::bills_viewmodel::sort_for_display;

/// Rutas de la aplicación (hash routing)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }

    /// Ruta desconocida -> Login
    pub fn from_path(path: &str) -> Route {
        match path.trim() {
            "#employee/bills" => Route::Bills,
            "#employee/bill/new" => Route::NewBill,
            "#admin/dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            Route::Login => None,
            Route::Bills => Some(BILLS_TITLE),
            Route::NewBill => Some(NEW_BILL_TITLE),
            Route::Dashboard => Some(DASHBOARD_TITLE),
        }
    }

    /// Sin sesión solo hay Login; cada rol queda en sus propias páginas
    pub fn resolve(self, session: Option<&Session>) -> Route {
        match (self, session.map(|s| s.user_type)) {
            (Route::Login, _) => Route::Login,
            (_, None) => Route::Login,
            (Route::Dashboard, Some(UserType::Employee)) => Route::Bills,
            (Route::Bills | Route::NewBill, Some(UserType::Admin)) => Route::Dashboard,
            (route, Some(_)) => route,
        }
    }
}

/// Aplicación principal
pub struct App {
    state: AppState,
    sessions: SessionStore,
    auth: AuthService,
    bills: BillsViewModel,
    new_bill: NewBillViewModel,
    dashboard: DashboardViewModel,
}

impl App {
    pub fn new(storage: Rc<dyn Storage>, store: StoreHandle) -> Self {
        let sessions = SessionStore::new(storage);
        if store.is_none() {
            log::warn!("⚠️ [APP] Sin store configurado, las operaciones remotas quedan desactivadas");
        }
        Self {
            state: AppState::new(),
            auth: AuthService::new(store.clone()),
            bills: BillsViewModel::new(store.clone()),
            new_bill: NewBillViewModel::new(store.clone(), sessions.clone()),
            dashboard: DashboardViewModel::new(store),
            sessions,
        }
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn bills(&self) -> &BillsViewModel {
        &self.bills
    }

    pub fn new_bill(&self) -> &NewBillViewModel {
        &self.new_bill
    }

    pub fn dashboard(&self) -> &DashboardViewModel {
        &self.dashboard
    }

    pub fn apply(&self, command: Command) -> AppResult<()> {
        match command {
            Command::Navigate(route) => self.navigate(route),
            Command::PersistSession(session) => self.sessions.save(&session)?,
            Command::PersistToken(jwt) => self.sessions.save_token(&jwt)?,
            Command::ClearSession => self.sessions.clear()?,
            Command::SetBackground(color) => self.state.set_background_color(&color),
            Command::AuthWarning(warning) => self.state.set_auth_warning(Some(warning)),
            Command::ShowProofModal { file_url } => self.state.set_proof_modal(Some(file_url)),
            Command::SetFileValidity(message) => self.state.set_file_validity(message),
        }
        Ok(())
    }

    /// Aplica en orden; se detiene en el primer fallo de storage
    pub fn apply_all(&self, commands: Vec<Command>) -> AppResult<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    pub fn navigate(&self, requested: Route) {
        let route = requested.resolve(self.sessions.current().as_ref());
        if route != requested {
            log::info!("🔀 [APP] {} redirigido a {}", requested.path(), route.path());
        }
        match route {
            Route::NewBill => self.new_bill.reset(),
            Route::Bills => self.state.set_bills_page(BillsPage::Loading),
            Route::Dashboard => self.state.set_dashboard_page(BillsPage::Loading),
            Route::Login => {}
        }
        self.state.set_route(route);
    }

    /// Carga los datos de la página actual (lista o dashboard)
    pub async fn load_current_page(&self) {
        match self.state.route() {
            Route::Bills => {
                let page = match self.bills.get_bills() {
                    None => BillsPage::Loaded(Vec::new()),
                    Some(fetch) => match fetch.await {
                        Ok(bills) => BillsPage::Loaded(sort_for_display(bills)),
                        Err(e) => {
                            log::error!("❌ [APP] Error cargando notas de frais: {}", e);
                            BillsPage::Failed(e.to_string())
                        }
                    },
                };
                self.state.set_bills_page(page);
            }
            Route::Dashboard => {
                let page = match self.dashboard.load_bills().await {
                    None => BillsPage::Loaded(Vec::new()),
                    Some(Ok(bills)) => BillsPage::Loaded(bills),
                    Some(Err(e)) => {
                        log::error!("❌ [APP] Error cargando el dashboard: {}", e);
                        BillsPage::Failed(e.to_string())
                    }
                };
                self.state.set_dashboard_page(page);
            }
            Route::Login | Route::NewBill => {}
        }
    }

    /// Logout completo
    pub fn logout(&self) -> AppResult<()> {
        log::info!("👋 [APP] Logout");
        self.apply_all(vec![Command::ClearSession, Command::Navigate(Route::Login)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::errors::StoreError;
    use crate::models::LoginForm;
    use crate::services::{MockStore, fixture_bills};
    use crate::utils::{MemoryStorage, BACKGROUND_WHITE};

    fn app_with(store: Option<Rc<MockStore>>) -> (Rc<MemoryStorage>, App) {
        let storage = Rc::new(MemoryStorage::new());
        let handle: StoreHandle = match store {
            Some(store) => Some(store),
            None => None,
        };
        let app = App::new(storage.clone(), handle);
        (storage, app)
    }

    fn login(app: &App, user_type: UserType, email: &str) {
        let form = LoginForm {
            email: email.to_string(),
            password: "pwd".to_string(),
        };
        let submission = match user_type {
            UserType::Employee => block_on(app.auth().handle_submit_employee(&form)),
            UserType::Admin => block_on(app.auth().handle_submit_admin(&form)),
        };
        app.apply_all(submission.commands).unwrap();
    }

    #[test]
    fn test_paths_round_trip_and_unknown_goes_to_login() {
        for route in [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard] {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path("#nowhere"), Route::Login);
    }

    #[test]
    fn test_guard_by_role() {
        let employee = Session::connected(UserType::Employee, "a@a", "p");
        let admin = Session::connected(UserType::Admin, "b@b", "p");
        assert_eq!(Route::Bills.resolve(None), Route::Login);
        assert_eq!(Route::Dashboard.resolve(Some(&employee)), Route::Bills);
        assert_eq!(Route::NewBill.resolve(Some(&admin)), Route::Dashboard);
        assert_eq!(Route::NewBill.resolve(Some(&employee)), Route::NewBill);
    }

    #[test]
    fn test_employee_fallback_login_lands_on_bills_with_white_background() {
        let store = Rc::new(MockStore::with_fixtures());
        store.fail_next_login(StoreError::Rejected("fail".to_string()));
        let (storage, app) = app_with(Some(store.clone()));

        login(&app, UserType::Employee, "emp@b.com");

        assert_eq!(store.created_users().len(), 1);
        assert_eq!(app.state().route(), Route::Bills);
        assert_eq!(app.state().route().title(), Some("Mes notes de frais"));
        assert_eq!(app.state().background_color.borrow().as_deref(), Some(BACKGROUND_WHITE));
        assert_eq!(storage.writes()[0].0, "user");
        assert_eq!(app.sessions().token().as_deref(), Some("jwt-emp@b.com"));
    }

    #[test]
    fn test_admin_fallback_login_lands_on_dashboard() {
        let store = Rc::new(MockStore::with_fixtures());
        store.fail_next_login(StoreError::Rejected("fail".to_string()));
        let (_, app) = app_with(Some(store.clone()));

        login(&app, UserType::Admin, "admin@b.com");

        assert_eq!(store.created_users().len(), 1);
        assert_eq!(app.state().route(), Route::Dashboard);
        assert_eq!(app.state().route().title(), Some("Validations"));
        assert_eq!(app.state().background_color.borrow().as_deref(), Some("rgb(255, 255, 255)"));
    }

    #[test]
    fn test_bills_page_is_loaded_in_display_order() {
        let mut bills = fixture_bills();
        let mut unparseable = bills[0].clone();
        unparseable.id = "invalid".to_string();
        unparseable.date = "invalid-date".to_string();
        bills.insert(2, unparseable);
        let store = Rc::new(MockStore::with_bills(bills));
        let (_, app) = app_with(Some(store));
        login(&app, UserType::Employee, "a@a");

        block_on(app.load_current_page());

        let BillsPage::Loaded(bills) = app.state().bills_page.borrow().clone() else {
            panic!("bills page not loaded");
        };
        let dates: Vec<_> = bills.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["invalid-date", "4 Avr. 04", "3 Mar. 03", "2 Fév. 02", "1 Jan. 01"]
        );
    }

    #[test]
    fn test_list_errors_are_rendered_as_messages() {
        for status in [404, 500] {
            let store = Rc::new(MockStore::with_fixtures());
            let (_, app) = app_with(Some(store.clone()));
            login(&app, UserType::Employee, "a@a");
            store.fail_next_list(StoreError::Http(status));

            block_on(app.load_current_page());

            assert_eq!(
                *app.state().bills_page.borrow(),
                BillsPage::Failed(format!("Erreur {}", status))
            );
        }
    }

    #[test]
    fn test_protected_route_without_session_goes_to_login() {
        let (_, app) = app_with(None);
        app.apply(Command::Navigate(Route::NewBill)).unwrap();
        assert_eq!(app.state().route(), Route::Login);
    }

    #[test]
    fn test_eye_click_opens_modal_and_new_bill_click_navigates() {
        let (_, app) = app_with(Some(Rc::new(MockStore::with_fixtures())));
        login(&app, UserType::Employee, "a@a");

        app.apply(app.bills().handle_click_icon_eye("https://localhost:3456/images/a.jpg")).unwrap();
        assert_eq!(
            app.state().proof_modal.borrow().as_deref(),
            Some("https://localhost:3456/images/a.jpg")
        );

        app.apply(app.bills().handle_click_new_bill()).unwrap();
        assert_eq!(app.state().route(), Route::NewBill);
        assert_eq!(app.state().route().title(), Some("Envoyer une note de frais"));
        assert!(app.state().proof_modal.borrow().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let (_, app) = app_with(Some(Rc::new(MockStore::new())));
        login(&app, UserType::Employee, "a@a");

        app.logout().unwrap();

        assert!(app.sessions().current().is_none());
        assert!(app.sessions().token().is_none());
        assert_eq!(app.state().route(), Route::Login);
    }
}
