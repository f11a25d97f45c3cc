// ============================================================================
// MOCK STORE - Store en memoria con fallos programables y registro de llamadas
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use async_trait::async_trait;
use crate::errors::StoreError;
use crate::models::{
    Bill, BillStatus, BillUpdate, BillUpload, CreatedBill, Credentials, LoginResponse, User, UserUpdate,
};
use crate::services::store::{BillsApi, RemoteStore, RequestOptions, UsersApi};

const MOCK_FILE_HOST: &str = "https://localhost:3456/images";

#[derive(Default)]
pub struct MockStore {
    bills: RefCell<Vec<Bill>>,
    users: RefCell<Vec<User>>,

    login_failures: RefCell<VecDeque<StoreError>>,
    list_failures: RefCell<VecDeque<StoreError>>,
    create_failures: RefCell<VecDeque<StoreError>>,
    update_failures: RefCell<VecDeque<StoreError>>,

    login_calls: RefCell<Vec<(Credentials, RequestOptions)>>,
    created_users: RefCell<Vec<User>>,
    uploads: RefCell<Vec<BillUpload>>,
    updates: RefCell<Vec<BillUpdate>>,
    list_calls: Cell<usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cuatro notas de frais de ejemplo, fechas desordenadas
    pub fn with_fixtures() -> Self {
        let store = Self::new();
        *store.bills.borrow_mut() = fixture_bills();
        store
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        let store = Self::new();
        *store.bills.borrow_mut() = bills;
        store
    }

    /// El próximo login falla con `error` (se pueden encadenar)
    pub fn fail_next_login(&self, error: StoreError) {
        self.login_failures.borrow_mut().push_back(error);
    }

    pub fn fail_next_list(&self, error: StoreError) {
        self.list_failures.borrow_mut().push_back(error);
    }

    pub fn fail_next_create(&self, error: StoreError) {
        self.create_failures.borrow_mut().push_back(error);
    }

    pub fn fail_next_update(&self, error: StoreError) {
        self.update_failures.borrow_mut().push_back(error);
    }

    pub fn login_calls(&self) -> Vec<(Credentials, RequestOptions)> {
        self.login_calls.borrow().clone()
    }

    pub fn created_users(&self) -> Vec<User> {
        self.created_users.borrow().clone()
    }

    pub fn uploads(&self) -> Vec<BillUpload> {
        self.uploads.borrow().clone()
    }

    pub fn updates(&self) -> Vec<BillUpdate> {
        self.updates.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn stored_bills(&self) -> Vec<Bill> {
        self.bills.borrow().clone()
    }

    fn next_failure(queue: &RefCell<VecDeque<StoreError>>) -> Result<(), StoreError> {
        match queue.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl RemoteStore for MockStore {
    async fn login(&self, credentials: &Credentials, options: RequestOptions) -> Result<LoginResponse, StoreError> {
        self.login_calls.borrow_mut().push((credentials.clone(), options));
        Self::next_failure(&self.login_failures)?;
        Ok(LoginResponse {
            jwt: format!("jwt-{}", credentials.email),
        })
    }

    fn bills(&self) -> &dyn BillsApi {
        self
    }

    fn users(&self) -> &dyn UsersApi {
        self
    }
}

#[async_trait(?Send)]
impl BillsApi for MockStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.list_calls.set(self.list_calls.get() + 1);
        Self::next_failure(&self.list_failures)?;
        Ok(self.bills.borrow().clone())
    }

    async fn create(&self, upload: BillUpload) -> Result<CreatedBill, StoreError> {
        self.uploads.borrow_mut().push(upload.clone());
        Self::next_failure(&self.create_failures)?;
        let key = uuid::Uuid::new_v4().to_string();
        let file_url = format!("{}/{}", MOCK_FILE_HOST, upload.file.name);
        self.bills.borrow_mut().push(Bill {
            id: key.clone(),
            email: upload.email,
            expense_type: String::new(),
            name: String::new(),
            amount: 0.0,
            date: String::new(),
            vat: String::new(),
            pct: crate::config::CONFIG.default_pct,
            commentary: String::new(),
            comment_admin: None,
            file_url: Some(file_url.clone()),
            file_name: Some(upload.file.name),
            status: BillStatus::Pending,
        });
        Ok(CreatedBill { file_url, key })
    }

    async fn update(&self, update: BillUpdate) -> Result<Bill, StoreError> {
        self.updates.borrow_mut().push(update.clone());
        Self::next_failure(&self.update_failures)?;
        let mut bill = update.data;
        bill.id = update.selector.clone();
        let mut bills = self.bills.borrow_mut();
        match bills.iter_mut().find(|b| b.id == update.selector) {
            Some(existing) => *existing = bill.clone(),
            None => bills.push(bill.clone()),
        }
        Ok(bill)
    }
}

#[async_trait(?Send)]
impl UsersApi for MockStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.borrow().clone())
    }

    async fn create(&self, user: User) -> Result<(), StoreError> {
        self.created_users.borrow_mut().push(user.clone());
        self.users.borrow_mut().push(user);
        Ok(())
    }

    async fn update(&self, update: UserUpdate) -> Result<User, StoreError> {
        let mut users = self.users.borrow_mut();
        match users.iter_mut().find(|u| u.email == update.selector) {
            Some(existing) => {
                *existing = update.data.clone();
                Ok(update.data)
            }
            None => Err(StoreError::Http(404)),
        }
    }
}

fn fixture_bill(id: &str, name: &str, date: &str, amount: f64, status: BillStatus) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: name.to_string(),
        amount,
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        comment_admin: None,
        file_url: Some(format!("{}/{}.jpg", MOCK_FILE_HOST, id)),
        file_name: Some(format!("{}.jpg", id)),
        status,
    }
}

pub fn fixture_bills() -> Vec<Bill> {
    vec![
        fixture_bill("47qAXb6fIm2zOKkLzMro", "encore", "2003-03-03", 100.0, BillStatus::Pending),
        fixture_bill("BeKy5Mo4jkmdfPGYpTxZ", "test1", "2001-01-01", 400.0, BillStatus::Refused),
        fixture_bill("UIUZtnPQvnbFnB0ozvJh", "test3", "2004-04-04", 348.0, BillStatus::Accepted),
        fixture_bill("qcCK3SzECmaZAGRrHjaC", "test2", "2002-02-02", 100.0, BillStatus::Refused),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use crate::models::UserType;

    #[test]
    fn test_bill_update_replaces_by_selector() {
        let store = MockStore::with_fixtures();
        let mut data = fixture_bills().remove(1);
        data.status = BillStatus::Accepted;

        let updated = block_on(store.bills().update(BillUpdate {
            selector: data.id.clone(),
            data: data.clone(),
        }))
        .unwrap();

        assert_eq!(updated, data);
        assert_eq!(store.stored_bills().len(), 4);
        assert_eq!(store.stored_bills()[1].status, BillStatus::Accepted);
    }

    #[test]
    fn test_user_update_unknown_email_is_404() {
        let store = MockStore::new();
        let user = User {
            user_type: UserType::Admin,
            name: "admin".to_string(),
            email: "admin@b.com".to_string(),
            password: String::new(),
        };
        block_on(store.users().create(user.clone())).unwrap();

        let renamed = User { name: "rh".to_string(), ..user.clone() };
        let result = block_on(store.users().update(UserUpdate {
            selector: "admin@b.com".to_string(),
            data: renamed.clone(),
        }));
        assert_eq!(result, Ok(renamed));

        let missing = block_on(store.users().update(UserUpdate {
            selector: "nobody@b.com".to_string(),
            data: user,
        }));
        assert_eq!(missing, Err(StoreError::Http(404)));
        assert_eq!(block_on(store.users().list()).unwrap().len(), 1);
    }
}
