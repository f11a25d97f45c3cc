pub mod bills_viewmodel;
pub mod new_bill_viewmodel;
pub mod dashboard_viewmodel;

pub use bills_viewmodel::BillsViewModel;
pub use new_bill_viewmodel::{NewBillViewModel, NewBillForm};
pub use dashboard_viewmodel::DashboardViewModel;
