// ============================================================================
// DASHBOARD VIEWMODEL - Validaciones del administrador RH
// ============================================================================

use crate::app::Route;
use crate::errors::StoreError;
use crate::models::{Bill, BillStatus, BillUpdate};
use crate::services::store::StoreHandle;
use crate::state::Command;
use crate::viewmodels::bills_viewmodel::format_bill;

pub struct DashboardViewModel {
    store: StoreHandle,
}

impl DashboardViewModel {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Todas las notas de frais, fechas formateadas. `None` si no hay store.
    pub async fn load_bills(&self) -> Option<Result<Vec<Bill>, StoreError>> {
        let store = self.store.clone()?;
        let result = store
            .bills()
            .list()
            .await
            .map(|bills| bills.into_iter().map(format_bill).collect());
        Some(result)
    }

    pub async fn handle_accept(&self, bill: &Bill, comment: &str) -> Result<Vec<Command>, StoreError> {
        self.decide(bill, BillStatus::Accepted, comment).await
    }

    pub async fn handle_refuse(&self, bill: &Bill, comment: &str) -> Result<Vec<Command>, StoreError> {
        self.decide(bill, BillStatus::Refused, comment).await
    }

    async fn decide(&self, bill: &Bill, status: BillStatus, comment: &str) -> Result<Vec<Command>, StoreError> {
        let Some(store) = self.store.clone() else {
            log::warn!("⚠️ [DASHBOARD] Sin store configurado, decisión ignorada");
            return Ok(Vec::new());
        };
        let data = Bill {
            status,
            comment_admin: Some(comment.to_string()),
            ..bill.clone()
        };
        store
            .bills()
            .update(BillUpdate { selector: bill.id.clone(), data })
            .await?;
        log::info!("✅ [DASHBOARD] Nota {} marcada como {:?}", bill.id, status);
        Ok(vec![Command::Navigate(Route::Dashboard)])
    }
}

/// Notas de frais de un estado, en el orden de la tabla
pub fn filter_bills(bills: &[Bill], status: BillStatus) -> Vec<Bill> {
    let filtered: Vec<Bill> = bills.iter().filter(|b| b.status == status).cloned().collect();
    crate::viewmodels::bills_viewmodel::sort_for_display(filtered)
}

/// (en attente, accepté, refusé)
pub fn count_by_status(bills: &[Bill]) -> (usize, usize, usize) {
    bills.iter().fold((0, 0, 0), |(p, a, r), bill| match bill.status {
        BillStatus::Pending => (p + 1, a, r),
        BillStatus::Accepted => (p, a + 1, r),
        BillStatus::Refused => (p, a, r + 1),
        BillStatus::Unknown => (p, a, r),
    })
}
