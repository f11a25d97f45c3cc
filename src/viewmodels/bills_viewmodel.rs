// ============================================================================
// BILLS VIEWMODEL - Lista de notas de frais del empleado
// ============================================================================

use std::future::Future;
use crate::app::Route;
use crate::errors::StoreError;
use crate::models::Bill;
use crate::services::store::StoreHandle;
use crate::state::Command;
use crate::utils::format_date_or_raw;

pub struct BillsViewModel {
    store: StoreHandle,
}

impl BillsViewModel {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// `bills().list()` con la fecha formateada registro por registro.
    /// `None` si no hay store; un rechazo del store se devuelve tal cual.
    pub fn get_bills(&self) -> Option<impl Future<Output = Result<Vec<Bill>, StoreError>>> {
        let store = self.store.clone()?;
        Some(async move {
            let bills = store.bills().list().await?;
            log::info!("📋 [BILLS] {} notas de frais recibidas", bills.len());
            let formatted: Vec<Bill> = bills.into_iter().map(format_bill).collect();
            Ok::<_, StoreError>(formatted)
        })
    }

    pub fn handle_click_new_bill(&self) -> Command {
        Command::Navigate(Route::NewBill)
    }

    /// `bill_url` es el atributo `data-bill-url` del icono pulsado
    pub fn handle_click_icon_eye(&self, bill_url: &str) -> Command {
        Command::ShowProofModal {
            file_url: bill_url.to_string(),
        }
    }
}

/// Solo toca `date`; una fecha inválida se queda como estaba
pub fn format_bill(bill: Bill) -> Bill {
    let date = format_date_or_raw(&bill.date);
    Bill { date, ..bill }
}

/// Orden de la tabla: descendente por comparación de cadenas sobre `date`
pub fn sort_for_display(mut bills: Vec<Bill>) -> Vec<Bill> {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
    bills
}
