use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::config::CONFIG;

/// Estado de validación de una nota de frais
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
    /// Cualquier otro valor del backend; la nota se conserva igual
    #[serde(other)]
    Unknown,
}

impl BillStatus {
    /// Etiqueta mostrada en la tabla
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
            BillStatus::Unknown => "Inconnu",
        }
    }
}

/// Nota de frais tal como la expone el store remoto
///
/// `date` nunca se valida: una cadena que no es una fecha de calendario
/// se conserva y se muestra sin cambios.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub expense_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vat: String,
    #[serde(default = "default_pct", deserialize_with = "lenient_pct")]
    pub pct: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub commentary: String,
    #[serde(rename = "commentAdmin", default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: BillStatus,
}

fn default_pct() -> i64 {
    CONFIG.default_pct
}

/// Acepta número, cadena numérica o null; cualquier otra cosa vale el pct por defecto
fn lenient_pct<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let pct = match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64),
        Value::String(s) => crate::utils::format::parse_int(&s),
        _ => None,
    };
    Ok(pct.unwrap_or_else(default_pct))
}

/// Número, cadena numérica o null (borrador recién subido) -> 0 si no se puede leer
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(amount.filter(|v| v.is_finite()).unwrap_or_default())
}

/// null o ausente -> pending; un valor desconocido se conserva como `Unknown`
fn lenient_status<'de, D>(deserializer: D) -> Result<BillStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => BillStatus::default(),
        other => serde_json::from_value(other).unwrap_or(BillStatus::Unknown),
    })
}

/// null -> cadena vacía; un valor no textual se conserva en su forma JSON
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Decodifica registro por registro: uno corrupto se descarta sin abortar el lote
pub fn decode_bills(values: Vec<Value>) -> Vec<Bill> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Bill>(value) {
            Ok(bill) => Some(bill),
            Err(e) => {
                log::warn!("⚠️ [BILLS] Registro {} ignorado, no decodificable: {}", index, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pct_defaults_when_missing_or_unparseable() {
        let bill: Bill = serde_json::from_value(json!({ "id": "a", "pct": "" })).unwrap();
        assert_eq!(bill.pct, 20);

        let bill: Bill = serde_json::from_value(json!({ "id": "b" })).unwrap();
        assert_eq!(bill.pct, 20);

        let bill: Bill = serde_json::from_value(json!({ "id": "c", "pct": 10 })).unwrap();
        assert_eq!(bill.pct, 10);
    }

    #[test]
    fn test_invalid_date_is_kept_raw() {
        let bill: Bill = serde_json::from_value(json!({
            "id": "x", "date": "invalid-date", "status": "pending",
            "email": "a@a", "amount": 1, "name": "n", "type": "t",
            "fileUrl": "#", "fileName": "f"
        }))
        .unwrap();
        assert_eq!(bill.date, "invalid-date");
        assert_eq!(bill.file_url.as_deref(), Some("#"));
    }

    #[test]
    fn test_only_non_object_records_are_dropped() {
        let bills = decode_bills(vec![
            json!({ "id": "ok-1", "date": "2004-04-04" }),
            json!("not an object"),
            json!(42),
            json!({ "id": "ok-2", "date": "2003-03-03" }),
        ]);
        let ids: Vec<_> = bills.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ok-1", "ok-2"]);
    }

    #[test]
    fn test_draft_and_loosely_typed_records_are_kept() {
        let bills = decode_bills(vec![
            json!({
                "id": "draft", "email": "a@a", "name": null, "type": null,
                "amount": null, "date": null, "commentary": null, "vat": null,
                "pct": null, "fileUrl": "https://localhost:3456/images/a.jpg",
                "fileName": "a.jpg", "status": null
            }),
            json!({ "id": "str-amount", "amount": "100", "status": "pending" }),
            json!({ "id": "odd-status", "amount": "cent euros", "status": "lost" }),
            json!({ "id": "ok", "amount": 348, "date": "2004-04-04", "status": "accepted" }),
        ]);

        let ids: Vec<_> = bills.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["draft", "str-amount", "odd-status", "ok"]);

        let draft = &bills[0];
        assert_eq!(draft.name, "");
        assert_eq!(draft.date, "");
        assert_eq!(draft.amount, 0.0);
        assert_eq!(draft.pct, 20);
        assert_eq!(draft.status, BillStatus::Pending);
        assert_eq!(draft.file_name.as_deref(), Some("a.jpg"));

        assert_eq!(bills[1].amount, 100.0);
        assert_eq!(bills[2].amount, 0.0);
        assert_eq!(bills[2].status, BillStatus::Unknown);
        assert_eq!(bills[3].amount, 348.0);
        assert_eq!(bills[3].status, BillStatus::Accepted);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(BillStatus::Pending.label(), "En attente");
        assert_eq!(BillStatus::Accepted.label(), "Accepté");
        assert_eq!(BillStatus::Refused.label(), "Refusé");
        assert_eq!(BillStatus::Unknown.label(), "Inconnu");
    }
}
