use serde::{Deserialize, Serialize};
use crate::config::CONFIG;
use crate::models::Bill;

/// Archivo elegido en el input `file`, antes de convertirse en justificatif
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub extension: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    /// `name` puede venir como ruta (`C:\fakepath\receipt.png`): se toma el último segmento
    pub fn new(name: &str, content: Vec<u8>) -> Self {
        let name = name
            .rsplit(|c| c == '\\' || c == '/')
            .next()
            .unwrap_or(name)
            .to_string();
        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
            _ => String::new(),
        };
        Self { name, extension, content }
    }

    /// jpg, jpeg o png, sin distinguir mayúsculas
    pub fn has_accepted_extension(&self) -> bool {
        CONFIG
            .accepted_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

/// Payload multipart de `bills().create`: archivo + email del usuario conectado
#[derive(Debug, Clone, PartialEq)]
pub struct BillUpload {
    pub file: UploadedFile,
    pub email: String,
}

/// Respuesta de `bills().create`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedBill {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    pub key: String,
}

/// Payload de `bills().update`, indexado por el id del registro creado
#[derive(Debug, Clone, PartialEq)]
pub struct BillUpdate {
    pub selector: String,
    pub data: Bill,
}

/// Quita todo hasta `"/upload"` inclusive; el resto (querystring incluido) se conserva.
/// Sin el marcador la URL se devuelve tal cual.
pub fn normalize_file_url(raw: &str) -> String {
    let marker = CONFIG.upload_marker.as_str();
    match raw.find(marker) {
        Some(pos) => raw[pos + marker.len()..].to_string(),
        None => raw.to_string(),
    }
}
