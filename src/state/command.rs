// ============================================================================
// COMMANDS - Efectos que devuelven los handlers y ejecuta App
// ============================================================================

use crate::app::Route;
use crate::models::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Navigate(Route),
    PersistSession(Session),
    PersistToken(String),
    /// Logout
    ClearSession,
    /// `document.body.style.backgroundColor`
    SetBackground(String),
    /// Autenticación no confirmada tras el intento de respaldo
    AuthWarning(String),
    /// Abre `#modaleFile` con el justificatif
    ShowProofModal { file_url: String },
    /// `setCustomValidity` del input `file`; `None` limpia el mensaje
    SetFileValidity(Option<String>),
}
