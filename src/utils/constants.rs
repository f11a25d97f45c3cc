/// Claves de localStorage
pub const USER_STORAGE_KEY: &str = "user";
pub const JWT_STORAGE_KEY: &str = "jwt";

/// Color de fondo aplicado al salir de la página de login
pub const BACKGROUND_WHITE: &str = "rgb(255, 255, 255)";

/// Mensaje del input `file` cuando la extensión no es aceptada
pub const INVALID_FILE_MESSAGE: &str =
    "Veuillez sélectionner un fichier au format jpg, jpeg ou png";

/// Títulos de página
pub const BILLS_TITLE: &str = "Mes notes de frais";
pub const NEW_BILL_TITLE: &str = "Envoyer une note de frais";
pub const DASHBOARD_TITLE: &str = "Validations";

/// Identificadores (data-testid) que las vistas exponen a los handlers
pub mod field {
    pub const EMPLOYEE_EMAIL: &str = "employee-email-input";
    pub const EMPLOYEE_PASSWORD: &str = "employee-password-input";
    pub const EMPLOYEE_FORM: &str = "form-employee";
    pub const ADMIN_EMAIL: &str = "admin-email-input";
    pub const ADMIN_PASSWORD: &str = "admin-password-input";
    pub const ADMIN_FORM: &str = "form-admin";

    pub const EXPENSE_TYPE: &str = "expense-type";
    pub const EXPENSE_NAME: &str = "expense-name";
    pub const DATEPICKER: &str = "datepicker";
    pub const AMOUNT: &str = "amount";
    pub const VAT: &str = "vat";
    pub const PCT: &str = "pct";
    pub const COMMENTARY: &str = "commentary";
    pub const FILE: &str = "file";
    pub const NEW_BILL_FORM: &str = "form-new-bill";

    pub const BILLS_TBODY: &str = "tbody";
    pub const ICON_EYE: &str = "icon-eye";
    pub const BTN_NEW_BILL: &str = "btn-new-bill";
    pub const PROOF_MODAL: &str = "modaleFile";
    pub const BILL_URL_ATTR: &str = "data-bill-url";
}
