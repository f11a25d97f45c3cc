pub mod session;
pub mod bill;
pub mod upload;
pub mod user;

pub use session::{Session, SessionStatus, UserType, Credentials, LoginForm, LoginResponse};
pub use bill::{Bill, BillStatus, decode_bills};
pub use upload::{UploadedFile, BillUpload, CreatedBill, BillUpdate, normalize_file_url};
pub use user::{User, UserUpdate};
