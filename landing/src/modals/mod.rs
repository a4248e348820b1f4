// Overlays: the shared shell plus the app info and lead capture modals

mod app_info;
mod callback;
mod notify;
mod shell;

pub use app_info::AppInfoModal;
pub use callback::CallbackModal;
pub use notify::AppNotificationModal;
pub use shell::Modal;
