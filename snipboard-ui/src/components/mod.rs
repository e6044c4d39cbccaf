mod auth_section;
mod error_dialog;
mod loading_spinner;
mod share_form;
mod snippet_card;

pub use auth_section::AuthSection;
pub use error_dialog::ErrorDialog;
pub use loading_spinner::LoadingSpinner;
pub use share_form::ShareForm;
pub use snippet_card::SnippetCard;
