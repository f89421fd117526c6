pub mod component;
pub mod form;
pub mod header;
pub mod hint_bar;
pub mod logs;
pub mod records;
pub mod status_row;

pub(crate) use component::Component;
pub use form::FormComponent;
pub use header::HeaderComponent;
pub use hint_bar::HintBarComponent;
pub use logs::LogsComponent;
pub use records::RecordsComponent;
pub use status_row::StatusRowComponent;
