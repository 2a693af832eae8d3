mod button;
pub use button::*;

mod profile_card;
pub use profile_card::*;

mod site_header;
pub use site_header::*;

mod text_field;
pub(crate) use text_field::bind_text_field_keys;
pub use text_field::{TextField, TextFieldEvent, TextFieldState};
