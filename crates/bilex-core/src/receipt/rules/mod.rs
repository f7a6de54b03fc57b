//! Rule-based extractors for receipt text.

pub mod amounts;
pub mod items;
pub mod merchant;
pub mod patterns;

pub use amounts::{amount_from_line, largest_numeric_token, max_amount_in_lines};
pub use items::{detect_items, is_boilerplate, item_name_from_line};
pub use merchant::detect_merchant;
pub use patterns::*;
