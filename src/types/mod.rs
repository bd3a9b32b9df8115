pub mod key;
pub mod text;

pub mod author;
pub mod cover;
pub mod detail;
pub mod favourite;
pub mod search_result;
