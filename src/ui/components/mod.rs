pub mod rating_dots;
pub mod search_box;
pub mod summary_card;
pub mod toast;
