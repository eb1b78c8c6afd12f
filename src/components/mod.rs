pub mod college_card;
pub mod navigation;
pub mod review_form;
pub mod reviews_list;
pub mod star_rating;
pub mod toast;
