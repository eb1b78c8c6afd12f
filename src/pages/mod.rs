pub mod colleges;
pub mod favorites;
pub mod home;
pub mod logout;
pub mod reviews;
pub mod signin;
