pub mod college;
pub mod review;
pub mod user;
