pub mod cursor;
pub mod entities;
pub mod requests;
pub mod responses;
