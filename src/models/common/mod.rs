pub mod pagination;
pub mod response;

pub use pagination::{PaginationInfo, PaginationQuery, normalize_page};
pub use response::ApiResponse;
