//! Domain models for the storefront.

pub mod blog;
pub mod product;
pub mod session;
pub mod user;

pub use blog::BlogPost;
pub use product::Product;
pub use session::CurrentUser;
pub use user::User;
