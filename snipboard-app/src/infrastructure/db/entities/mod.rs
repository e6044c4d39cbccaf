pub mod like;
pub mod snippet;
pub mod user;

pub use like::Entity as Like;
pub use snippet::Entity as Snippet;
pub use user::Entity as User;
