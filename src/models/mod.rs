pub mod class;
pub mod payment;
pub mod selected_class;
pub mod user;

pub use class::*;
pub use payment::*;
pub use selected_class::*;
pub use user::*;
