mod badge;
mod error;
mod mutation;
mod operations;
mod types;

pub use badge::CartBadge;
pub use error::{cart_error_to_status_code, CartError};
pub use mutation::CartMutation;
pub use operations::{add_item, item_count, remove_item, validate_item};
pub use types::{Cart, CartItem, CartSummary};
