pub mod async_state;
pub mod user;

pub use async_state::AsyncState;
pub use user::{AuthForm, User, UserEnvelope};
