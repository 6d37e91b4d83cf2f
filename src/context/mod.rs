pub mod session;

pub use session::{
    bootstrap_user, try_use_session, use_session, SessionGate, SessionProvider, SessionStore,
};
