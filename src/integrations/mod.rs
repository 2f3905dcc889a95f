//! External service integrations.

pub mod anthropic_client {
    pub use crate::anthropic_client::*;
}
