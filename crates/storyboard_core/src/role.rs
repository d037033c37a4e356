//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who a message is attributed to.
///
/// # Examples
///
/// ```
/// use storyboard_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages carry the task
    User,
    /// Assistant messages are from the model
    Assistant,
}
