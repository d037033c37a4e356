//! Core data types for the Storyboard frame generation pipeline.
//!
//! This crate provides the values that flow between the prompt builder, the
//! response parser, the model drivers and the assembler.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod frame;
mod image;
mod message;
mod request;
mod role;
mod stage;
mod storyboard;

pub use frame::Frame;
pub use image::{ImageData, ImageRequest};
pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use stage::Stage;
pub use storyboard::Storyboard;
