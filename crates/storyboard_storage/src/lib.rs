//! Persistence for rendered storyboard frames.
//!
//! Images are written under a single output directory with deterministic
//! names (`frame_01.png`, `frame_02.png`, ...) so a rerun overwrites the
//! previous result for the same frame instead of piling up copies.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod storage;

pub use filesystem::FileSystemStorage;
pub use storage::{ImageStore, frame_file_name};
