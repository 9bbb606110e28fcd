// SPDX-FileCopyrightText: 2026 Vigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question resolution for the Vigil security analytics assistant.
//!
//! The [`ResponsePipeline`] is the central coordinator that:
//! - Forwards questions to the remote analyst when one is configured
//! - Falls back to the route's canonical query on any analyst failure
//! - Normalizes every outcome into one renderable [`Response`](vigil_core::Response)
//!
//! [`Visualizer`] turns a response's rows into a [`RenderInstruction`], and a
//! [`Session`] keeps each user's [`ConversationLog`].

pub mod conversation;
pub mod pipeline;
pub mod session;
pub mod visualizer;

pub use conversation::{ConversationEntry, ConversationLog};
pub use pipeline::{FallbackReason, Resolution, ResolutionSource, ResponsePipeline};
pub use session::{Session, Turn};
pub use visualizer::{RenderInstruction, SeriesKind, Visualizer};
