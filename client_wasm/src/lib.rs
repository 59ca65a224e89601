//! WebGPU client for Pong
//!
//! Two players share one keyboard. Accounts and score history live on the
//! server; the match itself runs here, drawn with wgpu on the WebGPU
//! backend.
//!
//! Everything except the renderer and the browser bindings builds on the
//! host too, so it can be tested natively.

pub mod accounts;
pub mod camera;
pub mod digits;
pub mod fsm;
pub mod input;
pub mod mesh;
pub mod network;
pub mod scene;
pub mod simulation;
pub mod stats;

#[cfg(target_arch = "wasm32")]
mod renderer;
#[cfg(target_arch = "wasm32")]
mod web;

pub use fsm::{Screen, ScreenAction, ScreenFsm, TransitionResult};
