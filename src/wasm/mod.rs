//! WebAssembly bindings for the LS-8 emulator.
//!
//! This module provides JavaScript-callable interfaces to the LS-8 machine,
//! enabling browser-based execution of program images.

pub mod api;

pub use api::Ls8Emulator;
