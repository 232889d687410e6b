//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in wordclock-core for the clock's hardware:
//!
//! - LED matrix (MAX7219 over SPI)
//! - Push button (debounced click / long-press decoding)

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod matrix;
