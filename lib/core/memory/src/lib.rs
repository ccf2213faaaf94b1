//! Abstractions over physical and virtual memory.
#![no_std]

pub mod address;
pub mod phys;
pub mod translation;
