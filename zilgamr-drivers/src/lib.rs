//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in zilgamr-core, written against `embedded-hal` 1.0 so they run on any
//! HAL:
//!
//! - Ultrasonic range sensor (HC-SR04)
//! - Hobby servo on a 50 Hz PWM channel

#![no_std]
#![deny(unsafe_code)]

// Property tests format their failure messages
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod sensor;
pub mod servo;
