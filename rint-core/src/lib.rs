#![no_std]

pub mod bank;
pub mod constants;
pub mod controller;
pub mod sim;
