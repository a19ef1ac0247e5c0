#![allow(unused_assignments)] // thiserror/miette proc macros trigger false positives

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod manage;
pub mod vm;
