//! API endpoint integration tests
//!
//! Drives the composed router end to end: the auth gate's rejection
//! contract, the account flows, and admin role management.

#![allow(dead_code)]

mod accounts;
mod admin;
mod auth;
mod common;
