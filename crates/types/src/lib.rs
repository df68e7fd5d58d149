// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Data types for the check-in portal.
//!
//! This crate contains the data types shared between the storage layer, the
//! registration core and the terminal frontend.
//!
//! # Features
//!
//! ## `diesel`
//!
//! Adds [Diesel](https://diesel.rs/) type mappings to simple newtypes,
//! so they can be stored in a database through the ORM.

#![deny(
    bad_style,
    improper_ctypes,
    missing_debug_implementations,
    missing_docs,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    while_true
)]

mod macros;

pub mod core;
pub mod events;
pub mod roster;
