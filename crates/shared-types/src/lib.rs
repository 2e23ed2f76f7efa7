// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the token supply API service
//!
//! This crate provides the closed enumerations that are shared between the
//! supply engine and the HTTP layer, avoiding circular dependencies.

pub mod holder_class;
pub mod supply_method;

pub use holder_class::HolderClass;
pub use supply_method::SupplyMethod;
