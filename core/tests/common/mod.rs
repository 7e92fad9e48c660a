// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! Provides appointment fixtures and scriptable mock implementations of
//! the service seams.

mod fixtures;
mod mock;

#[allow(unused_imports)]
pub use fixtures::{cancelled, pending, with_phone};
#[allow(unused_imports)]
pub use mock::{MockFeed, MockService, ScriptedList};
