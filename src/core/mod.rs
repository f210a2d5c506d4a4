// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms
//! for bang management, including:
//! - Type definitions for bangs, stored settings and export documents
//! - The ordered in-memory collection with filter and sort views
//! - Duplicate keyword detection using HashMap-based lookup
//! - Keyword and URL template validation
//!
//! All business logic is isolated from storage and presentation so it can
//! be unit tested without touching the filesystem.

pub mod collection;
pub mod conflict;
pub mod types;
pub mod validator;

pub use collection::{BangCollection, CollectionError};
pub use conflict::{Conflict, ConflictDetector};
pub use types::*;
pub use validator::{validate_bang, validate_collection, ValidationError};

#[cfg(test)]
mod tests;
