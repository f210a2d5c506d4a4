// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! Options page and popup logic with MVC architecture
//!
//! # Architecture
//!
//! - **Model**: SettingsStore, BangCollection, ConflictDetector (in `config` and `core` modules)
//! - **View**: The command-line front end (`main.rs`)
//! - **Controller**: Mediates between Model and View (in `controller.rs`)
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs          // This file - exports
//! ├── controller.rs   // MVC Controller (the options page session)
//! ├── import_flow.rs  // Import state machine
//! ├── notice.rs       // Toast-style outcome messages
//! └── popup.rs        // Read-only popup list
//! ```

pub mod controller;
pub mod import_flow;
pub mod notice;
pub mod popup;

pub use {
    controller::Controller,
    import_flow::{ImportFlow, ImportState},
    notice::{Notice, NoticeStatus},
    popup::{PopupList, PopupRow},
};

#[cfg(test)]
mod tests;
