// Copyright 2025 Chisomo Makombo Sakala
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

//! # Ldbench
//!
//! `ldbench` is a benchmark driver that measures how a linker's runtime
//! scales with the number of external and "linkonce" symbols defined across
//! a set of synthetic object modules. It sweeps a grid of symbol counts,
//! runs one timed link per grid point (strictly one at a time, so the
//! measurements never contend with each other), and emits a plain-text
//! result table for external plotting tools.
//!
//! This crate contains the main library logic for the `ldbench` CLI, but its
//! core modules (`grid`, `serial`, `sweep`) could be used independently.
//!
//! ## Core Modules
//!
//! * [`grid`]: Builds the ordered (external, linkonce) parameter grid from
//!   the sweep bounds.
//! * [`serial`]: Runs an ordered sequence of deferred async tasks one at a
//!   time, short-circuiting on the first failure.
//! * [`sweep`]: Drives one benchmark iteration per grid point (clean,
//!   generate, convert, link, time) and collects the ordered results.
//! * [`workspace`]: Cleans and enumerates the scratch directory's transient
//!   artifacts.
//! * [`tools`]: The subprocess adapter for the external generator,
//!   converter, and linker executables.
//! * [`report`]: Renders the result table (or JSON lines) and writes it to
//!   the selected sink.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`config`]: Validates the CLI arguments into an immutable sweep
//!   configuration.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod logging;
pub mod report;
pub mod serial;
pub mod sweep;
pub mod tools;
pub mod workspace;
