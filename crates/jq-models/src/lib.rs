/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! # jq-models
//!
//! Data models for J-Quants API responses.
//!
//! This crate provides strongly-typed Rust structures for the three record
//! collections the dashboard consumes (listed issue information, daily
//! quotes and financial statements) and for the token exchange.
//!
//! Numeric fields are carried raw: J-Quants reports statement figures as
//! strings that may be blank, and price figures as numbers that may be null.
//! Interpretation of those values is left to the consumer.
//!
//! ## Usage
//!
//! ```ignore
//! use jq_models::statements::StatementsResponse;
//!
//! let response: StatementsResponse = serde_json::from_str(&response_json)?;
//! for statement in &response.statements {
//!     println!("{} {}", statement.current_period_end_date, statement.type_of_current_period);
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod common;
pub mod listed;
pub mod prices;
pub mod statements;

// Re-export common types for convenience
pub use common::*;

// Re-export all model types
pub use auth::*;
pub use listed::*;
pub use prices::*;
pub use statements::*;
