// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod annotations;
pub mod config;
pub mod constants;
pub mod error;
pub mod reconcilers;
pub mod replication;
pub mod report;

#[cfg(test)]
pub mod test_utils;
