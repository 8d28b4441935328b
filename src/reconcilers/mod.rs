// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes reconcilers that react to watch events.

pub mod ingress;
pub mod secret;

pub use ingress::IngressReconciler;
pub use secret::SecretReconciler;
