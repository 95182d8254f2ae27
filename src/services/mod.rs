// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod enrollment;
pub mod linkedin;

pub use enrollment::{apply_enrollment, split_name, user_from_profile};
pub use linkedin::{IdentityProvider, LinkedInClient, LinkedInEndpoints, Profile};
