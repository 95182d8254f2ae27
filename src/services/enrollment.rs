// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapping of profile data and enrollment forms onto user records.

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{EnrollmentForm, User};
use crate::services::linkedin::Profile;
use crate::time_utils::format_utc_rfc3339;

/// Split a full name into first and last name.
///
/// The first word is the first name and the last word is the last name;
/// anything in between is dropped.
pub fn split_name(name: &str) -> (String, String) {
    let mut words = name.split_whitespace();
    let first = words.next().unwrap_or_default().to_string();
    let last = words.last().unwrap_or_default().to_string();
    (first, last)
}

/// Build a new, unenrolled user from a resolved profile.
pub fn user_from_profile(profile: Profile, now: DateTime<Utc>) -> Result<User, AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Invalid Profile. Found No Name".to_string(),
        ));
    }

    if profile.photo.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Invalid Profile. Please Set Your Profile Picture on LinkedIn".to_string(),
        ));
    }

    let (first_name, last_name) = split_name(&profile.name);

    Ok(User {
        email: profile.email,
        name: profile.name,
        first_name,
        last_name,
        phone: profile.phone,
        photo: profile.photo,
        created_at: format_utc_rfc3339(now),
        ..User::default()
    })
}

fn missing(label: &str) -> AppError {
    AppError::BadRequest(format!("Missing Field! {} is required", label))
}

fn required_text(value: Option<String>, label: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing(label)),
    }
}

fn required_list(value: Option<Vec<String>>, label: &str) -> Result<String, AppError> {
    value.map(|items| items.join(",")).ok_or_else(|| missing(label))
}

/// Apply the one-time enrollment form to `user`.
///
/// Fields are checked in a fixed order and the first missing one is
/// reported. Already-enrolled users are rejected whatever the form holds.
pub fn apply_enrollment(mut user: User, form: EnrollmentForm) -> Result<User, AppError> {
    if user.enrolled {
        return Err(AppError::BadRequest(
            "Responses already recorded. You have applied!".to_string(),
        ));
    }

    user.state = required_text(form.state, "State")?;
    user.organization = required_text(form.organization, "Organization")?;
    user.years_of_experience = required_text(form.years_of_experience, "Years of Experience")?;
    user.volunteer_areas = required_list(form.volunteer_areas, "Volunteer Areas")?;
    user.volunteer_means = required_list(form.volunteer_means, "Volunteer Means")?;
    user.convicted = form.convicted.ok_or_else(|| missing("Convicted"))?;
    user.representation = required_text(form.representation, "Representation")?;
    user.provided_name = required_text(form.provided_name, "Name")?;

    user.enrolled = true;
    Ok(user)
}
