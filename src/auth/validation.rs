//! Field rules for the login and password forms.
//!
//! Lengths are counted in characters, not bytes.

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.chars().count() < 3 {
        return Err("Usernames must be at least 3 characters long");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 6 {
        return Err("Passwords must be at least 6 characters long");
    }
    Ok(())
}

/// The current password only has to look like a password; the hash check does the rest.
pub fn validate_current_password(password: &str) -> Result<(), &'static str> {
    validate_password(password)
}

pub fn validate_new_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if len < 8 {
        return Err("That password is too short");
    }
    if len > 255 {
        return Err("That password is too long");
    }
    Ok(())
}

pub fn validate_repeat_password(password: &str, repeat_password: &str) -> Result<(), &'static str> {
    if password != repeat_password {
        return Err("Passwords do not match");
    }
    Ok(())
}
