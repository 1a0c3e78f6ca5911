//! Account commands.

use std::error::Error;

use juicebar_stores::models::SignupRequest;

use super::Stores;

/// Register a new account and sign in.
///
/// # Errors
///
/// Returns an error on blank fields, mismatched passwords, a duplicate or
/// malformed email, or a store failure.
pub async fn signup(
    stores: &Stores,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    phone: String,
) -> Result<(), Box<dyn Error>> {
    let profile = stores
        .identity
        .signup(SignupRequest {
            name,
            email,
            password,
            confirm_password,
            phone,
        })
        .await?;

    println!("signed up as {} ({})", profile.email, profile.role);
    Ok(())
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns an error on unknown accounts, wrong passwords, or a store
/// failure.
pub async fn login(stores: &Stores, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
    let profile = stores.identity.login(email, password).await?;
    println!("signed in as {} ({})", profile.email, profile.role);
    Ok(())
}

/// Clear the current session.
///
/// # Errors
///
/// Returns an error if the persisted session cannot be removed.
pub async fn logout(stores: &Stores) -> Result<(), Box<dyn Error>> {
    stores.identity.logout().await?;
    println!("signed out");
    Ok(())
}

/// Print the signed-in user, if any.
pub fn whoami(stores: &Stores) {
    match stores.identity.current_user() {
        Some(profile) => println!("{} ({})", profile.email, profile.role),
        None => println!("not signed in"),
    }
}
