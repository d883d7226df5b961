use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use tracing::instrument;

use super::admin::AdminError;
use crate::{config::Argon2Config, storage::HashedPassword, trace_err};

fn argon(argon2_config: &Argon2Config) -> Result<Argon2<'static>, AdminError> {
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        trace_err!(
            ParamsBuilder::new()
                .m_cost(argon2_config.memory_cost)
                .t_cost(argon2_config.time_cost)
                .p_cost(argon2_config.parallelism)
                .build(),
            "failed to build Argon2 with Param builder"
        )?,
    ))
}

/// Hashes on the blocking pool; the PHC string keeps salt and parameters.
#[instrument(name = "create_password_hash", skip_all)]
pub async fn create_password_hash(
    password: &str,
    argon2_config: &Argon2Config,
) -> Result<HashedPassword, AdminError> {
    let password = password.to_string();
    let argon2_config = argon2_config.clone();

    let password_hash = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Ok::<String, AdminError>(
            trace_err!(
                argon(&argon2_config)?.hash_password(password.as_bytes(), &salt),
                "failed to hash password"
            )?
            .to_string(),
        )
    })
    .await??;

    Ok(HashedPassword(password_hash))
}

#[instrument(name = "verify_password", skip_all)]
pub async fn verify_password(
    password: &str,
    stored: &HashedPassword,
    argon2_config: &Argon2Config,
) -> Result<(), AdminError> {
    let stored_hash = stored.0.clone();
    let password = password.to_string();
    let argon2_config = argon2_config.clone();

    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&stored_hash)?;

        argon(&argon2_config)?
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to verify password");
                AdminError::PasswordMismatch
            })
    })
    .await??;

    Ok(())
}
