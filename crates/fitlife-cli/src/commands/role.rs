use crate::context::AppContext;
use anyhow::{Result, anyhow};
use fitlife_application::RoleDirectory;
use fitlife_core::role::UserRole;

pub async fn get(ctx: &AppContext) -> Result<()> {
    let email = ctx.session_email()?;
    let role = RoleDirectory::new(ctx.credentials.clone()).role_of(&email).await?;
    println!("{} ({})", role, role.as_str());
    Ok(())
}

pub async fn set(ctx: &AppContext, role: &str) -> Result<()> {
    let email = ctx.session_email()?;
    let role = parse_strict(role)?;
    RoleDirectory::new(ctx.credentials.clone())
        .set_role(&email, role)
        .await?;
    println!("Role set to {role}");
    Ok(())
}

/// Unlike stored values, user input must name a known role.
fn parse_strict(raw: &str) -> Result<UserRole> {
    UserRole::ALL
        .into_iter()
        .find(|role| role.as_str().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            anyhow!("unknown role '{raw}', expected one of: member, trainer, nutritionist, admin")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict() {
        assert_eq!(parse_strict("trainer").unwrap(), UserRole::Trainer);
        assert_eq!(parse_strict("ADMIN").unwrap(), UserRole::Admin);
        assert!(parse_strict("coach").is_err());
        assert!(parse_strict("").is_err());
    }
}
