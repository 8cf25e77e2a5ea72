use crate::context::AppContext;
use anyhow::{Result, bail};
use fitlife_application::{RoleDirectory, initial_route};
use fitlife_core::account::UserRecord;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    match ctx.controller.login(email, password).await {
        Ok(session) => {
            let who = session.user_name.as_deref().or(session.email()).unwrap_or(email);
            println!("Logged in as {who}");
            if session.bearer_token().is_none() {
                println!("warning: the server did not issue a token");
            }
            Ok(())
        }
        Err(failure) => bail!(failure),
    }
}

pub async fn register(
    ctx: &AppContext,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<()> {
    match ctx.controller.register(email, password, name).await {
        Ok(session) => {
            println!("Registered {}", session.email().unwrap_or(email));
            Ok(())
        }
        Err(failure) => bail!(failure),
    }
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.controller.logout().await;
    println!("Logged out");
    Ok(())
}

pub async fn status(ctx: &AppContext) -> Result<()> {
    if ctx.controller.current().session.bearer_token().is_some() {
        ctx.controller.refresh_profile_in_background();
    }
    ctx.controller.settle().await;

    let state = ctx.controller.current();
    let session = &state.session;

    println!("route:      {}", initial_route(session));
    println!("logged in:  {}", if session.is_logged_in { "yes" } else { "no" });
    println!("email:      {}", session.email().unwrap_or("-"));
    println!("name:       {}", session.user_name.as_deref().unwrap_or("-"));
    println!(
        "token:      {}",
        if session.bearer_token().is_some() { "present" } else { "none" }
    );
    println!("api:        {}", ctx.config.api.base_url);
    if let Some(error) = &state.profile_error {
        println!("profile:    {error}");
    }

    if state.is_authenticated() {
        let dashboard = RoleDirectory::new(ctx.credentials.clone())
            .dashboard_for(session)
            .await?;
        println!("role:       {}", dashboard.role);
        println!("dashboard:  {}", dashboard.title);
        for entry in dashboard.menu {
            println!("  - {}", entry.label);
        }
    }
    Ok(())
}

pub async fn profile(ctx: &AppContext, id: Option<&str>) -> Result<()> {
    let user = match id {
        Some(id) => ctx.api.fetch_user(id).await?,
        None => match ctx.controller.refresh_profile().await {
            Ok(user) => user,
            Err(failure) => bail!(failure),
        },
    };
    print_user(&user);
    Ok(())
}

pub async fn users(ctx: &AppContext) -> Result<()> {
    let page = ctx.api.list_users().await?;
    for user in &page.users {
        println!(
            "{:>6}  {:<28}  {}",
            user.id,
            user.display_name().unwrap_or_default(),
            user.email.as_deref().unwrap_or("-")
        );
    }
    println!(
        "showing {} of {} (skip {})",
        page.users.len(),
        page.total,
        page.skip
    );
    Ok(())
}

fn print_user(user: &UserRecord) {
    println!("id:     {}", user.id);
    println!("name:   {}", user.display_name().unwrap_or_default());
    println!("email:  {}", user.email.as_deref().unwrap_or("-"));
    println!("role:   {}", user.role.as_deref().unwrap_or("-"));
    println!("avatar: {}", user.avatar.as_deref().unwrap_or("-"));
}
