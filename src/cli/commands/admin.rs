use crate::config::Config;
use crate::domain::UserType;
use crate::models::account::RegisterInput;
use crate::state::SharedState;

pub async fn cmd_create_admin(
    config: Config,
    email: String,
    username: String,
    password: String,
) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    let user = state
        .auth_service
        .create_user(
            RegisterInput {
                email,
                username,
                password,
            },
            UserType::Admin,
        )
        .await?;
    let api_key = state.auth_service.get_api_key(user.id).await?;

    println!("✓ Admin account created");
    println!("  ID:       {}", user.id);
    println!("  Username: {}", user.username);
    println!("  Email:    {}", user.email);
    println!("  API key:  {api_key}");

    Ok(())
}
