use crate::error::{CliError, Result as CliResult};
use crate::print_json;

use dl_cache::{RedisCache, UserService, UserStore};
use dl_core::User;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Look a user up (cache first, then the store)
    Get { id: i64 },

    /// Save or update a user
    Put {
        id: i64,
        username: String,
        password: String,

        #[arg(long)]
        mobile: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a user and evict its cache entry
    Delete { id: i64 },
}

pub async fn run(action: UserCommands, config: &dl_config::Config, pretty: bool) -> CliResult<()> {
    let cache = RedisCache::connect(
        &config.cache.url,
        &config.cache.namespace,
        config.cache.ttl_secs,
    )
    .await?;
    let service = UserService::new(UserStore::seeded(), cache);

    match action {
        UserCommands::Get { id } => match service.get(id).await {
            Some(user) => print_json(&user, pretty),
            None => Err(CliError::NotFound),
        },

        UserCommands::Put {
            id,
            username,
            password,
            mobile,
            email,
        } => {
            let mut user = User::new(id, username, password);
            user.mobile = mobile;
            user.email = email;

            let saved = service.save_or_update(user).await;
            print_json(&saved, pretty)
        }

        UserCommands::Delete { id } => {
            service.delete(id).await;
            Ok(())
        }
    }
}
