use bims_auth::UserStore;
use bims_core::{AppError, hash_password};
use bims_models::{CreateUserDto, Identity, NewUser};
use tracing::instrument;

pub struct UserService;

impl UserService {
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn create_user(
        users: &dyn UserStore,
        dto: CreateUserDto,
    ) -> Result<Identity, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .insert(NewUser {
                first_name: dto.first_name,
                last_name: dto.last_name,
                email: dto.email,
                role: dto.role.unwrap_or_default(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(Identity::from(user))
    }

    #[instrument(skip_all)]
    pub async fn get_users(users: &dyn UserStore) -> Result<Vec<Identity>, AppError> {
        let users = users.list().await?;
        Ok(users.into_iter().map(Identity::from).collect())
    }
}
