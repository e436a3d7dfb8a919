use tracing::info;

use crate::api::traits::FinanceApi;
use crate::errors::DashboardError;
use crate::models::forms::{LoginForm, RegisterForm};
use crate::models::user::User;

/// Login, registration and logout against the backend session.
///
/// Forms are validated locally before any request goes out.
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    pub async fn login(
        &self,
        api: &dyn FinanceApi,
        form: &LoginForm,
    ) -> Result<User, DashboardError> {
        form.validate()?;
        let user = api.login(form.email.trim(), &form.password).await?;
        info!("Logged in as {}", user.username);
        Ok(user)
    }

    pub async fn register(
        &self,
        api: &dyn FinanceApi,
        form: &RegisterForm,
    ) -> Result<(), DashboardError> {
        form.validate()?;
        api.register(form.username.trim(), form.email.trim(), &form.password)
            .await?;
        info!("Registered account {}", form.username.trim());
        Ok(())
    }

    pub async fn logout(&self, api: &dyn FinanceApi) -> Result<(), DashboardError> {
        api.logout().await?;
        info!("Logged out");
        Ok(())
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}
