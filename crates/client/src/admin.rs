//! Admin API surface: authenticated reads and writes
//!
//! Every method goes through the shared refresh-and-retry path in
//! [`Client`]. Media upload methods live in the upload module.

use causeway_core::types::{
    Award, AwardInput, Category, CategoryInput, Post, PostInput, Publication, PublicationInput,
    SiteProfile, SocialLink, SocialLinkInput, SuperAdminStatus, UserAccount, UserInput,
};
use causeway_core::{Action, ApiResult};

use crate::client::Client;

/// Authenticated surface for the admin panel
#[derive(Clone)]
pub struct AdminApi {
    client: Client,
}

impl AdminApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    // Posts

    pub async fn create_post(&self, input: &PostInput) -> ApiResult<Post> {
        let envelope = self
            .client
            .execute_admin(Action::CreatePost, &input.to_params())
            .await?;
        envelope.into_data()
    }

    pub async fn update_post(&self, id: i64, input: &PostInput) -> ApiResult<Post> {
        let mut params = input.to_params();
        params.push(("id".to_string(), id.to_string()));
        let envelope = self.client.execute_admin(Action::UpdatePost, &params).await?;
        envelope.into_data()
    }

    pub async fn delete_post(&self, id: i64) -> ApiResult<()> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self.client.execute_admin(Action::DeletePost, &params).await?;
        envelope.expect_success()
    }

    // Categories

    pub async fn create_category(&self, input: &CategoryInput) -> ApiResult<Category> {
        let envelope = self
            .client
            .execute_admin(Action::CreateCategory, &input.to_params())
            .await?;
        envelope.into_data()
    }

    pub async fn update_category(&self, id: i64, input: &CategoryInput) -> ApiResult<Category> {
        let mut params = input.to_params();
        params.push(("id".to_string(), id.to_string()));
        let envelope = self
            .client
            .execute_admin(Action::UpdateCategory, &params)
            .await?;
        envelope.into_data()
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self
            .client
            .execute_admin(Action::DeleteCategory, &params)
            .await?;
        envelope.expect_success()
    }

    // Awards

    pub async fn create_award(&self, input: &AwardInput) -> ApiResult<Award> {
        let envelope = self
            .client
            .execute_admin(Action::CreateAward, &input.to_params())
            .await?;
        envelope.into_data()
    }

    pub async fn update_award(&self, id: i64, input: &AwardInput) -> ApiResult<Award> {
        let mut params = input.to_params();
        params.push(("id".to_string(), id.to_string()));
        let envelope = self.client.execute_admin(Action::UpdateAward, &params).await?;
        envelope.into_data()
    }

    pub async fn delete_award(&self, id: i64) -> ApiResult<()> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self.client.execute_admin(Action::DeleteAward, &params).await?;
        envelope.expect_success()
    }

    // Publications

    pub async fn create_publication(&self, input: &PublicationInput) -> ApiResult<Publication> {
        let envelope = self
            .client
            .execute_admin(Action::CreatePublication, &input.to_params())
            .await?;
        envelope.into_data()
    }

    pub async fn update_publication(
        &self,
        id: i64,
        input: &PublicationInput,
    ) -> ApiResult<Publication> {
        let mut params = input.to_params();
        params.push(("id".to_string(), id.to_string()));
        let envelope = self
            .client
            .execute_admin(Action::UpdatePublication, &params)
            .await?;
        envelope.into_data()
    }

    pub async fn delete_publication(&self, id: i64) -> ApiResult<()> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self
            .client
            .execute_admin(Action::DeletePublication, &params)
            .await?;
        envelope.expect_success()
    }

    // Social links

    pub async fn create_social_link(&self, input: &SocialLinkInput) -> ApiResult<SocialLink> {
        let envelope = self
            .client
            .execute_admin(Action::CreateSocialLink, &input.to_params())
            .await?;
        envelope.into_data()
    }

    pub async fn update_social_link(
        &self,
        id: i64,
        input: &SocialLinkInput,
    ) -> ApiResult<SocialLink> {
        let mut params = input.to_params();
        params.push(("id".to_string(), id.to_string()));
        let envelope = self
            .client
            .execute_admin(Action::UpdateSocialLink, &params)
            .await?;
        envelope.into_data()
    }

    pub async fn delete_social_link(&self, id: i64) -> ApiResult<()> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self
            .client
            .execute_admin(Action::DeleteSocialLink, &params)
            .await?;
        envelope.expect_success()
    }

    // Profile

    pub async fn update_profile(&self, profile: &SiteProfile) -> ApiResult<SiteProfile> {
        let envelope = self
            .client
            .execute_admin(Action::UpdateProfile, &profile.to_params())
            .await?;
        envelope.into_data()
    }

    // Users

    pub async fn list_users(&self) -> ApiResult<Vec<UserAccount>> {
        let envelope = self.client.execute_admin(Action::ListUsers, &[]).await?;
        envelope.into_data()
    }

    pub async fn create_user(&self, input: &UserInput) -> ApiResult<UserAccount> {
        let envelope = self
            .client
            .execute_admin(Action::CreateUser, &input.to_params())
            .await?;
        envelope.into_data()
    }

    pub async fn update_user(&self, id: i64, input: &UserInput) -> ApiResult<UserAccount> {
        let mut params = input.to_params();
        params.push(("id".to_string(), id.to_string()));
        let envelope = self.client.execute_admin(Action::UpdateUser, &params).await?;
        envelope.into_data()
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self.client.execute_admin(Action::DeleteUser, &params).await?;
        envelope.expect_success()
    }

    /// Change the current user's password
    pub async fn change_password(&self, current: &str, new: &str) -> ApiResult<()> {
        let params = vec![
            ("currentPassword".to_string(), current.to_string()),
            ("newPassword".to_string(), new.to_string()),
        ];
        let envelope = self
            .client
            .execute_admin(Action::ChangePassword, &params)
            .await?;
        envelope.expect_success()
    }

    /// Whether the current session belongs to a super admin
    pub async fn check_super_admin(&self) -> ApiResult<bool> {
        let envelope = self
            .client
            .execute_admin(Action::CheckSuperAdmin, &[])
            .await?;
        let status: SuperAdminStatus = envelope.into_data()?;
        Ok(status.is_super_admin)
    }
}
